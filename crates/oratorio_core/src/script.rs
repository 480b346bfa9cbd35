//! The trigger payload for a narration run.

use crate::{Field, Shape};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Default requested script length, in words.
pub const DEFAULT_SCRIPT_LENGTH: u32 = 1000;

/// Narration style requested for the script.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Style {
    /// Measured, structured delivery
    #[default]
    Formal,
    /// Conversational delivery
    Casual,
    /// Precise, terminology-heavy delivery
    Technical,
    /// Light, joke-friendly delivery
    Humorous,
    /// Lyrical delivery
    Poetic,
}

impl Style {
    /// All accepted wire values, for shape contracts.
    pub fn wire_values() -> Vec<String> {
        use strum::IntoEnumIterator;
        Self::iter().map(|s| s.to_string()).collect()
    }
}

/// What the caller asks the narration pipeline to produce.
///
/// Serializes to the wire shape the pipeline trigger contract declares:
/// `userInput` is required, `length` and `style` have defaults.
///
/// # Examples
///
/// ```
/// use oratorio_core::{ScriptRequest, Style};
///
/// let request = ScriptRequest::new("startups")
///     .with_length(500)
///     .with_style(Style::Casual);
/// assert_eq!(request.length(), 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ScriptRequest {
    /// The free-text topic to narrate
    #[serde(rename = "userInput")]
    user_input: String,
    /// Requested script length in words
    #[serde(default = "default_length")]
    #[getter(copy)]
    length: u32,
    /// Requested narration style
    #[serde(default)]
    #[getter(copy)]
    style: Style,
}

fn default_length() -> u32 {
    DEFAULT_SCRIPT_LENGTH
}

impl ScriptRequest {
    /// Create a request for a topic with default length and style.
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            length: DEFAULT_SCRIPT_LENGTH,
            style: Style::default(),
        }
    }

    /// Set the requested length in words.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Set the requested narration style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The trigger contract this payload satisfies.
    pub fn shape() -> Shape {
        Shape::Object(vec![
            Field::required("userInput", Shape::String),
            Field::with_default("length", Shape::Integer, json!(DEFAULT_SCRIPT_LENGTH)),
            Field::with_default(
                "style",
                Shape::OneOf(Style::wire_values()),
                json!(Style::default().to_string()),
            ),
        ])
    }

    /// Serialize to the trigger payload value.
    pub fn to_value(&self) -> Value {
        // Serialization of this struct cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
