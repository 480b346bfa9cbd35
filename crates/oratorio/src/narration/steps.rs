//! Step implementations for the narration pipeline.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

use oratorio_core::{Field, GenerateRequest, Message, ScriptRequest, Shape};
use oratorio_error::{
    GenerationError, GenerationErrorKind, OratorioResult, PipelineError, PipelineErrorKind,
};
use oratorio_interface::{OratorioDriver, SpeechSynthesizer};
use oratorio_pipeline::{InputBinding, Step, StepInputs, TRIGGER_KEY};
use oratorio_speech::ChunkedSynthesizer;

use super::{AUDIO_STEP, CHAPTERS_STEP, EDITOR_STEP, SCRIPT_STEP};
use crate::persistence;

const CHAPTERS_INSTRUCTIONS: &str = "You are a script outline generator. Given a topic or \
     input, you need to generate a list of chapters that are relevant for a deep dive into \
     the topic.";

const SCRIPT_INSTRUCTIONS: &str = "You are a script generator. You are given a user input \
     and you need to generate a script that dives deep into the user's input/topic of choice.";

const EDITOR_INSTRUCTIONS: &str = "You are a script editor. You are given a script and you \
     will edit it based on the instructions given.";

/// Deserialize the trigger payload a step resolved.
fn script_request(inputs: &StepInputs, step: &str) -> OratorioResult<ScriptRequest> {
    let trigger = inputs.require(TRIGGER_KEY)?;
    serde_json::from_value(trigger.clone()).map_err(|e| {
        PipelineError::new(PipelineErrorKind::Validation {
            location: format!("trigger read by step '{}'", step),
            message: e.to_string(),
        })
        .into()
    })
}

/// Extract a resolved string input.
fn string_input<'a>(inputs: &'a StepInputs, source: &str) -> OratorioResult<&'a str> {
    inputs.require(source)?.as_str().ok_or_else(|| {
        PipelineError::new(PipelineErrorKind::Validation {
            location: format!("input '{}'", source),
            message: "expected a string value".to_string(),
        })
        .into()
    })
}

/// Outlines the topic as a JSON list of chapter titles.
pub struct ChaptersStep {
    driver: Arc<dyn OratorioDriver>,
    inputs: Vec<InputBinding>,
    output_shape: Shape,
}

impl ChaptersStep {
    /// Create the step against a generation driver.
    pub fn new(driver: Arc<dyn OratorioDriver>) -> Self {
        Self {
            driver,
            inputs: vec![InputBinding::trigger(ScriptRequest::shape())],
            output_shape: Shape::Array(Box::new(Shape::String)),
        }
    }
}

#[async_trait]
impl Step for ChaptersStep {
    fn name(&self) -> &str {
        CHAPTERS_STEP
    }

    fn inputs(&self) -> &[InputBinding] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    async fn execute(&self, inputs: &StepInputs) -> OratorioResult<Value> {
        let request = script_request(inputs, CHAPTERS_STEP)?;
        let generate = GenerateRequest {
            messages: vec![
                Message::system(CHAPTERS_INSTRUCTIONS),
                Message::user(format!(
                    "Generate the chapter list for a deep dive into: {}",
                    request.user_input()
                )),
            ],
            response_shape: Some(self.output_shape.clone()),
            ..Default::default()
        };
        let response = self.driver.generate(&generate).await?;
        response.json().cloned().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::Malformed(
                "chapter list is not structured output".to_string(),
            ))
            .into()
        })
    }
}

/// Drafts the narration script from the trigger and the chapter outline.
pub struct ScriptStep {
    driver: Arc<dyn OratorioDriver>,
    inputs: Vec<InputBinding>,
    output_shape: Shape,
}

impl ScriptStep {
    /// Create the step against a generation driver.
    pub fn new(driver: Arc<dyn OratorioDriver>) -> Self {
        Self {
            driver,
            inputs: vec![
                InputBinding::trigger(ScriptRequest::shape()),
                InputBinding::new(CHAPTERS_STEP, Shape::Array(Box::new(Shape::String))),
            ],
            output_shape: Shape::String,
        }
    }
}

#[async_trait]
impl Step for ScriptStep {
    fn name(&self) -> &str {
        SCRIPT_STEP
    }

    fn inputs(&self) -> &[InputBinding] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    async fn execute(&self, inputs: &StepInputs) -> OratorioResult<Value> {
        let request = script_request(inputs, SCRIPT_STEP)?;
        let chapters = inputs.require(CHAPTERS_STEP)?;
        let outline = chapters
            .as_array()
            .map(|titles| {
                titles
                    .iter()
                    .filter_map(|t| t.as_str())
                    .map(|t| format!("- {}", t))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        let generate = GenerateRequest {
            messages: vec![
                Message::system(SCRIPT_INSTRUCTIONS),
                Message::user(format!(
                    "Topic: {}\n\nChapters:\n{}\n\nWrite a roughly {}-word narration \
                     script in a {} style covering these chapters in order. Respond with \
                     the script text only.",
                    request.user_input(),
                    outline,
                    request.length(),
                    request.style()
                )),
            ],
            ..Default::default()
        };
        let response = self.driver.generate(&generate).await?;
        Ok(Value::String(response.text()))
    }
}

/// Revises the drafted script for listener engagement.
pub struct EditorStep {
    driver: Arc<dyn OratorioDriver>,
    inputs: Vec<InputBinding>,
    output_shape: Shape,
}

impl EditorStep {
    /// Create the step against a generation driver.
    pub fn new(driver: Arc<dyn OratorioDriver>) -> Self {
        Self {
            driver,
            inputs: vec![InputBinding::new(SCRIPT_STEP, Shape::String)],
            output_shape: Shape::String,
        }
    }
}

#[async_trait]
impl Step for EditorStep {
    fn name(&self) -> &str {
        EDITOR_STEP
    }

    fn inputs(&self) -> &[InputBinding] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    async fn execute(&self, inputs: &StepInputs) -> OratorioResult<Value> {
        let script = string_input(inputs, SCRIPT_STEP)?;
        let generate = GenerateRequest {
            messages: vec![
                Message::system(EDITOR_INSTRUCTIONS),
                Message::user(format!(
                    "Edit the following script to make it more engaging for listeners \
                     while preserving its meaning and approximate length. Respond with \
                     the edited script only.\n\n{}",
                    script
                )),
            ],
            ..Default::default()
        };
        let response = self.driver.generate(&generate).await?;
        Ok(Value::String(response.text()))
    }
}

/// Synthesizes the edited script and writes the audio file.
pub struct AudioStep<S: SpeechSynthesizer> {
    synthesizer: ChunkedSynthesizer<S>,
    output_dir: PathBuf,
    inputs: Vec<InputBinding>,
    output_shape: Shape,
}

impl<S: SpeechSynthesizer> AudioStep<S> {
    /// Create the step against a synthesis backend and an output directory.
    pub fn new(synthesizer: S, output_dir: PathBuf) -> Self {
        Self {
            synthesizer: ChunkedSynthesizer::new(synthesizer),
            output_dir,
            inputs: vec![InputBinding::new(EDITOR_STEP, Shape::String)],
            output_shape: Shape::Object(vec![
                Field::required("success", Shape::Boolean),
                Field::required("audioFile", Shape::String),
            ]),
        }
    }
}

#[async_trait]
impl<S: SpeechSynthesizer> Step for AudioStep<S> {
    fn name(&self) -> &str {
        AUDIO_STEP
    }

    fn inputs(&self) -> &[InputBinding] {
        &self.inputs
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    #[tracing::instrument(skip(self, inputs))]
    async fn execute(&self, inputs: &StepInputs) -> OratorioResult<Value> {
        let script = string_input(inputs, EDITOR_STEP)?;
        let audio = self.synthesizer.synthesize(script).await?;
        let path = persistence::write_audio(&self.output_dir, &audio)?;
        tracing::info!(path = %path.display(), bytes = audio.len(), "Audio file written");
        Ok(json!({
            "success": true,
            "audioFile": path.display().to_string(),
        }))
    }
}
