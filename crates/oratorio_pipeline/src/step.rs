//! Step definitions: the unit of pipeline work.

use async_trait::async_trait;
use oratorio_core::Shape;
use oratorio_error::{OratorioResult, PipelineError, PipelineErrorKind};
use serde_json::Value;
use std::collections::HashMap;

/// Reserved result-store key under which the trigger payload is seeded.
pub const TRIGGER_KEY: &str = "trigger";

/// A declared read from the result store.
///
/// The source is either [`TRIGGER_KEY`] or the name of a step registered
/// earlier in the same pipeline; the shape is checked against the resolved
/// value before the step executes.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct InputBinding {
    /// Result-store key this binding reads
    source: String,
    /// Shape the resolved value must match
    shape: Shape,
}

impl InputBinding {
    /// Bind to a named predecessor's output.
    pub fn new(source: impl Into<String>, shape: Shape) -> Self {
        Self {
            source: source.into(),
            shape,
        }
    }

    /// Bind to the trigger payload.
    pub fn trigger(shape: Shape) -> Self {
        Self::new(TRIGGER_KEY, shape)
    }
}

/// A named unit of pipeline work with declared input/output contracts.
///
/// Implementations are registered behind an `Arc` and never mutated after
/// registration. The execution function may perform asynchronous external
/// work (LLM calls, synthesis); the engine awaits it to completion before
/// the next step starts.
#[async_trait]
pub trait Step: Send + Sync {
    /// Unique name within the pipeline. Also the result-store key the
    /// step's output is published under.
    fn name(&self) -> &str;

    /// Inputs this step reads, resolved by the engine before execution.
    fn inputs(&self) -> &[InputBinding];

    /// Contract the returned value must satisfy.
    fn output_shape(&self) -> &Shape;

    /// Perform the step's work against its resolved inputs.
    async fn execute(&self, inputs: &StepInputs) -> OratorioResult<Value>;
}

/// The resolved inputs handed to a step's execution function.
///
/// Keys match the step's declared binding sources; the engine only invokes
/// a step once every declared binding resolved, so [`StepInputs::require`]
/// failing indicates a binding the step forgot to declare.
#[derive(Debug, Clone)]
pub struct StepInputs {
    step: String,
    values: HashMap<String, Value>,
}

impl StepInputs {
    pub(crate) fn new(step: &str, values: HashMap<String, Value>) -> Self {
        Self {
            step: step.to_string(),
            values,
        }
    }

    /// Look up a resolved input by its binding source.
    pub fn get(&self, source: &str) -> Option<&Value> {
        self.values.get(source)
    }

    /// Look up a resolved input, erroring if it was never declared.
    pub fn require(&self, source: &str) -> OratorioResult<&Value> {
        self.values.get(source).ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingDependency {
                step: self.step.clone(),
                key: source.to_string(),
            })
            .into()
        })
    }
}
