//! Per-run outcome reporting.

use oratorio_error::{OratorioResult, PipelineError};
use serde_json::Value;

/// Status of one step within a run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub enum StepStatus {
    /// Not yet executed
    Pending,
    /// Executed and its output passed the output contract
    Success,
    /// Executed and faulted, or produced output violating its contract
    Failed,
    /// Not executed because a declared input could not be resolved
    Skipped,
}

/// Terminal record of one step within a finished run.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct StepOutcome {
    /// Step name
    name: String,
    /// Terminal status
    #[getter(copy)]
    status: StepStatus,
    /// Produced output, present only for `Success`
    output: Option<Value>,
}

impl StepOutcome {
    pub(crate) fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Pending,
            output: None,
        }
    }

    pub(crate) fn set_status(&mut self, status: StepStatus) {
        self.status = status;
    }

    pub(crate) fn succeed(&mut self, output: Value) {
        self.status = StepStatus::Success;
        self.output = Some(output);
    }
}

/// The full record of one pipeline run: a status per step, outputs for the
/// steps that succeeded, and the first fault if any step failed.
///
/// A step fault does not turn into an `Err` until the caller asks for one;
/// the outcome stays inspectable either way.
///
/// # Examples
///
/// ```ignore
/// let outcome = pipeline.run(trigger).await?;
/// if let Some(fault) = outcome.fault() {
///     eprintln!("run failed: {fault}");
/// }
/// let script = outcome.output("generateScriptStep");
/// ```
#[derive(Debug, derive_getters::Getters)]
pub struct RunOutcome {
    /// Name of the pipeline that ran
    pipeline: String,
    /// Per-step outcomes, in pipeline order
    steps: Vec<StepOutcome>,
    /// First fault, if any step failed
    fault: Option<PipelineError>,
}

impl RunOutcome {
    pub(crate) fn new(
        pipeline: &str,
        steps: Vec<StepOutcome>,
        fault: Option<PipelineError>,
    ) -> Self {
        Self {
            pipeline: pipeline.to_string(),
            steps,
            fault,
        }
    }

    /// Status of a named step, if the pipeline has one.
    pub fn status(&self, step: &str) -> Option<StepStatus> {
        self.steps
            .iter()
            .find(|s| s.name() == step)
            .map(|s| s.status())
    }

    /// Output of a named step, present only if it succeeded.
    pub fn output(&self, step: &str) -> Option<&Value> {
        self.steps
            .iter()
            .find(|s| s.name() == step)
            .and_then(|s| s.output().as_ref())
    }

    /// Whether the run finished without a fault.
    pub fn succeeded(&self) -> bool {
        self.fault.is_none()
    }

    /// Surface the fault as an error, for callers that treat a failed run
    /// as fatal.
    pub fn into_result(self) -> OratorioResult<Self> {
        match &self.fault {
            Some(fault) => Err(fault.clone().into()),
            None => Ok(self),
        }
    }
}
