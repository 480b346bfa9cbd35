//! Pipeline construction and execution.

use crate::outcome::{RunOutcome, StepOutcome, StepStatus};
use crate::step::{Step, StepInputs, TRIGGER_KEY};
use crate::store::ResultStore;
use oratorio_core::Shape;
use oratorio_error::{OratorioResult, PipelineError, PipelineErrorKind};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// An ordered, sealable sequence of steps plus a trigger contract.
///
/// Build with [`Pipeline::register`], seal with [`Pipeline::commit`], then
/// call [`Pipeline::run`] as many times as needed. A committed pipeline is
/// read-only and safely shared across concurrent runs.
///
/// # Examples
///
/// ```ignore
/// let mut pipeline = Pipeline::new("narration", ScriptRequest::shape());
/// pipeline.register(Arc::new(chapters_step))?;
/// pipeline.register(Arc::new(script_step))?;
/// pipeline.commit()?;
/// let outcome = pipeline.run(request.to_value()).await?;
/// ```
pub struct Pipeline {
    name: String,
    trigger_shape: Shape,
    steps: Vec<Arc<dyn Step>>,
    committed: bool,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("steps", &self.steps.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("committed", &self.committed)
            .finish()
    }
}

impl Pipeline {
    /// Create an empty, uncommitted pipeline.
    pub fn new(name: impl Into<String>, trigger_shape: Shape) -> Self {
        Self {
            name: name.into(),
            trigger_shape,
            steps: Vec::new(),
            committed: false,
        }
    }

    /// Pipeline name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the registered steps, in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Append a step to the pipeline.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the pipeline is already committed,
    /// if the step's name duplicates an existing step (or the reserved
    /// `"trigger"` key), or if any input binding references a name that is
    /// neither the trigger nor an already-registered step.
    pub fn register(&mut self, step: Arc<dyn Step>) -> Result<(), PipelineError> {
        if self.committed {
            return Err(PipelineError::new(PipelineErrorKind::Configuration(
                format!(
                    "cannot register step '{}': pipeline '{}' is committed",
                    step.name(),
                    self.name
                ),
            )));
        }
        if step.name() == TRIGGER_KEY {
            return Err(PipelineError::new(PipelineErrorKind::Configuration(
                format!("step name '{}' is reserved", TRIGGER_KEY),
            )));
        }
        if self.steps.iter().any(|s| s.name() == step.name()) {
            return Err(PipelineError::new(PipelineErrorKind::Configuration(
                format!("duplicate step name '{}'", step.name()),
            )));
        }
        // Bindings may only reach backwards; checking here makes dangling
        // references a construction-time error instead of a runtime skip.
        for binding in step.inputs() {
            let source = binding.source().as_str();
            if source != TRIGGER_KEY && !self.steps.iter().any(|s| s.name() == source) {
                return Err(PipelineError::new(PipelineErrorKind::Configuration(
                    format!(
                        "step '{}' reads '{}', which is not the trigger or a prior step",
                        step.name(),
                        source
                    ),
                )));
            }
        }
        self.steps.push(step);
        Ok(())
    }

    /// Seal the pipeline against further registration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if called twice.
    pub fn commit(&mut self) -> Result<(), PipelineError> {
        if self.committed {
            return Err(PipelineError::new(PipelineErrorKind::Configuration(
                format!("pipeline '{}' is already committed", self.name),
            )));
        }
        self.committed = true;
        Ok(())
    }

    /// Execute the pipeline against one trigger payload.
    ///
    /// The trigger is validated against the trigger contract (declared
    /// defaults are filled in), seeded into a fresh result store under
    /// `"trigger"`, and the steps run strictly in registration order. See
    /// the crate docs for the skip and fault semantics.
    ///
    /// # Errors
    ///
    /// Returns an error for pre-run misuse only: an uncommitted pipeline or
    /// a trigger payload that fails its contract. Step faults are recorded
    /// in the returned [`RunOutcome`]; use [`RunOutcome::into_result`] to
    /// surface them as errors.
    #[tracing::instrument(skip(self, trigger), fields(pipeline = %self.name, step_count = self.steps.len()))]
    pub async fn run(&self, trigger: Value) -> OratorioResult<RunOutcome> {
        if !self.committed {
            return Err(PipelineError::new(PipelineErrorKind::Configuration(
                format!("pipeline '{}' must be committed before running", self.name),
            ))
            .into());
        }

        let trigger = self.trigger_shape.conform(trigger).map_err(|mismatch| {
            PipelineError::new(PipelineErrorKind::Validation {
                location: TRIGGER_KEY.to_string(),
                message: mismatch.to_string(),
            })
        })?;

        let mut store = ResultStore::seeded(trigger);
        let mut outcomes: Vec<StepOutcome> = self
            .steps
            .iter()
            .map(|step| StepOutcome::pending(step.name()))
            .collect();
        let mut fault: Option<PipelineError> = None;

        for (index, step) in self.steps.iter().enumerate() {
            match self.execute_step(step.as_ref(), &store).await {
                StepResult::Success(output) => {
                    store.insert(step.name(), output.clone());
                    outcomes[index].succeed(output);
                    tracing::debug!(step = %step.name(), "Step completed");
                }
                StepResult::Skipped(error) => {
                    // Partial continuation: nothing lands in the store, so
                    // dependents of this step will skip in turn, while
                    // unrelated later steps still run.
                    outcomes[index].set_status(StepStatus::Skipped);
                    tracing::warn!(step = %step.name(), error = %error, "Step skipped");
                }
                StepResult::Failed(error) => {
                    // The fault surfaces through the outcome; the run keeps
                    // going so steps not depending on this one still execute,
                    // and dependents skip over the missing store entry.
                    outcomes[index].set_status(StepStatus::Failed);
                    tracing::error!(step = %step.name(), error = %error, "Step failed");
                    if fault.is_none() {
                        fault = Some(error);
                    }
                }
            }
        }

        Ok(RunOutcome::new(&self.name, outcomes, fault))
    }

    async fn execute_step(&self, step: &dyn Step, store: &ResultStore) -> StepResult {
        let mut resolved = HashMap::new();
        for binding in step.inputs() {
            let source = binding.source().as_str();
            let Some(value) = store.get(source) else {
                return StepResult::Skipped(PipelineError::new(
                    PipelineErrorKind::MissingDependency {
                        step: step.name().to_string(),
                        key: source.to_string(),
                    },
                ));
            };
            if let Err(mismatch) = binding.shape().check(value) {
                return StepResult::Failed(PipelineError::new(PipelineErrorKind::Validation {
                    location: format!("input '{}' of step '{}'", source, step.name()),
                    message: mismatch.to_string(),
                }));
            }
            resolved.insert(source.to_string(), value.clone());
        }

        let inputs = StepInputs::new(step.name(), resolved);
        match step.execute(&inputs).await {
            Ok(output) => match step.output_shape().check(&output) {
                Ok(()) => StepResult::Success(output),
                Err(mismatch) => {
                    StepResult::Failed(PipelineError::new(PipelineErrorKind::Validation {
                        location: format!("output of step '{}'", step.name()),
                        message: mismatch.to_string(),
                    }))
                }
            },
            Err(error) => StepResult::Failed(PipelineError::new(
                PipelineErrorKind::StepExecution {
                    step: step.name().to_string(),
                    message: error.to_string(),
                },
            )),
        }
    }
}

enum StepResult {
    Success(Value),
    Skipped(PipelineError),
    Failed(PipelineError),
}
