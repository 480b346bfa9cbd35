//! Step-pipeline execution engine.
//!
//! A [`Pipeline`] is an ordered chain of named steps, each declaring what it
//! reads from earlier steps (or the trigger payload) and what shape its
//! output must have. Pipelines are built with [`Pipeline::register`], sealed
//! with [`Pipeline::commit`], and then run any number of times; every run
//! owns its own [`ResultStore`], so concurrent runs of one committed pipeline
//! do not interfere.
//!
//! Steps execute strictly in registration order, one at a time. A step whose
//! execution function faults is marked failed and the first such fault is
//! recorded on the run; a step whose declared inputs cannot be resolved
//! (its predecessor failed or skipped) is skipped. Later steps that do not
//! depend on a failed or skipped step still execute. The caller gets a
//! [`RunOutcome`] with a status per step and can surface the recorded fault
//! with [`RunOutcome::into_result`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod outcome;
mod pipeline;
mod step;
mod store;

pub use outcome::{RunOutcome, StepOutcome, StepStatus};
pub use pipeline::Pipeline;
pub use step::{InputBinding, Step, StepInputs, TRIGGER_KEY};
pub use store::ResultStore;
