//! The narration pipeline: topic to narrated audio in four steps.
//!
//! Step wiring mirrors the run it produces: the chapters step outlines the
//! topic, the script step drafts from the outline, the editor step revises
//! the draft, and the audio step synthesizes and persists the result. Step
//! names double as the result-store keys their outputs land under.

mod steps;

pub use steps::{AudioStep, ChaptersStep, EditorStep, ScriptStep};

use oratorio_error::OratorioResult;
use oratorio_interface::{OratorioDriver, SpeechSynthesizer};
use oratorio_pipeline::Pipeline;
use std::path::PathBuf;
use std::sync::Arc;

/// Name of the chapter-outline step.
pub const CHAPTERS_STEP: &str = "generateChaptersStep";
/// Name of the script-drafting step.
pub const SCRIPT_STEP: &str = "generateScriptStep";
/// Name of the script-editing step.
pub const EDITOR_STEP: &str = "scriptEditorStep";
/// Name of the synthesis-and-persistence step.
pub const AUDIO_STEP: &str = "audioGeneratorStep";

/// Build and commit the narration pipeline.
///
/// The three generation steps share one driver; the audio step owns the
/// synthesizer and writes its output under `output_dir`.
pub fn narration_pipeline<S>(
    driver: Arc<dyn OratorioDriver>,
    synthesizer: S,
    output_dir: PathBuf,
) -> OratorioResult<Pipeline>
where
    S: SpeechSynthesizer + 'static,
{
    let mut pipeline = Pipeline::new("narration", oratorio_core::ScriptRequest::shape());
    pipeline.register(Arc::new(ChaptersStep::new(driver.clone())))?;
    pipeline.register(Arc::new(ScriptStep::new(driver.clone())))?;
    pipeline.register(Arc::new(EditorStep::new(driver)))?;
    pipeline.register(Arc::new(AudioStep::new(synthesizer, output_dir)))?;
    pipeline.commit()?;
    Ok(pipeline)
}
