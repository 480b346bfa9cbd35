//! Narration command handler.

use std::sync::Arc;

use oratorio::narration::{AUDIO_STEP, narration_pipeline};
use oratorio::{OratorioResult, ScriptRequest};
use oratorio_models::{ElevenLabsSynthesizer, GeminiDriver};

use super::Cli;

/// Run the narration pipeline for the CLI arguments and print the audio
/// file path on success.
pub async fn run_narration(cli: &Cli) -> OratorioResult<()> {
    let driver = Arc::new(GeminiDriver::from_env()?);
    let synthesizer = ElevenLabsSynthesizer::from_env()?;
    let pipeline = narration_pipeline(driver, synthesizer, cli.output_dir.clone())?;

    let request = ScriptRequest::new(&cli.topic)
        .with_length(cli.length)
        .with_style(cli.style);

    tracing::info!(topic = %cli.topic, style = %cli.style, length = cli.length, "Starting narration run");
    let outcome = pipeline.run(request.to_value()).await?.into_result()?;

    if let Some(file) = outcome
        .output(AUDIO_STEP)
        .and_then(|output| output.get("audioFile"))
        .and_then(|file| file.as_str())
    {
        println!("{}", file);
    }
    Ok(())
}
