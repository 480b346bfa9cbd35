//! Oratorio CLI binary.
//!
//! Turns a free-text topic into a narrated audio file: chapters are
//! outlined, a script is drafted and edited, and the result is synthesized
//! to speech and written to disk.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::Cli;

    // Provider keys come from the environment; a .env file is optional.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    oratorio::telemetry::init_telemetry(cli.verbose);

    cli::run_narration(&cli).await?;
    Ok(())
}
