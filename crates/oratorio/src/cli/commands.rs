//! CLI argument definitions.

use clap::Parser;
use oratorio::{DEFAULT_SCRIPT_LENGTH, Style};
use std::path::PathBuf;

/// Oratorio - turn a topic into a narrated audio file
#[derive(Parser, Debug)]
#[command(name = "oratorio")]
#[command(about = "Turn a topic into a narrated audio file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Topic to narrate
    pub topic: String,

    /// Requested script length in words
    #[arg(long, default_value_t = DEFAULT_SCRIPT_LENGTH)]
    pub length: u32,

    /// Narration style (formal, casual, technical, humorous, poetic)
    #[arg(long, default_value_t = Style::default())]
    pub style: Style,

    /// Directory the audio file is written into
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
