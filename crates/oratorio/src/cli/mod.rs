//! Command-line interface module.

mod commands;
mod narrate;

pub use commands::Cli;
pub use narrate::run_narration;
