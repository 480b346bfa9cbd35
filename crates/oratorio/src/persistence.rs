//! Audio file persistence.

use chrono::Utc;
use oratorio_error::{IoError, OratorioResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp-derived file name for one narration's audio output.
pub fn audio_file_name() -> String {
    format!("{}.mp3", Utc::now().timestamp_millis())
}

/// Write audio bytes under a directory, creating it if needed.
///
/// Returns the path of the written file.
pub fn write_audio(dir: &Path, bytes: &[u8]) -> OratorioResult<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| IoError::new(format!("failed to create '{}': {}", dir.display(), e)))?;
    let path = dir.join(audio_file_name());
    fs::write(&path, bytes)
        .map_err(|e| IoError::new(format!("failed to write '{}': {}", path.display(), e)))?;
    Ok(path)
}
