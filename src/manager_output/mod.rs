pub mod errors;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use crate::manager_output::errors::OutputError;

/// Writes a record as indented UTF-8 JSON, replacing whatever was at the path.
///
/// The content is first written to a uniquely named temporary file next to the target which
/// is then renamed over it, so a concurrent reader sees either the old or the new file but
/// never a partial one, and concurrent writers never share a temporary file.
/// The parent directory must already exist.
///
/// # Arguments
///
/// * 'record' - anything serializable
/// * 'path' - target file
pub fn write_json<T: Serialize + ?Sized>(record: &T, path: &Path) -> Result<(), OutputError> {
    let mut buf: Vec<u8> = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    record.serialize(&mut ser)?;

    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(&buf)?;
    tmp.persist(path).map_err(|e| OutputError::from(e.error))?;

    Ok(())
}

/// Returns the directory a file lives in, '.' for bare file names
///
/// # Arguments
///
/// * 'path' - file path
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Reads and parses a JSON file
///
/// # Arguments
///
/// * 'path' - file to read
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, OutputError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[derive(Serialize, Deserialize)]
struct AutoUpdateFile {
    auto_update: bool,
}

/// The persisted auto-update flag gating the scheduler
#[derive(Debug, Clone)]
pub struct AutoUpdateStatus {
    path: PathBuf,
}

impl AutoUpdateStatus {
    /// Creates a new AutoUpdateStatus
    ///
    /// # Arguments
    ///
    /// * 'path' - full path to the status file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the persisted flag, a missing file counts as disabled
    ///
    pub fn read(&self) -> Result<bool, OutputError> {
        if !self.path.exists() {
            return Ok(false);
        }
        let status: AutoUpdateFile = read_json(&self.path)?;

        Ok(status.auto_update)
    }

    /// Persists the flag
    ///
    /// # Arguments
    ///
    /// * 'auto_update' - new state
    pub fn write(&self, auto_update: bool) -> Result<(), OutputError> {
        write_json(&AutoUpdateFile { auto_update }, &self.path)
    }
}
