//! File I/O utilities with atomic writes
//!
//! Export artifacts are written to a temp file and renamed into place so a
//! failed export never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::LedgerError;

/// Read a whole file, failing with `NotFound` if it does not exist
pub fn read_file_required<P: AsRef<Path>>(path: P) -> Result<String, LedgerError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LedgerError::file_not_found(path.display().to_string()));
    }

    fs::read_to_string(path)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all.
pub fn write_file_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), LedgerError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| LedgerError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Remove a file if it exists; returns whether a file was removed
pub fn remove_file_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, LedgerError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path)
        .map_err(|e| LedgerError::Io(format!("Failed to remove {}: {}", path.display(), e)))?;
    Ok(true)
}
