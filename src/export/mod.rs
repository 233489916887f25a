//! Export module for finledger
//!
//! Provides full ledger export and import in multiple formats:
//! - JSON: machine-readable, field-tagged
//! - CSV: sectioned, spreadsheet-compatible
//! - YAML: human-readable with a comment header

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::{read_file_required, write_file_atomic};

pub use self::csv::{export_csv, import_from_csv};
pub use json::{export_json, import_from_json, LedgerSnapshot, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_yaml, import_from_yaml};

/// Encoding of an export artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Json,
    Csv,
    Yaml,
}

impl DataFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> LedgerResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        extension.parse().map_err(|_| {
            LedgerError::Validation(format!(
                "Cannot infer export format from '{}' (expected .json, .csv or .yaml)",
                path.display()
            ))
        })
    }

    /// Canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Yaml => "yaml",
        }
    }

    /// Encode a snapshot in this format
    pub fn encode(&self, snapshot: &LedgerSnapshot) -> LedgerResult<String> {
        match self {
            Self::Json => export_json(snapshot),
            Self::Csv => export_csv(snapshot),
            Self::Yaml => export_yaml(snapshot),
        }
    }

    /// Decode a snapshot in this format (no validation)
    pub fn decode(&self, content: &str) -> LedgerResult<LedgerSnapshot> {
        match self {
            Self::Json => import_from_json(content),
            Self::Csv => import_from_csv(content),
            Self::Yaml => import_from_yaml(content),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for DataFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(LedgerError::Validation(format!(
                "Unknown format '{}' (expected json, csv or yaml)",
                other
            ))),
        }
    }
}

/// Encode a snapshot and write it atomically
pub fn write_snapshot(path: &Path, format: DataFormat, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
    let content = format.encode(snapshot)?;
    write_file_atomic(path, content.as_bytes())
}

/// Read, decode and validate a snapshot
///
/// Fails with `NotFound` when the file does not exist and with `Import` when
/// it does not decode or does not validate.
pub fn read_snapshot(path: &Path, format: DataFormat) -> LedgerResult<LedgerSnapshot> {
    let content = read_file_required(path)?;
    let snapshot = format.decode(&content)?;
    snapshot.validate().map_err(LedgerError::Import)?;
    Ok(snapshot)
}
