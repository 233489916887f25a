//! YAML encoding
//!
//! Same record as the JSON export, preceded by a comment header.

use std::fmt::Write;

use crate::error::{LedgerError, LedgerResult};

use super::json::LedgerSnapshot;

/// Encode a snapshot as YAML
pub fn export_yaml(snapshot: &LedgerSnapshot) -> LedgerResult<String> {
    let mut out = String::new();
    let header_error = |e: std::fmt::Error| LedgerError::Export(e.to_string());

    writeln!(out, "# Finledger Export").map_err(header_error)?;
    writeln!(out, "# Generated: {}", snapshot.export_date.to_rfc3339()).map_err(header_error)?;
    writeln!(out, "# Version: {}", snapshot.version).map_err(header_error)?;
    writeln!(out).map_err(header_error)?;

    let body = serde_yaml::to_string(snapshot).map_err(|e| LedgerError::Export(e.to_string()))?;
    out.push_str(&body);
    Ok(out)
}

/// Decode a snapshot from YAML
pub fn import_from_yaml(yaml_str: &str) -> LedgerResult<LedgerSnapshot> {
    serde_yaml::from_str(yaml_str).map_err(|e| LedgerError::Import(e.to_string()))
}
