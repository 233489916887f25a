//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the command layer. Every handler
//! loads a snapshot file into a fresh cached ledger through [`ImportData`]
//! and works on that in-memory copy.

pub mod data;
pub mod report;

use std::path::Path;

use clap::ValueEnum;

use crate::commands::{ImportData, Outcome, Session, Timed};
use crate::error::LedgerResult;
use crate::export::DataFormat;
use crate::services::{CachedLedger, Ledger};

pub use data::{handle_check, handle_convert};
pub use report::{handle_analytics, handle_summary, ReportKind};

/// File format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Full snapshot as JSON
    Json,
    /// Sectioned CSV
    Csv,
    /// Full snapshot as YAML
    Yaml,
}

impl From<FormatArg> for DataFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => DataFormat::Json,
            FormatArg::Csv => DataFormat::Csv,
            FormatArg::Yaml => DataFormat::Yaml,
        }
    }
}

/// A ledger loaded from a file, with the session that loaded it
pub struct LoadedLedger {
    pub ledger: CachedLedger<Ledger>,
    pub session: Session,
}

/// Import `path` into an empty ledger
///
/// The format comes from the file extension.
pub fn load_ledger(path: &Path) -> LedgerResult<LoadedLedger> {
    let mut ledger = CachedLedger::new(Ledger::new());
    let mut session = Session::new();

    let import = Timed::new(ImportData::infer(path)?);
    if let Outcome::Imported(counts) = session.run(&mut ledger, Box::new(import))? {
        if counts.uncategorized_operations > 0 {
            eprintln!(
                "Note: {} operation(s) reference categories missing from the file",
                counts.uncategorized_operations
            );
        }
    }

    Ok(LoadedLedger { ledger, session })
}
