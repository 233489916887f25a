//! Integrity check and format conversion commands

use std::path::{Path, PathBuf};

use crate::commands::{ExportData, Outcome, RecalculateBalances};
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::export::DataFormat;
use crate::services::LedgerService;

use super::load_ledger;

/// Check that every balance matches its operations
///
/// With `repair`, balances are recalculated and the repaired ledger is
/// written to `output` (or next to the other exports). Returns whether the
/// ledger is consistent once the command has finished.
pub fn handle_check(
    file: &Path,
    paths: &LedgerPaths,
    settings: &Settings,
    repair: bool,
    output: Option<PathBuf>,
) -> LedgerResult<bool> {
    let mut loaded = load_ledger(file)?;
    let symbol = settings.currency_symbol.as_str();

    if loaded.ledger.check_integrity() {
        println!(
            "Integrity OK: {} account(s), {} operation(s)",
            loaded.ledger.all_accounts().len(),
            loaded.ledger.all_operations().len()
        );
        return Ok(true);
    }

    println!("Integrity FAILED");
    for account in loaded.ledger.all_accounts().iter() {
        let expected = loaded.ledger.inner().expected_balance(account);
        if expected != account.balance {
            println!(
                "  {}: stored {}, expected {}",
                account.name,
                account.balance.format_with_symbol(symbol),
                expected.format_with_symbol(symbol)
            );
        }
    }

    if !repair {
        println!("Run with --repair to recalculate balances.");
        return Ok(false);
    }

    let outcome = loaded
        .session
        .run(&mut loaded.ledger, Box::new(RecalculateBalances::new()))?;
    if let Outcome::Recalculated { changed } = outcome {
        println!("Recalculated {} balance(s)", changed);
    }

    let output = match output {
        Some(path) => path,
        None => {
            paths.ensure_directories()?;
            repaired_path(paths, file)?
        }
    };
    let export = ExportData::new(&output, DataFormat::from_path(&output)?);
    loaded.session.run(&mut loaded.ledger, Box::new(export))?;
    println!("Repaired ledger written to {}", output.display());

    Ok(loaded.ledger.check_integrity())
}

/// Read `input` and write it back out as `output`
///
/// The output format is `format` if given, then the output extension, then
/// the configured default.
pub fn handle_convert(
    input: &Path,
    output: &Path,
    format: Option<DataFormat>,
    settings: &Settings,
) -> LedgerResult<()> {
    let mut loaded = load_ledger(input)?;

    let format = format
        .or_else(|| DataFormat::from_path(output).ok())
        .unwrap_or(settings.default_format);
    loaded
        .session
        .run(&mut loaded.ledger, Box::new(ExportData::new(output, format)))?;

    println!(
        "Converted {} to {} ({} account(s), {} operation(s))",
        input.display(),
        output.display(),
        loaded.ledger.all_accounts().len(),
        loaded.ledger.all_operations().len()
    );
    Ok(())
}

fn repaired_path(paths: &LedgerPaths, file: &Path) -> LedgerResult<PathBuf> {
    let format = DataFormat::from_path(file)?;
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ledger".to_string());
    Ok(paths
        .exports_dir()
        .join(format!("{}-repaired.{}", stem, format.extension())))
}
