use crate::work::{JournalRow, UnitName};
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a newline-delimited list of SKPD names.
///
/// Lines are trimmed and blank lines skipped; an empty list is an error
/// because a batch over zero units is always an operator mistake.
pub fn read_unit_list(path: &Path) -> Result<Vec<UnitName>> {
    tracing::debug!("Reading unit list from: {}", path.display());

    let content = fs::read_to_string(path)?;
    let units: Vec<UnitName> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| UnitName(line.to_string()))
        .collect();

    if units.is_empty() {
        return Err(Error::Input(format!(
            "{} contains no unit names",
            path.display()
        )));
    }

    tracing::info!("Loaded {} unit names from {}", units.len(), path.display());
    Ok(units)
}

/// Read journal rows from a CSV spreadsheet.
///
/// Expects a header row, then columns: account code, debit, credit.
/// A blank cell means "not applicable" and becomes `None`; validation of
/// whether a row is usable happens per item, not here.
pub fn read_journal_rows(path: &Path) -> Result<Vec<JournalRow>> {
    tracing::debug!("Reading journal rows from: {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize| {
            record
                .get(idx)
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        };
        rows.push(JournalRow {
            account_code: cell(0).unwrap_or_default(),
            debit: cell(1),
            credit: cell(2),
        });
    }

    if rows.is_empty() {
        return Err(Error::Input(format!(
            "{} contains no journal rows",
            path.display()
        )));
    }

    tracing::info!("Loaded {} journal rows from {}", rows.len(), path.display());
    Ok(rows)
}
