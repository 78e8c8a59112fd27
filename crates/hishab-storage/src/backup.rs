//! JSON backup export and import.
//!
//! A backup is a pretty-printed, self-describing file: both sequences, the
//! id counter, a backup timestamp, a format-version tag, and precomputed
//! totals so a person can inspect it without re-parsing the entries.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use hishab_core::CoreError;
use hishab_domain::{Entry, Ledger};

use crate::{coerce_ledger, FORMAT_VERSION};

const BACKUP_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupFile<'a> {
    income_entries: &'a [Entry],
    expense_entries: &'a [Entry],
    next_id: u64,
    backup_date: String,
    format_version: &'static str,
    metadata: BackupMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupMetadata {
    total_transactions: usize,
    total_income: f64,
    total_expense: f64,
}

/// Serializes the snapshot into pretty-printed backup text.
pub fn export_backup(ledger: &Ledger, now: NaiveDateTime) -> Result<String, CoreError> {
    let file = BackupFile {
        income_entries: &ledger.income,
        expense_entries: &ledger.expense,
        next_id: ledger.next_id,
        backup_date: now.format(BACKUP_DATE_FORMAT).to_string(),
        format_version: FORMAT_VERSION,
        metadata: BackupMetadata {
            total_transactions: ledger.entry_count(),
            total_income: ledger.income.iter().map(|entry| entry.amount).sum(),
            total_expense: ledger.expense.iter().map(|entry| entry.amount).sum(),
        },
    };
    serde_json::to_string_pretty(&file)
        .map_err(|err| CoreError::Storage(format!("backup serialization failed: {err}")))
}

/// Parses backup text back into a ledger.
///
/// Fails with [`CoreError::Format`] when the text is not a JSON object or
/// lacks either entry sequence; a partially-applied restore would corrupt
/// the ledger, so this is the one persistence call allowed to fail whole.
/// Individual malformed fields are still coerced to defaults.
pub fn import_backup(text: &str) -> Result<Ledger, CoreError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| CoreError::Format(format!("backup is not valid JSON: {err}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| CoreError::Format("backup root must be an object".into()))?;
    if !object.contains_key("incomeEntries") || !object.contains_key("expenseEntries") {
        return Err(CoreError::Format(
            "backup is missing the income or expense entries".into(),
        ));
    }
    Ok(coerce_ledger(&value))
}
