//! Validated CRUD helpers for ledger entries.

use hishab_domain::{timestamp, Entry, EntryKind, Ledger, DEFAULT_CATEGORY};

use crate::error::CoreError;
use crate::time::Clock;

/// Provides validated mutation helpers for [`Ledger`] instances.
///
/// Every multi-field mutation validates all fields before applying any of
/// them, so a failure never leaves the ledger partially mutated and never
/// consumes an id.
pub struct EntryService;

impl EntryService {
    /// Validates the input, assigns the next id, stamps the current time,
    /// appends to the requested sequence, and returns a copy of the entry.
    pub fn add(
        ledger: &mut Ledger,
        kind: EntryKind,
        description: &str,
        amount: f64,
        category: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<Entry, CoreError> {
        let description = validate(description, amount)?;
        let entry = Entry::new(
            ledger.allocate_id(),
            timestamp::render(clock.now()),
            description,
            normalize_category(category),
            amount,
        );
        ledger.push(kind, entry.clone());
        Ok(entry)
    }

    /// Updates description, amount, and category of an existing entry.
    /// Id and timestamp are immutable; the original timestamp is preserved.
    pub fn edit(
        ledger: &mut Ledger,
        kind: EntryKind,
        id: u64,
        description: &str,
        amount: f64,
        category: Option<&str>,
    ) -> Result<Entry, CoreError> {
        let description = validate(description, amount)?;
        let category = normalize_category(category);
        let entry = ledger
            .entry_mut(kind, id)
            .ok_or(CoreError::EntryNotFound(id))?;
        entry.description = description;
        entry.amount = amount;
        entry.category = category;
        Ok(entry.clone())
    }

    /// Removes the entry with the given id, reporting whether one existed.
    pub fn remove(ledger: &mut Ledger, kind: EntryKind, id: u64) -> bool {
        ledger.remove(kind, id)
    }

    /// Empties the ledger and rewinds the id counter.
    pub fn reset(ledger: &mut Ledger) {
        ledger.reset();
    }
}

fn validate(description: &str, amount: f64) -> Result<String, CoreError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("description must not be empty".into()));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(
            "amount must be a positive number".into(),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}
