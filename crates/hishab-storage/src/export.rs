//! CSV export of a ledger snapshot.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use hishab_core::CoreError;
use hishab_domain::{Ledger, DEFAULT_CATEGORY};

/// Column order of the exported file.
pub const CSV_HEADER: [&str; 5] = ["Timestamp", "Description", "Category", "Type", "Amount"];

/// Renders the whole snapshot as UTF-8 CSV text with a leading byte-order
/// marker. Text fields are double-quoted (embedded quotes doubled), the
/// numeric amount stays unquoted, and income rows are tagged `Income`,
/// expense rows `Expense`.
pub fn export_csv(ledger: &Ledger) -> Result<String, CoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for (kind, entry) in ledger.iter_all() {
        let category = if entry.category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            entry.category.as_str()
        };
        let kind_label = kind.to_string();
        let amount = render_amount(entry.amount);
        writer
            .write_record([
                entry.timestamp.as_str(),
                entry.description.as_str(),
                category,
                kind_label.as_str(),
                amount.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let rows = writer
        .into_inner()
        .map_err(|err| CoreError::Storage(format!("csv export failed: {err}")))?;
    let rows = String::from_utf8(rows)
        .map_err(|err| CoreError::Storage(format!("csv output was not UTF-8: {err}")))?;

    let mut out = String::from("\u{feff}");
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');
    out.push_str(&rows);
    Ok(out)
}

fn render_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}

fn csv_error(err: csv::Error) -> CoreError {
    CoreError::Storage(format!("csv export failed: {err}"))
}
