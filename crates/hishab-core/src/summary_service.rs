//! Derived figures over a ledger snapshot.
//!
//! Every operation is a pure, deterministic function of a snapshot plus an
//! injected reference date, so dashboards are reproducible in tests. A
//! malformed timestamp excludes that record from date-filtered results and
//! never aborts an aggregate.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use hishab_domain::{Entry, EntryKind, Ledger, DEFAULT_CATEGORY};

/// Whole-ledger totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub count: usize,
}

/// Figures for a single calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayActivity {
    pub income: f64,
    pub expense: f64,
    pub count: usize,
}

/// Figures for a single calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotals {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// One row of the expense category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Mean entry amounts per kind, `0.0` for empty sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Averages {
    pub income: f64,
    pub expense: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums both sequences; `balance = income - expense`.
    pub fn totals(ledger: &Ledger) -> Totals {
        let income = sum(&ledger.income);
        let expense = sum(&ledger.expense);
        Totals {
            income,
            expense,
            balance: income - expense,
            count: ledger.entry_count(),
        }
    }

    /// Income/expense recorded on exactly `day`, by parsed date equality.
    pub fn day_activity(ledger: &Ledger, day: NaiveDate) -> DayActivity {
        let on_day = |entry: &&Entry| entry.day() == Some(day);
        let income: Vec<&Entry> = ledger.income.iter().filter(on_day).collect();
        let expense: Vec<&Entry> = ledger.expense.iter().filter(on_day).collect();
        DayActivity {
            income: income.iter().map(|entry| entry.amount).sum(),
            expense: expense.iter().map(|entry| entry.amount).sum(),
            count: income.len() + expense.len(),
        }
    }

    /// Sums for the given 1-based month and year. Entries whose timestamps
    /// do not parse are excluded.
    pub fn month_totals(ledger: &Ledger, month: u32, year: i32) -> MonthTotals {
        let income = sum_in_month(&ledger.income, month, year);
        let expense = sum_in_month(&ledger.expense, month, year);
        MonthTotals {
            income,
            expense,
            net: income - expense,
        }
    }

    /// Per-category expense totals, descending by amount, each annotated
    /// with its share of the expense total. Empty when there is no expense.
    pub fn category_breakdown(ledger: &Ledger) -> Vec<CategoryShare> {
        let mut per_category: HashMap<String, f64> = HashMap::new();
        for entry in &ledger.expense {
            let key = if entry.category.trim().is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                entry.category.clone()
            };
            *per_category.entry(key).or_insert(0.0) += entry.amount;
        }

        let total: f64 = per_category.values().sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut shares: Vec<CategoryShare> = per_category
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percentage: amount / total * 100.0,
            })
            .collect();
        shares.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
        shares
    }

    /// Newest entries across both kinds, sorted by parsed timestamp
    /// descending with insertion order breaking ties. Entries whose
    /// timestamps do not parse are excluded.
    pub fn recent(ledger: &Ledger, limit: usize) -> Vec<(EntryKind, Entry)> {
        let mut tagged: Vec<(EntryKind, Entry, chrono::NaiveDateTime)> = ledger
            .iter_all()
            .filter_map(|(kind, entry)| entry.moment().map(|moment| (kind, entry.clone(), moment)))
            .collect();
        // sort_by is stable, so equal timestamps keep insertion order
        tagged.sort_by(|a, b| b.2.cmp(&a.2));
        tagged.truncate(limit);
        tagged
            .into_iter()
            .map(|(kind, entry, _)| (kind, entry))
            .collect()
    }

    /// Percent change of income for the given month against the preceding
    /// calendar month. Exactly `0.0` when last month's income is zero.
    pub fn month_over_month_change(ledger: &Ledger, month: u32, year: i32) -> f64 {
        let (last_month, last_year) = if month == 1 {
            (12, year - 1)
        } else {
            (month - 1, year)
        };
        let this_income = sum_in_month(&ledger.income, month, year);
        let last_income = sum_in_month(&ledger.income, last_month, last_year);
        if last_income <= 0.0 {
            return 0.0;
        }
        (this_income - last_income) / last_income * 100.0
    }

    /// Mean entry amount per kind.
    pub fn averages(ledger: &Ledger) -> Averages {
        Averages {
            income: mean(&ledger.income),
            expense: mean(&ledger.expense),
        }
    }
}

fn sum(entries: &[Entry]) -> f64 {
    entries.iter().map(|entry| entry.amount).sum()
}

fn mean(entries: &[Entry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    sum(entries) / entries.len() as f64
}

fn sum_in_month(entries: &[Entry], month: u32, year: i32) -> f64 {
    entries
        .iter()
        .filter(|entry| {
            entry
                .day()
                .map(|day| day.month() == month && day.year() == year)
                .unwrap_or(false)
        })
        .map(|entry| entry.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, timestamp: &str, category: &str, amount: f64) -> Entry {
        Entry::new(id, timestamp.into(), format!("entry {id}"), category, amount)
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.push(EntryKind::Income, entry(1, "30/08/2022 - 10:30 AM", "Sales", 70000.0));
        ledger.push(EntryKind::Income, entry(2, "05/09/2022 - 02:15 PM", "Sales", 60000.0));
        ledger.push(EntryKind::Expense, entry(3, "30/08/2022 - 11:00 AM", "Rent", 2200.0));
        ledger.push(EntryKind::Expense, entry(4, "15/09/2022 - 03:30 PM", "Utilities", 4600.0));
        ledger.next_id = 5;
        ledger
    }

    #[test]
    fn totals_reflect_both_sequences() {
        let totals = SummaryService::totals(&sample_ledger());
        assert_eq!(totals.income, 130000.0);
        assert_eq!(totals.expense, 6800.0);
        assert_eq!(totals.balance, 123200.0);
        assert_eq!(totals.count, 4);
    }

    #[test]
    fn single_day_scenario_matches_expected_figures() {
        let mut ledger = Ledger::new();
        ledger.push(EntryKind::Income, entry(1, "30/08/2022 - 10:30 AM", "Sales", 70000.0));
        ledger.push(EntryKind::Expense, entry(2, "30/08/2022 - 11:00 AM", "Rent", 2200.0));

        let totals = SummaryService::totals(&ledger);
        assert_eq!(totals.income, 70000.0);
        assert_eq!(totals.expense, 2200.0);
        assert_eq!(totals.balance, 67800.0);
        assert_eq!(totals.count, 2);
    }

    #[test]
    fn day_activity_matches_by_exact_date() {
        let day = NaiveDate::from_ymd_opt(2022, 8, 30).unwrap();
        let activity = SummaryService::day_activity(&sample_ledger(), day);
        assert_eq!(activity.income, 70000.0);
        assert_eq!(activity.expense, 2200.0);
        assert_eq!(activity.count, 2);

        let other = NaiveDate::from_ymd_opt(2022, 8, 31).unwrap();
        assert_eq!(SummaryService::day_activity(&sample_ledger(), other).count, 0);
    }

    #[test]
    fn month_totals_bucket_by_parsed_month_and_year() {
        let september = SummaryService::month_totals(&sample_ledger(), 9, 2022);
        assert_eq!(september.income, 60000.0);
        assert_eq!(september.expense, 4600.0);
        assert_eq!(september.net, 55400.0);
    }

    #[test]
    fn malformed_timestamp_excludes_only_that_record() {
        let mut ledger = sample_ledger();
        ledger.push(EntryKind::Income, entry(9, "not-a-date", "Sales", 99999.0));

        let september = SummaryService::month_totals(&ledger, 9, 2022);
        assert_eq!(september.income, 60000.0);
        let totals = SummaryService::totals(&ledger);
        assert_eq!(totals.income, 229999.0);
    }

    #[test]
    fn category_breakdown_sorts_descending_and_sums_to_hundred() {
        let mut ledger = sample_ledger();
        ledger.push(EntryKind::Expense, entry(5, "16/09/2022 - 09:00 AM", "Rent", 3000.0));
        ledger.push(EntryKind::Expense, entry(6, "17/09/2022 - 09:00 AM", "", 1000.0));

        let shares = SummaryService::category_breakdown(&ledger);
        assert_eq!(shares[0].category, "Rent");
        assert_eq!(shares[0].amount, 5200.0);
        assert!(shares.iter().any(|share| share.category == DEFAULT_CATEGORY));

        let percentage_sum: f64 = shares.iter().map(|share| share.percentage).sum();
        assert!((percentage_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn category_breakdown_is_empty_without_expenses() {
        let mut ledger = Ledger::new();
        ledger.push(EntryKind::Income, entry(1, "30/08/2022 - 10:30 AM", "Sales", 70000.0));
        assert!(SummaryService::category_breakdown(&ledger).is_empty());
    }

    #[test]
    fn recent_returns_newest_first_with_stable_ties() {
        let mut ledger = sample_ledger();
        // same moment as entry 3; insertion order must break the tie
        ledger.push(EntryKind::Expense, entry(7, "30/08/2022 - 11:00 AM", "Rent", 500.0));
        ledger.push(EntryKind::Income, entry(8, "bad timestamp", "Sales", 1.0));

        let recent = SummaryService::recent(&ledger, 10);
        let ids: Vec<u64> = recent.iter().map(|(_, entry)| entry.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 7, 1]);

        let limited = SummaryService::recent(&ledger, 2);
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].1.id, 4);
    }

    #[test]
    fn month_over_month_change_is_zero_when_last_month_was_empty() {
        let mut ledger = Ledger::new();
        ledger.push(EntryKind::Income, entry(1, "05/09/2022 - 02:15 PM", "Sales", 60000.0));
        assert_eq!(SummaryService::month_over_month_change(&ledger, 9, 2022), 0.0);
    }

    #[test]
    fn month_over_month_change_crosses_year_boundaries() {
        let mut ledger = Ledger::new();
        ledger.push(EntryKind::Income, entry(1, "15/12/2022 - 10:00 AM", "Sales", 1000.0));
        ledger.push(EntryKind::Income, entry(2, "15/01/2023 - 10:00 AM", "Sales", 1500.0));
        let change = SummaryService::month_over_month_change(&ledger, 1, 2023);
        assert!((change - 50.0).abs() < 1e-9);
    }

    #[test]
    fn averages_are_zero_for_empty_sequences() {
        let averages = SummaryService::averages(&Ledger::new());
        assert_eq!(averages.income, 0.0);
        assert_eq!(averages.expense, 0.0);

        let averages = SummaryService::averages(&sample_ledger());
        assert_eq!(averages.income, 65000.0);
        assert_eq!(averages.expense, 3400.0);
    }
}
