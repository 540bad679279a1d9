//! Aggregate statistics over a categorized transaction set.
//!
//! Pure functions; an expense is any record with a negative amount. Every
//! aggregate reports absolute magnitudes except `total_expenses`, which
//! keeps the statement sign convention (callers take `abs` for display).

use serde::Serialize;
use spendlens_core::Transaction;
use std::collections::BTreeMap;

/// Per-category expense total with its share of overall spending.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    /// Share of total expenses, rounded to one decimal.
    pub percentage: f64,
}

fn expenses(txns: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    txns.iter().filter(|t| t.is_expense())
}

/// Signed sum of expense amounts (negative for any nonempty expense set).
pub fn total_expenses(txns: &[Transaction]) -> f64 {
    expenses(txns).map(|t| t.amount).sum()
}

/// Absolute expense totals per category, sorted descending by amount.
/// Empty expense set yields an empty list.
pub fn category_totals(txns: &[Transaction]) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for t in expenses(txns) {
        *by_category.entry(t.category_label()).or_insert(0.0) += t.abs_amount();
    }

    let total: f64 = by_category.values().sum();
    if total == 0.0 {
        return Vec::new();
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
            percentage: round1(amount / total * 100.0),
        })
        .collect();
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    totals
}

/// Category with the highest absolute spend; ("None", 0.0) with no expenses.
pub fn top_category(txns: &[Transaction]) -> (String, f64) {
    match category_totals(txns).into_iter().next() {
        Some(top) => (top.category, top.amount),
        None => ("None".to_string(), 0.0),
    }
}

/// Mean absolute expense amount; 0.0 with no expenses.
pub fn average_transaction(txns: &[Transaction]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for t in expenses(txns) {
        sum += t.abs_amount();
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Absolute expense totals per month bucket, in chronological order.
pub fn monthly_totals(txns: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for t in expenses(txns) {
        *totals.entry(t.month_key.clone()).or_insert(0.0) += t.abs_amount();
    }
    totals
}

/// Absolute expense totals per category per month; absent cells read as zero.
pub fn category_monthly_totals(txns: &[Transaction]) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut matrix: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for t in expenses(txns) {
        *matrix
            .entry(t.category_label().to_string())
            .or_default()
            .entry(t.month_key.clone())
            .or_insert(0.0) += t.abs_amount();
    }
    matrix
}

/// Percentage change between the two most recent months of spending.
///
/// Needs at least two distinct months, otherwise 0.0; a zero previous-month
/// total also yields 0.0 instead of a non-finite value.
pub fn month_over_month_change(txns: &[Transaction]) -> f64 {
    let monthly = monthly_totals(txns);
    if monthly.len() < 2 {
        return 0.0;
    }
    let mut recent = monthly.values().rev();
    let latest = recent.next().copied().unwrap_or(0.0);
    let previous = recent.next().copied().unwrap_or(0.0);
    if previous == 0.0 {
        return 0.0;
    }
    (latest - previous) / previous * 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
