//! Transaction record type shared across the workspace.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single statement row, validated and bucketed by month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free-text description as exported by the bank; None when blank
    pub description: Option<String>,
    /// Positive = income, negative = expense
    pub amount: f64,
    /// Month bucket, "YYYY-MM"
    pub month_key: String,
    pub year: i32,
    pub day: u32,
    /// Assigned by the categorizer; None before categorization
    pub category: Option<String>,
}

impl Transaction {
    /// Create a new Transaction; the month/year/day buckets are derived from `date`.
    pub fn new(date: NaiveDate, description: Option<String>, amount: f64) -> Self {
        Self {
            date,
            description,
            amount,
            month_key: month_key(date),
            year: date.year(),
            day: date.day(),
            category: None,
        }
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Category label for reporting; "Uncategorized" before categorization.
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .unwrap_or(crate::categorize::UNCATEGORIZED)
    }
}

/// Month bucket for a date, e.g. 2023-01-15 -> "2023-01".
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
