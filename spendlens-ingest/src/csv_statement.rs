//! Parse a bank statement CSV export into typed transactions.
//!
//! Expected named columns, in any order (extra columns are ignored):
//! Date,Description,Amount
//!
//! Negative amounts are expenses, positive amounts income. Rows whose date
//! or amount fails to parse are dropped; a missing required column is a
//! validation error.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use regex::Regex;
use spendlens_core::Transaction;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Description", "Amount"];

// %m/%d/%y must precede %m/%d/%Y: %Y happily reads "23" as year 23 AD.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a statement CSV file, returning all valid transactions.
pub fn parse_statement_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_statement_reader(file)
}

/// Parse statement CSV data from any reader.
pub fn parse_statement_reader<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header row")?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        bail!("The CSV file is empty.");
    }

    let mut indices = [0usize; 3];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = match headers.iter().position(|h| h.eq_ignore_ascii_case(name)) {
            Some(idx) => idx,
            None => bail!("Required column '{name}' is missing from the CSV file."),
        };
    }
    let [date_idx, desc_idx, amount_idx] = indices;

    let amount_junk = Regex::new(r"[$,\s]")?;

    let mut txns = Vec::new();
    let mut dropped = 0usize;

    for record in rdr.records() {
        let record = record.context("Error parsing the CSV file. Please check the format.")?;

        let Some(date) = record.get(date_idx).and_then(parse_date) else {
            dropped += 1;
            continue;
        };
        let Some(amount) = record
            .get(amount_idx)
            .and_then(|raw| parse_amount(&amount_junk, raw))
        else {
            dropped += 1;
            continue;
        };

        let description = record
            .get(desc_idx)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        txns.push(Transaction::new(date, description, amount));
    }

    if dropped > 0 {
        debug!("dropped {dropped} rows with unparseable date or amount");
    }

    Ok(txns)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Normalize "$1,234.56"-style amounts; "(45.67)" reads as -45.67.
fn parse_amount(junk: &Regex, raw: &str) -> Option<f64> {
    let cleaned = junk.replace_all(raw.trim(), "");
    let (digits, negate) = match cleaned
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (cleaned.as_ref(), false),
    };
    let value: f64 = digits.parse().ok()?;
    Some(if negate { -value } else { value })
}
