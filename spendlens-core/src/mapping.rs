//! Keyword-to-category mapping: built-in default, persisted store, and edits.
//!
//! The mapping is ordered and the categorizer scans it front to back, so the
//! store is a JSON array of entries rather than an object.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// One category with its keyword list, in match order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered keyword-to-category mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CategoryMapping {
    entries: Vec<CategoryEntry>,
}

impl CategoryMapping {
    /// Built-in mapping used when no store exists.
    pub fn default_mapping() -> Self {
        let defaults: [(&str, &[&str]); 14] = [
            (
                "groceries",
                &[
                    "grocery",
                    "supermarket",
                    "food",
                    "market",
                    "walmart",
                    "trader",
                    "whole foods",
                    "safeway",
                    "kroger",
                    "aldi",
                    "costco",
                ],
            ),
            (
                "dining",
                &[
                    "restaurant",
                    "cafe",
                    "coffee",
                    "starbucks",
                    "mcdonald",
                    "burger",
                    "pizza",
                    "dining",
                    "chipotle",
                    "subway",
                    "taco",
                    "doordash",
                    "uber eats",
                    "grubhub",
                ],
            ),
            (
                "transportation",
                &[
                    "gas", "fuel", "uber", "lyft", "taxi", "bus", "train", "transit",
                    "transport", "parking", "toll", "car", "auto", "vehicle",
                ],
            ),
            (
                "utilities",
                &[
                    "electric", "water", "gas bill", "internet", "wifi", "phone", "utility",
                    "bill", "service",
                ],
            ),
            (
                "housing",
                &[
                    "rent",
                    "mortgage",
                    "apartment",
                    "housing",
                    "maintenance",
                    "repair",
                    "home",
                    "property",
                ],
            ),
            (
                "entertainment",
                &[
                    "movie",
                    "theatre",
                    "concert",
                    "event",
                    "ticket",
                    "netflix",
                    "hulu",
                    "spotify",
                    "disney",
                    "amazon prime",
                    "entertainment",
                    "game",
                ],
            ),
            (
                "shopping",
                &[
                    "amazon", "ebay", "etsy", "target", "purchase", "store", "mall", "shop",
                    "retail", "clothing", "apparel", "shoe",
                ],
            ),
            (
                "health",
                &[
                    "doctor",
                    "medical",
                    "pharmacy",
                    "healthcare",
                    "hospital",
                    "clinic",
                    "dental",
                    "medication",
                    "fitness",
                    "gym",
                    "health",
                ],
            ),
            (
                "education",
                &[
                    "tuition",
                    "school",
                    "college",
                    "university",
                    "course",
                    "class",
                    "education",
                    "book",
                    "learning",
                    "student",
                ],
            ),
            (
                "travel",
                &[
                    "hotel", "flight", "airline", "airbnb", "booking", "vacation", "travel",
                    "trip", "cruise",
                ],
            ),
            (
                "subscription",
                &["subscription", "membership", "recurring", "monthly"],
            ),
            (
                "income",
                &[
                    "salary",
                    "deposit",
                    "income",
                    "payment received",
                    "refund",
                    "tax return",
                    "dividend",
                    "interest",
                ],
            ),
            ("insurance", &["insurance", "premium", "coverage", "policy"]),
            (
                "investment",
                &[
                    "investment",
                    "stock",
                    "bond",
                    "mutual fund",
                    "etf",
                    "brokerage",
                    "wealth",
                    "retirement",
                ],
            ),
        ];

        Self {
            entries: defaults
                .into_iter()
                .map(|(name, keywords)| CategoryEntry {
                    name: name.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Categories in match order.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Add a keyword to a category, creating the category at the end of the
    /// scan order if it does not exist. Returns false if the keyword was
    /// already present under that category (no change).
    pub fn add_keyword(&mut self, keyword: &str, category: &str) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == category) {
            if entry.keywords.iter().any(|k| k == keyword) {
                return false;
            }
            entry.keywords.push(keyword.to_string());
        } else {
            self.entries.push(CategoryEntry {
                name: category.to_string(),
                keywords: vec![keyword.to_string()],
            });
        }
        true
    }
}

/// Load the mapping from `path`, falling back to the built-in default when
/// the store is missing, unreadable, or malformed. Never errors.
pub fn load_mapping(path: &Path) -> CategoryMapping {
    if !path.exists() {
        return CategoryMapping::default_mapping();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                "failed to read mapping store {}: {err}; using default mapping",
                path.display()
            );
            return CategoryMapping::default_mapping();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(mapping) => mapping,
        Err(err) => {
            warn!(
                "malformed mapping store {}: {err}; using default mapping",
                path.display()
            );
            CategoryMapping::default_mapping()
        }
    }
}

/// Persist the mapping as pretty-printed JSON, creating parent directories.
pub fn save_mapping(path: &Path, mapping: &CategoryMapping) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(mapping)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Insert `keyword` under `category` and re-persist the whole mapping.
/// Returns true when the store was written, including no-op inserts; a
/// persistence failure is reported as false rather than an error.
pub fn add_keyword_and_save(path: &Path, keyword: &str, category: &str) -> bool {
    let mut mapping = load_mapping(path);
    mapping.add_keyword(keyword, category);
    match save_mapping(path, &mapping) {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to persist mapping to {}: {err:#}", path.display());
            false
        }
    }
}
