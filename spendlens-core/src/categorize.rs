//! First-match-wins keyword categorization of transaction descriptions.

use crate::mapping::CategoryMapping;
use crate::transaction::Transaction;

/// Label for descriptions that match no keyword in the mapping.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Label for transactions with no usable description.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Categorize a description against the mapping.
///
/// Categories are scanned in mapping order and keywords in list order; the
/// first keyword that is a case-insensitive substring of the description
/// wins, so reordering the mapping changes outcomes. A missing or blank
/// description short-circuits to "Uncategorized" without consulting the
/// mapping.
pub fn categorize(description: Option<&str>, mapping: &CategoryMapping) -> String {
    let desc = match description {
        Some(d) if !d.trim().is_empty() => d.to_lowercase(),
        _ => return UNCATEGORIZED.to_string(),
    };

    for entry in mapping.entries() {
        for keyword in &entry.keywords {
            if desc.contains(&keyword.to_lowercase()) {
                return entry.name.clone();
            }
        }
    }

    FALLBACK_CATEGORY.to_string()
}

/// Categorize every transaction, returning a new set with the category
/// populated; the input set is untouched.
pub fn categorize_all(transactions: &[Transaction], mapping: &CategoryMapping) -> Vec<Transaction> {
    transactions
        .iter()
        .map(|t| {
            let mut categorized = t.clone();
            categorized.category = Some(categorize(t.description.as_deref(), mapping));
            categorized
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::CategoryMapping;
    use chrono::NaiveDate;

    #[test]
    fn test_default_mapping_examples() {
        let mapping = CategoryMapping::default_mapping();
        assert_eq!(categorize(Some("GROCERY MART"), &mapping), "groceries");
        assert_eq!(categorize(Some("NETFLIX SUBSCRIPTION"), &mapping), "entertainment");
        assert_eq!(categorize(Some("SHELL GAS STATION"), &mapping), "transportation");
    }

    #[test]
    fn test_first_match_wins_across_categories() {
        // "gas" sits under transportation, which precedes utilities
        // ("gas bill") in the default scan order.
        let mapping = CategoryMapping::default_mapping();
        assert_eq!(categorize(Some("CITY GAS BILL PAYMENT"), &mapping), "transportation");
    }

    #[test]
    fn test_first_match_wins_follows_mapping_order() {
        let mut custom = CategoryMapping::default_mapping();
        assert!(custom.add_keyword("shell", "fuel stops"));
        // Appended category loses to transportation's earlier "gas" keyword.
        assert_eq!(categorize(Some("SHELL GAS STATION"), &custom), "transportation");
        // Without an earlier match the appended category is reachable.
        assert_eq!(categorize(Some("SHELL #4411"), &custom), "fuel stops");
    }

    #[test]
    fn test_missing_or_blank_description_is_uncategorized() {
        let mapping = CategoryMapping::default_mapping();
        assert_eq!(categorize(None, &mapping), UNCATEGORIZED);
        assert_eq!(categorize(Some(""), &mapping), UNCATEGORIZED);
        assert_eq!(categorize(Some("   "), &mapping), UNCATEGORIZED);
    }

    #[test]
    fn test_no_match_falls_back_to_other() {
        let mapping = CategoryMapping::default_mapping();
        assert_eq!(categorize(Some("XYZZY 123"), &mapping), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let mapping = CategoryMapping::default_mapping();
        assert_eq!(categorize(Some("starbucks #1234"), &mapping), "dining");
        assert_eq!(categorize(Some("STARBUCKS #1234"), &mapping), "dining");
    }

    #[test]
    fn test_categorize_all_is_a_pure_transform() {
        let mapping = CategoryMapping::default_mapping();
        let date = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        let original = vec![
            Transaction::new(date, Some("GROCERY MART".to_string()), -45.67),
            Transaction::new(date, None, -3.00),
        ];

        let categorized = categorize_all(&original, &mapping);

        assert_eq!(original[0].category, None);
        assert_eq!(categorized[0].category.as_deref(), Some("groceries"));
        assert_eq!(categorized[1].category.as_deref(), Some(UNCATEGORIZED));
        assert_eq!(categorized.len(), original.len());
    }
}
