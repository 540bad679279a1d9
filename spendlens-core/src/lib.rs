//! spendlens-core: transaction records, the keyword-to-category mapping, and the categorizer.

pub mod categorize;
pub mod mapping;
pub mod transaction;

pub use categorize::{FALLBACK_CATEGORY, UNCATEGORIZED, categorize, categorize_all};
pub use mapping::{
    CategoryEntry, CategoryMapping, add_keyword_and_save, load_mapping, save_mapping,
};
pub use transaction::{Transaction, month_key};
