//! spendlens-insights: aggregate statistics and heuristic observations over
//! categorized transaction sets.

pub mod aggregate;
pub mod generate;

pub use aggregate::{
    CategoryTotal, average_transaction, category_monthly_totals, category_totals,
    month_over_month_change, monthly_totals, top_category, total_expenses,
};
pub use generate::{MAX_INSIGHTS, generate, generate_with_rng};
