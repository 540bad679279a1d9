use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use spendlens_core::{Transaction, add_keyword_and_save, categorize_all, load_mapping};
use spendlens_ingest::parse_statement_csv;
use spendlens_insights::{aggregate, generate};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod config;
mod state;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPENDLENS_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "spendlens",
    version = VERSION,
    about = "Categorize bank statement exports and surface spending insights"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Categorize a statement CSV and print spending summaries
    Analyze {
        /// Path to the statement CSV (Date, Description, Amount columns)
        #[arg(long)]
        csv: PathBuf,

        /// Category mapping file (defaults to the configured store)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },

    /// Print up to five observations about spending patterns
    Insights {
        /// Path to the statement CSV (Date, Description, Amount columns)
        #[arg(long)]
        csv: PathBuf,

        /// Category mapping file (defaults to the configured store)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },

    /// Inspect or edit the keyword-to-category mapping
    Categories {
        #[command(subcommand)]
        command: CategoriesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CategoriesCommand {
    /// List categories and their keywords in match order
    List {
        /// Category mapping file (defaults to the configured store)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },

    /// Add a keyword to a category (created if absent) and persist the mapping
    AddKeyword {
        /// Keyword to match against transaction descriptions
        #[arg(long)]
        keyword: String,

        /// Category the keyword should map to
        #[arg(long)]
        category: String,

        /// Category mapping file (defaults to the configured store)
        #[arg(long)]
        mapping: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logger(LevelFilter::WARN);
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { csv, mapping } => analyze(&csv, mapping),
        Command::Insights { csv, mapping } => insights(&csv, mapping),
        Command::Categories { command } => match command {
            CategoriesCommand::List { mapping } => list_categories(mapping),
            CategoriesCommand::AddKeyword {
                keyword,
                category,
                mapping,
            } => add_keyword(&keyword, &category, mapping),
        },
    }
}

fn analyze(csv: &Path, mapping: Option<PathBuf>) -> Result<()> {
    let txns = load_categorized(csv, mapping)?;
    println!("Parsed {} transactions from {}", txns.len(), csv.display());

    let total = aggregate::total_expenses(&txns);
    let (top_name, top_amount) = aggregate::top_category(&txns);
    println!();
    println!("Total expenses: ${:.2}", total.abs());
    println!(
        "Average transaction: ${:.2}",
        aggregate::average_transaction(&txns)
    );
    println!("Top category: {} (${:.2})", top_name, top_amount);
    println!(
        "Month-over-month change: {:+.1}%",
        aggregate::month_over_month_change(&txns)
    );

    let totals = aggregate::category_totals(&txns);
    if !totals.is_empty() {
        println!("\nBy category:");
        for t in &totals {
            println!("  {:<16} ${:>10.2}  {:>5.1}%", t.category, t.amount, t.percentage);
        }
    }

    let monthly = aggregate::monthly_totals(&txns);
    if !monthly.is_empty() {
        println!("\nBy month:");
        for (month, amount) in &monthly {
            println!("  {month}  ${amount:.2}");
        }
    }

    Ok(())
}

fn insights(csv: &Path, mapping: Option<PathBuf>) -> Result<()> {
    let txns = load_categorized(csv, mapping)?;
    for line in generate(&txns) {
        println!("{line}");
    }
    Ok(())
}

fn list_categories(mapping: Option<PathBuf>) -> Result<()> {
    let mapping = load_mapping(&mapping_path(mapping)?);
    for entry in mapping.entries() {
        println!("{}: {}", entry.name, entry.keywords.join(", "));
    }
    Ok(())
}

fn add_keyword(keyword: &str, category: &str, mapping: Option<PathBuf>) -> Result<()> {
    let path = mapping_path(mapping)?;
    if add_keyword_and_save(&path, keyword, category) {
        println!("Added '{keyword}' to {category} ({})", path.display());
        Ok(())
    } else {
        bail!("Failed to update {}", path.display());
    }
}

/// Parse and categorize a statement in one go.
fn load_categorized(csv: &Path, mapping: Option<PathBuf>) -> Result<Vec<Transaction>> {
    if !csv.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv.display());
    }
    let mapping = load_mapping(&mapping_path(mapping)?);
    let txns =
        parse_statement_csv(csv).with_context(|| format!("parsing {}", csv.display()))?;
    Ok(categorize_all(&txns, &mapping))
}

/// Mapping store location: --mapping flag, then config.toml, then the default.
fn mapping_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    let cfg = config::load_config()?;
    if let Some(path) = cfg.mapping_file {
        return Ok(path);
    }
    state::mapping_store_path()
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "spendlens_cli={level},spendlens_core={level},spendlens_ingest={level},spendlens_insights={level}"
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
