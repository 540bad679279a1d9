use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn spendlens_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendlens"))
}

pub fn ensure_spendlens_home() -> Result<PathBuf> {
    let dir = spendlens_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Default location of the keyword-to-category mapping store.
pub fn mapping_store_path() -> Result<PathBuf> {
    Ok(ensure_spendlens_home()?.join("category_mapping.json"))
}
