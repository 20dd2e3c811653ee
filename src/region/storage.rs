use super::types::{FirmRecord, Region};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load region snapshots from a JSON or YAML file.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
/// Regions repeating an earlier key are dropped (first occurrence wins).
pub fn load_regions(path: &Path) -> Result<Vec<Region>> {
    let regions: Vec<Region> = load_list(path)?;
    let total = regions.len();

    let mut seen_keys = HashSet::new();
    let unique: Vec<Region> = regions
        .into_iter()
        .filter(|region| seen_keys.insert(region.key.clone()))
        .collect();

    if unique.len() != total {
        tracing::warn!(
            path = %path.display(),
            dropped = total - unique.len(),
            "dropped regions with duplicate keys"
        );
    }
    tracing::debug!(path = %path.display(), count = unique.len(), "loaded regions");

    Ok(unique)
}

/// Load firm records for batch valuation from a JSON or YAML file.
pub fn load_firms(path: &Path) -> Result<Vec<FirmRecord>> {
    let firms: Vec<FirmRecord> = load_list(path)?;
    tracing::debug!(path = %path.display(), count = firms.len(), "loaded firms");
    Ok(firms)
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse input: invalid JSON in {}", path.display()))
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse input: invalid YAML in {}", path.display()))
    }
}
