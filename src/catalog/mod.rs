//! Sample catalog loading.
//!
//! Scans a corpus root laid out as `category/sample_group/{asset}` and builds
//! the immutable list of valid [`Sample`]s for one evaluation session. A group
//! contributes one Sample per reverberant variant whose asset exists alongside
//! the dry asset, so a group may yield zero, one, or two Samples.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub mod prompts;

use prompts::default_prompt;

pub const DRY_ASSET: &str = "anechoic.wav";
pub const GENERATED_ASSET: &str = "generated_reverb.wav";
pub const REFERENCE_ASSET: &str = "ground_truth_reverb.wav";
pub const PROMPT_ASSET: &str = "text_prompt.txt";

/// Which reverberant variant a Sample presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Generated,
    Reference,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Generated => "generated",
            Condition::Reference => "reference",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stimulus pairing: dry audio plus one reverberant variant plus the
/// descriptive text shown to the rater. Immutable once constructed; only
/// emitted when both audio references resolve.
#[derive(Debug, Clone)]
pub struct Sample {
    pub id: String,
    pub category: String,
    pub condition: Condition,
    pub text_prompt: String,
    pub dry_audio: PathBuf,
    pub wet_audio: PathBuf,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error while scanning corpus: {0}")]
    Io(#[from] std::io::Error),
}

/// Scan the corpus root and return every valid Sample, ordered by discovery
/// (category name, then group name, generated variant before reference).
///
/// A missing root is not fatal: the session must still initialize cleanly
/// with zero samples, so it degrades to an empty catalog with a warning.
pub fn load_catalog(root: &Path) -> Result<Vec<Sample>, CatalogError> {
    if !root.is_dir() {
        warn!("corpus root not found: {}", root.display());
        return Ok(Vec::new());
    }

    let mut samples = Vec::new();
    for category_dir in sorted_subdirs(root)? {
        let category = dir_name(&category_dir);
        for group_dir in sorted_subdirs(&category_dir)? {
            let group = dir_name(&group_dir);
            samples.extend(scan_group(&group_dir, &category, &group));
        }
    }

    if samples.is_empty() {
        warn!(
            "no valid evaluation samples found under {}",
            root.display()
        );
    } else {
        info!(
            "discovered {} evaluation samples under {}",
            samples.len(),
            root.display()
        );
    }
    Ok(samples)
}

fn scan_group(group_dir: &Path, category: &str, group: &str) -> Vec<Sample> {
    let dry = group_dir.join(DRY_ASSET);
    if !dry.is_file() {
        return Vec::new();
    }

    let variants = [
        (Condition::Generated, group_dir.join(GENERATED_ASSET)),
        (Condition::Reference, group_dir.join(REFERENCE_ASSET)),
    ];

    let text_prompt = resolve_prompt(group_dir, category, group);
    let mut out = Vec::new();
    for (condition, wet) in variants {
        if !wet.is_file() {
            continue;
        }
        out.push(Sample {
            id: format!("{category}_{group}_{condition}"),
            category: category.to_string(),
            condition,
            text_prompt: text_prompt.clone(),
            dry_audio: dry.clone(),
            wet_audio: wet,
        });
    }
    out
}

/// Authored prompt file wins; otherwise the built-in default for the group's
/// numeric position within its category.
fn resolve_prompt(group_dir: &Path, category: &str, group: &str) -> String {
    let authored = group_dir.join(PROMPT_ASSET);
    if let Ok(text) = fs::read_to_string(&authored) {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    default_prompt(category, group_position(group))
}

/// Numeric position from a trailing `_N` group-name suffix. Groups without a
/// suffix, or with a non-numeric one, map to position 0. This conflates "no
/// suffix" with "first sample"; kept intentionally to match existing corpora.
pub fn group_position(group: &str) -> usize {
    match group.rsplit_once('_') {
        Some((_, tail)) => tail.parse().unwrap_or(0),
        None => 0,
    }
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Stray files at either level are skipped, not errors.
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/src_inline/catalog/tests.rs"]
mod tests;
