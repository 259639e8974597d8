//! Session result persistence.
//!
//! A completed session is flushed as one JSON record named after its
//! completion time. The write goes to a temp name first and is renamed into
//! place, so a crash mid-write cannot leave a half-written record at the
//! final name. Persistence failure never touches the in-memory ratings; the
//! caller keeps them for a manual retry.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::session::Rating;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write result record: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize result record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where a session landed on disk, plus the short reference id the rater is
/// asked to cite (the record's file stem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecord {
    pub path: PathBuf,
    pub reference: String,
}

#[derive(Serialize)]
struct SessionRecord<'a> {
    ratings: BTreeMap<&'a str, &'a Rating>,
    completion_time: String,
}

/// Persist `ratings` under `results_dir`, stamped with the current local time.
pub fn persist_session(
    results_dir: &Path,
    ratings: &HashMap<String, Rating>,
) -> Result<SavedRecord, PersistError> {
    write_record_at(results_dir, ratings, Local::now())
}

/// Persistence with an explicit completion time; [`persist_session`] is the
/// production entry point.
pub fn write_record_at(
    results_dir: &Path,
    ratings: &HashMap<String, Rating>,
    completed: DateTime<Local>,
) -> Result<SavedRecord, PersistError> {
    fs::create_dir_all(results_dir)?;

    let record = SessionRecord {
        // Sorted keys keep the record diffable across sessions.
        ratings: ratings.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        completion_time: completed.to_rfc3339(),
    };
    let json = serde_json::to_string_pretty(&record)?;

    let reference = format!("evaluation_{}", completed.format("%Y%m%d_%H%M%S"));
    let final_path = results_dir.join(format!("{reference}.json"));
    let tmp_path = results_dir.join(format!("{reference}.json.tmp"));
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, &final_path)?;

    info!(
        "session record written: {} ({} ratings)",
        final_path.display(),
        ratings.len()
    );
    Ok(SavedRecord {
        path: final_path,
        reference,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/results/tests.rs"]
mod tests;
