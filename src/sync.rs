//! Removing jars that modpilot does not know about
//!
//! The set of jars to keep comes from the install records of the pack, not
//! from the declared mod list: a mod removed from the config keeps its jar
//! until its record is pruned. A pack without any records keeps nothing.

use crate::state::State;
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension of the files sync manages
pub const ARTIFACT_EXTENSION: &str = "jar";

#[derive(Debug, Default)]
pub struct SyncReport {
    /// Jars deleted (or, for a dry run, that would be deleted)
    pub removed: Vec<PathBuf>,
    /// Jars matching an install record
    pub kept: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, std::io::Error)>,
    /// False if the pack directory does not exist
    pub dir_exists: bool,
}

impl SyncReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

pub fn is_artifact(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION))
        .unwrap_or(false)
}

/// Delete every jar in `profile_dir` that no install record of `profile` names.
///
/// Only the top level of the directory is scanned. Per-file deletion
/// failures are collected in the report and do not stop the scan.
pub fn sync(state: &State, profile: &str, profile_dir: &Path, dry_run: bool) -> Result<SyncReport> {
    let mut report = SyncReport::default();
    if !profile_dir.is_dir() {
        debug!(dir = %profile_dir.display(), "pack directory missing, nothing to sync");
        return Ok(report);
    }
    report.dir_exists = true;

    let expected: BTreeSet<String> = state.expected_filenames(profile);

    for entry in WalkDir::new(profile_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(profile_dir).to_path_buf();
            Error::fs("list", path, e.into())
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_artifact(path) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if expected.contains(name.as_ref()) {
            report.kept.push(path.to_path_buf());
            continue;
        }

        if dry_run {
            report.removed.push(path.to_path_buf());
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed");
                report.removed.push(path.to_path_buf());
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "could not remove");
                report.failed.push((path.to_path_buf(), error));
            }
        }
    }

    Ok(report)
}
