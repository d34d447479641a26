use crate::metadata::TagStore;
use crate::ordering;
use crate::tagging;
use crate::utils;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

/// Result of processing one file, or one directory that could not be listed.
#[derive(Debug)]
pub struct EntryOutcome {
    pub path: PathBuf,
    /// Track index given to the file; `None` for directories.
    pub track: Option<u32>,
    pub result: Result<()>,
}

impl EntryOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a whole run, in visit order.
#[derive(Debug, Default)]
pub struct WalkReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl WalkReport {
    pub fn tagged(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.tagged()
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }
}

/// Tag every file below `root`.
pub fn tag_tree<S: TagStore>(root: &Path, store: &S) -> WalkReport {
    WalkReport {
        outcomes: visit_directory(root, store),
    }
}

/// Immediate children of `dir`, ordered by track sort key.
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry =
            entry.with_context(|| format!("Failed to list directory '{}'", dir.display()))?;
        entries.push(entry.into_path());
    }

    ordering::sort_entries(&mut entries, |path| {
        utils::file_name(path).unwrap_or_default()
    });
    Ok(entries)
}

/// Tag the files of `dir` and recurse into its subdirectories.
///
/// Files are numbered 1, 2, ... in sort order; subdirectories take no number
/// and restart numbering for their own files. A failure is logged and
/// recorded, and the walk moves on to the next entry.
pub fn visit_directory<S: TagStore>(dir: &Path, store: &S) -> Vec<EntryOutcome> {
    info!("Processing directory [{}]", dir.display());

    let entries = match list_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Error processing directory [{}]: {:#}", dir.display(), e);
            return vec![EntryOutcome {
                path: dir.to_path_buf(),
                track: None,
                result: Err(e),
            }];
        }
    };

    let mut outcomes = Vec::new();
    let mut track = 0;
    for path in entries {
        if path.is_dir() {
            outcomes.extend(visit_directory(&path, store));
            continue;
        }

        track += 1;
        let result = tagging::apply_tags(&path, track, store).map(|_| ());
        if let Err(e) = &result {
            error!("Error processing file [{}]: {:#}", path.display(), e);
        }
        outcomes.push(EntryOutcome {
            path,
            track: Some(track),
            result,
        });
    }

    info!("Finished directory [{}]", dir.display());
    outcomes
}
