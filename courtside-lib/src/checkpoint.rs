//! Checkpoint file naming, discovery and archival.
//!
//! Checkpoint names are shared with runs that were interrupted part-way, so
//! they must stay exactly as written here:
//!
//! - `<prefix>_<category>_chunk_<n>.csv`
//! - `<prefix>_<category>_retried.csv`
//! - `<prefix>_<category>_rerun_chunk_<n>.csv` / `..._rerun_retried.csv`

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::PipelineError;

/// Where one pipeline's checkpoints live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointLayout {
    dir: PathBuf,
    prefix: Option<String>,
    rerun: bool,
}

impl CheckpointLayout {
    /// Main-pass layout in `dir`. An empty prefix drops the leading segment
    /// (`schedule_chunk_1.csv`).
    pub fn new(dir: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
            rerun: false,
        }
    }

    /// The same naming with the `_rerun` marker.
    pub fn rerun(mut self) -> Self {
        self.rerun = true;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_rerun(&self) -> bool {
        self.rerun
    }

    fn stem(&self, category: &str) -> String {
        let mut stem = match &self.prefix {
            Some(prefix) => format!("{prefix}_{category}"),
            None => category.to_string(),
        };
        if self.rerun {
            stem.push_str("_rerun");
        }
        stem
    }

    /// Checkpoint for batch `index` (1-based).
    pub fn chunk_path(&self, category: &str, index: usize) -> PathBuf {
        self.dir
            .join(format!("{}_chunk_{index}.csv", self.stem(category)))
    }

    /// Checkpoint for the deferred pass.
    pub fn retried_path(&self, category: &str) -> PathBuf {
        self.dir.join(format!("{}_retried.csv", self.stem(category)))
    }

    /// Main-pass checkpoints for `category`, ordered by batch index.
    ///
    /// A missing directory yields an empty list.
    pub fn chunk_files(&self, category: &str) -> Result<Vec<PathBuf>, PipelineError> {
        let marker = format!("{}_chunk_", self.stem(category));
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let index = name
                .strip_prefix(&marker)
                .and_then(|rest| rest.strip_suffix(".csv"))
                .and_then(|n| n.parse::<usize>().ok());
            if let Some(index) = index {
                if entry.file_type()?.is_file() {
                    found.push((index, entry.path()));
                }
            }
        }
        found.sort();
        Ok(found.into_iter().map(|(_, path)| path).collect())
    }

    /// Main-pass checkpoints followed by the retried file, if present.
    pub fn all_files(&self, category: &str) -> Result<Vec<PathBuf>, PipelineError> {
        let mut files = self.chunk_files(category)?;
        let retried = self.retried_path(category);
        if retried.is_file() {
            files.push(retried);
        }
        Ok(files)
    }

    /// Timestamped archive folder for checkpoints consumed at `now`.
    pub fn archive_dir(&self, now: DateTime<Local>) -> PathBuf {
        let mut name = now.format("%Y%m%d_%H%M%S").to_string();
        if self.rerun {
            name.push_str("_rerun");
        }
        self.dir.join(name)
    }
}

/// Move `files` into `dest`, creating it if needed.
///
/// A file that cannot be moved is logged and left in place; the rest are
/// still moved. Returns the number of files moved.
pub fn move_files(files: &[PathBuf], dest: &Path) -> Result<usize, PipelineError> {
    std::fs::create_dir_all(dest)?;
    let mut moved = 0;
    for file in files {
        let Some(name) = file.file_name() else {
            continue;
        };
        match std::fs::rename(file, dest.join(name)) {
            Ok(()) => {
                log::debug!("Moved {} to {}", file.display(), dest.display());
                moved += 1;
            }
            Err(e) => log::error!("Error moving {}: {}", file.display(), e),
        }
    }
    Ok(moved)
}
