//! Merging checkpoints into one file per category, then archiving them.

use std::path::{Path, PathBuf};

use chrono::Local;
use courtside_core::Table;

use crate::checkpoint::{CheckpointLayout, move_files};

/// Result of consolidating one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consolidation {
    pub category: String,
    /// Output file, if one was written.
    pub output: Option<PathBuf>,
    pub rows: usize,
    /// Every checkpoint found for the category.
    pub inputs: Vec<PathBuf>,
    /// Inputs that could not be read.
    pub skipped: Vec<PathBuf>,
}

/// Read and concatenate `files` in order. Unreadable files are logged and
/// returned in the second list. `None` when nothing could be read.
pub fn read_all(files: &[PathBuf]) -> (Option<Table>, Vec<PathBuf>) {
    let mut tables = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for file in files {
        match Table::read_csv(file) {
            Ok(table) => tables.push(table),
            Err(e) => {
                log::error!("Error reading {}: {}", file.display(), e);
                skipped.push(file.clone());
            }
        }
    }
    if tables.is_empty() {
        (None, skipped)
    } else {
        (Some(Table::concat(tables)), skipped)
    }
}

/// Concatenate every checkpoint of `category` (batches in index order, the
/// retried file last) into `output`.
///
/// Nothing is written when no checkpoint exists or none can be read.
pub fn consolidate(layout: &CheckpointLayout, category: &str, output: &Path) -> Consolidation {
    let mut result = Consolidation {
        category: category.to_string(),
        ..Default::default()
    };

    result.inputs = match layout.all_files(category) {
        Ok(files) => files,
        Err(e) => {
            log::error!(
                "Could not list checkpoints in {}: {}",
                layout.dir().display(),
                e
            );
            return result;
        }
    };
    if result.inputs.is_empty() {
        log::warn!("No checkpoint files found for {}", category);
        return result;
    }

    let (table, skipped) = read_all(&result.inputs);
    result.skipped = skipped;
    let Some(table) = table else {
        log::warn!("No readable checkpoint files for {}", category);
        return result;
    };

    match table.write_csv(output) {
        Ok(()) => {
            log::info!(
                "Consolidated {} files for {} into {} ({} rows)",
                result.inputs.len() - result.skipped.len(),
                category,
                output.display(),
                table.len()
            );
            result.rows = table.len();
            result.output = Some(output.to_path_buf());
        }
        Err(e) => log::error!("Failed to write {}: {}", output.display(), e),
    }
    result
}

/// Move the checkpoints of every category that produced an output into a
/// fresh timestamped folder. Returns the folder, or `None` if there was
/// nothing to archive or the folder could not be created. Archiving
/// problems are logged; the checkpoints stay where they are.
pub fn archive(layout: &CheckpointLayout, consolidations: &[Consolidation]) -> Option<PathBuf> {
    let files: Vec<PathBuf> = consolidations
        .iter()
        .filter(|c| c.output.is_some())
        .flat_map(|c| c.inputs.iter().cloned())
        .collect();
    if files.is_empty() {
        return None;
    }

    let dest = layout.archive_dir(Local::now());
    match move_files(&files, &dest) {
        Ok(moved) => {
            log::info!("Archived {} checkpoint files to {}", moved, dest.display());
            Some(dest)
        }
        Err(e) => {
            log::error!(
                "Could not archive checkpoints to {}: {}",
                dest.display(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, body: &str) {
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn concatenates_in_batch_order_with_retried_last() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CheckpointLayout::new(dir.path(), "boxscore");
        write(&layout.chunk_path("usage", 2), "GAME_ID\nb\n");
        write(&layout.retried_path("usage"), "GAME_ID\nz\n");
        write(&layout.chunk_path("usage", 1), "GAME_ID\na\n");
        let out = dir.path().join("boxscore_usage_final_2024-25.csv");

        let result = consolidate(&layout, "usage", &out);
        assert_eq!(result.rows, 3);
        assert_eq!(result.output.as_deref(), Some(out.as_path()));

        let merged = Table::read_csv(&out).unwrap();
        assert_eq!(merged.column("GAME_ID").unwrap(), vec!["a", "b", "z"]);
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CheckpointLayout::new(dir.path(), "boxscore");
        write(&layout.chunk_path("usage", 1), "GAME_ID\na\n");
        write(&layout.chunk_path("usage", 2), "GAME_ID,X\n1,2,3\n");
        let out = dir.path().join("out.csv");

        let result = consolidate(&layout, "usage", &out);
        assert_eq!(result.rows, 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.inputs.len(), 2);
    }

    #[test]
    fn nothing_found_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CheckpointLayout::new(dir.path(), "boxscore");
        let out = dir.path().join("out.csv");

        let result = consolidate(&layout, "usage", &out);
        assert!(result.output.is_none());
        assert!(!out.exists());
        assert_eq!(archive(&layout, &[result]), None);
    }

    #[test]
    fn archive_moves_consumed_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CheckpointLayout::new(dir.path(), "boxscore");
        write(&layout.chunk_path("usage", 1), "GAME_ID\na\n");
        let out = dir.path().join("out.csv");
        let result = consolidate(&layout, "usage", &out);

        let dest = archive(&layout, &[result]).unwrap();
        assert!(dest.join("boxscore_usage_chunk_1.csv").is_file());
        assert!(layout.all_files("usage").unwrap().is_empty());
        assert!(out.is_file());
    }
}
