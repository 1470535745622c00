//! Merging main-pass checkpoints with rerun outputs into the season's final
//! box score files.

use std::path::{Path, PathBuf};

use courtside_core::BoxscoreCategory;

use crate::checkpoint::{CheckpointLayout, move_files};
use crate::config::PipelineConfig;
use crate::consolidate::read_all;
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub category: BoxscoreCategory,
    pub output: Option<PathBuf>,
    pub rows: usize,
    /// Checkpoints plus rerun outputs found.
    pub inputs: usize,
    /// Rerun outputs moved aside afterwards.
    pub moved: usize,
}

/// Rerun outputs for `category` in `raw_dir`, sorted by name.
pub fn rerun_outputs(raw_dir: &Path, category: BoxscoreCategory) -> Result<Vec<PathBuf>, PipelineError> {
    let prefix = format!("boxscore_{}_rerun_", category.short_name());
    let entries = match std::fs::read_dir(raw_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".csv"));
        if matches && entry.file_type()?.is_file() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Build `data/boxscore_<category>_final_<season>.csv` from the checkpoints
/// left in the main checkpoint folder and the rerun outputs in `raw/`, then
/// move the rerun outputs into `data/rerun/`.
pub fn append_category(
    config: &PipelineConfig,
    category: BoxscoreCategory,
) -> Result<AppendOutcome, PipelineError> {
    let paths = &config.paths;
    let layout = CheckpointLayout::new(&paths.boxscore_checkpoints, "boxscore");

    let checkpoints = layout.chunk_files(category.short_name())?;
    let reruns = rerun_outputs(&paths.raw, category)?;
    log::info!(
        "{}: {} checkpoint files, {} rerun files",
        category,
        checkpoints.len(),
        reruns.len()
    );

    let mut outcome = AppendOutcome {
        category,
        output: None,
        rows: 0,
        inputs: checkpoints.len() + reruns.len(),
        moved: 0,
    };
    if outcome.inputs == 0 {
        log::warn!("No files found for {}; skipping", category);
        return Ok(outcome);
    }

    let files: Vec<PathBuf> = checkpoints.into_iter().chain(reruns.iter().cloned()).collect();
    let (table, _) = read_all(&files);
    let Some(table) = table else {
        log::error!("Nothing readable to append for {}", category);
        return Ok(outcome);
    };

    std::fs::create_dir_all(&paths.data)?;
    let output = paths.data.join(format!(
        "boxscore_{}_final_{}.csv",
        category.short_name(),
        config.season
    ));
    table.write_csv(&output)?;
    log::info!(
        "Appended {} rows for {} into {}",
        table.len(),
        category,
        output.display()
    );
    outcome.rows = table.len();
    outcome.output = Some(output);

    outcome.moved = move_files(&reruns, &paths.rerun)?;
    Ok(outcome)
}

/// [`append_category`] for every box score category. A failure in one
/// category is logged and the rest still run.
pub fn append_boxscores(config: &PipelineConfig) -> Vec<AppendOutcome> {
    BoxscoreCategory::all()
        .iter()
        .filter_map(|&category| match append_category(config, category) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::error!("Append failed for {}: {}", category, e);
                None
            }
        })
        .collect()
}
