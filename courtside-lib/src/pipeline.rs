//! End-to-end runs: enumerate, fetch with checkpoints, consolidate, archive.

use std::path::PathBuf;

use courtside_core::{BoxscoreCategory, RawTable};

use crate::checkpoint::CheckpointLayout;
use crate::config::PipelineConfig;
use crate::consolidate::{Consolidation, archive, consolidate};
use crate::engine::Engine;
use crate::enumerate::enumerate;
use crate::error::PipelineError;
use crate::report::{EngineEvent, RunReport};
use crate::resume::{processed_ids, remaining};
use crate::source::{ItemFetcher, ScopeSource};

/// Column that identifies a game in box score checkpoints.
pub const GAME_ID: &str = "GAME_ID";

#[derive(Debug, Clone, Default)]
pub struct PipelineRun {
    pub report: RunReport,
    pub consolidations: Vec<Consolidation>,
    /// Folder the consumed checkpoints were moved to.
    pub archive: Option<PathBuf>,
}

impl PipelineRun {
    /// Consolidated files that were written.
    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.consolidations.iter().filter_map(|c| c.output.as_ref())
    }
}

/// Fetch `ids`, then consolidate each category to `output_for(category)` and
/// archive the checkpoints.
pub fn collect(
    config: &PipelineConfig,
    fetcher: &dyn ItemFetcher,
    ids: &[String],
    layout: &CheckpointLayout,
    output_for: &dyn Fn(&str) -> PathBuf,
    observer: impl FnMut(EngineEvent),
) -> Result<PipelineRun, PipelineError> {
    std::fs::create_dir_all(layout.dir())?;
    std::fs::create_dir_all(&config.paths.raw)?;

    let report = Engine::new(&config.engine, layout)
        .with_observer(observer)
        .run(fetcher, ids);

    log::info!("Consolidating checkpoints in {}", layout.dir().display());
    let consolidations: Vec<Consolidation> = fetcher
        .categories()
        .iter()
        .map(|category| consolidate(layout, category, &output_for(category)))
        .collect();

    let archive = archive(layout, &consolidations);
    Ok(PipelineRun {
        report,
        consolidations,
        archive,
    })
}

fn boxscore_layout(config: &PipelineConfig) -> CheckpointLayout {
    CheckpointLayout::new(&config.paths.boxscore_checkpoints, "boxscore")
}

/// Every game in scope, all six box score categories.
pub fn run_boxscores(
    config: &PipelineConfig,
    games: &dyn ScopeSource,
    fetcher: &dyn ItemFetcher,
    observer: impl FnMut(EngineEvent),
) -> Result<PipelineRun, PipelineError> {
    let ids: Vec<String> = enumerate(
        games,
        &config.season,
        &config.season_types,
        config.engine.enumeration_pause,
    )?
    .into_iter()
    .collect();

    let layout = boxscore_layout(config);
    let season = config.season;
    let raw = config.paths.raw.clone();
    let output_for = move |category: &str| raw.join(format!("boxscore_{category}_final_{season}.csv"));
    collect(config, fetcher, &ids, &layout, &output_for, observer)
}

/// Games not yet present in the main-pass traditional checkpoints.
pub fn remaining_games(
    config: &PipelineConfig,
    games: &dyn ScopeSource,
) -> Result<Vec<String>, PipelineError> {
    let scope = enumerate(
        games,
        &config.season,
        &config.season_types,
        config.engine.enumeration_pause,
    )?;
    let files = boxscore_layout(config).chunk_files(BoxscoreCategory::representative().short_name())?;
    let processed = processed_ids(&files, GAME_ID);
    let left = remaining(&scope, &processed);

    log::info!("Total games in scope: {}", scope.len());
    log::info!("Games already processed: {}", processed.len());
    log::info!("Games remaining: {}", left.len());
    Ok(left.into_iter().collect())
}

/// Resume an interrupted box score run. `None` when nothing is left to do.
pub fn run_rerun(
    config: &PipelineConfig,
    games: &dyn ScopeSource,
    fetcher: &dyn ItemFetcher,
    observer: impl FnMut(EngineEvent),
) -> Result<Option<PipelineRun>, PipelineError> {
    let ids = remaining_games(config, games)?;
    if ids.is_empty() {
        log::info!("No remaining games to process; all data appears up to date");
        return Ok(None);
    }

    let layout = CheckpointLayout::new(&config.paths.boxscore_rerun_checkpoints, "boxscore").rerun();
    let season = config.season;
    let raw = config.paths.raw.clone();
    let output_for = move |category: &str| raw.join(format!("boxscore_{category}_rerun_{season}.csv"));
    collect(config, fetcher, &ids, &layout, &output_for, observer).map(Some)
}

/// The season schedule, fetched as a single work item keyed by the season.
pub fn run_schedule(
    config: &PipelineConfig,
    fetcher: &dyn ItemFetcher,
    observer: impl FnMut(EngineEvent),
) -> Result<PipelineRun, PipelineError> {
    let ids = vec![config.season.to_string()];
    let layout = CheckpointLayout::new(&config.paths.games_checkpoints, "");
    let output = config.paths.raw.join(RawTable::Schedule.file_name(&config.season));
    collect(config, fetcher, &ids, &layout, &|_| output.clone(), observer)
}

/// Player or team details: enumerate from `source`, fetch with `fetcher`,
/// consolidate to the `raw` table's file.
pub fn run_info(
    config: &PipelineConfig,
    source: &dyn ScopeSource,
    fetcher: &dyn ItemFetcher,
    raw: RawTable,
    observer: impl FnMut(EngineEvent),
) -> Result<PipelineRun, PipelineError> {
    let ids: Vec<String> = enumerate(
        source,
        &config.season,
        &config.season_types,
        config.engine.enumeration_pause,
    )?
    .into_iter()
    .collect();

    let layout = CheckpointLayout::new(&config.paths.info_checkpoints, "");
    let output = config.paths.raw.join(raw.file_name(&config.season));
    collect(config, fetcher, &ids, &layout, &|_| output.clone(), observer)
}
