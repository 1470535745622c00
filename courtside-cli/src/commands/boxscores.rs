use courtside_api::{BoxscoreFetcher, GameLogScope, StatsClient};
use courtside_lib::{PipelineConfig, pipeline};

use crate::error::CliError;
use crate::progress::EngineProgress;

use super::print_run_summary;

/// Fetch box scores for every game in scope.
pub(crate) fn run_boxscores(config: &PipelineConfig, quiet: bool) -> Result<(), CliError> {
    log::info!(
        "Collecting box scores for {} ({})",
        config.season,
        season_types(config)
    );
    let client = StatsClient::new(config.engine.request_timeout)?;
    let games = GameLogScope::games(&client);
    let fetcher = BoxscoreFetcher::new(&client);

    let mut progress = EngineProgress::new("boxscores", quiet);
    let run = pipeline::run_boxscores(config, &games, &fetcher, |e| progress.handle(e))?;
    print_run_summary("Box score collection complete", &run);
    Ok(())
}

/// Fetch box scores for games the main-run checkpoints do not cover yet.
pub(crate) fn run_rerun(config: &PipelineConfig, quiet: bool) -> Result<(), CliError> {
    log::info!(
        "Resuming box scores for {} from checkpoints in {}",
        config.season,
        config.paths.boxscore_checkpoints.display()
    );
    let client = StatsClient::new(config.engine.request_timeout)?;
    let games = GameLogScope::games(&client);
    let fetcher = BoxscoreFetcher::new(&client);

    let mut progress = EngineProgress::new("rerun", quiet);
    match pipeline::run_rerun(config, &games, &fetcher, |e| progress.handle(e))? {
        Some(run) => print_run_summary("Box score rerun complete", &run),
        None => log::info!("Nothing to rerun."),
    }
    Ok(())
}

pub(crate) fn season_types(config: &PipelineConfig) -> String {
    config
        .season_types
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}
