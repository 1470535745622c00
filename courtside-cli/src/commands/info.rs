use courtside_api::{GameLogScope, PlayerInfoFetcher, StatsClient, TeamInfoFetcher};
use courtside_core::RawTable;
use courtside_lib::{PipelineConfig, pipeline};

use crate::error::CliError;
use crate::progress::EngineProgress;

use super::boxscores::season_types;
use super::print_run_summary;

/// Fetch player and/or team details for everyone who appeared in a game.
pub(crate) fn run_info(
    config: &PipelineConfig,
    quiet: bool,
    players: bool,
    teams: bool,
) -> Result<(), CliError> {
    log::info!(
        "Gathering player and team information for {} ({})",
        config.season,
        season_types(config)
    );
    let client = StatsClient::new(config.engine.request_timeout)?;

    if players {
        let scope = GameLogScope::players(&client);
        let fetcher = PlayerInfoFetcher::new(&client);
        let mut progress = EngineProgress::new("players", quiet);
        let run = pipeline::run_info(config, &scope, &fetcher, RawTable::Players, |e| {
            progress.handle(e)
        })?;
        print_run_summary("Player info complete", &run);
    }

    if teams {
        let scope = GameLogScope::teams(&client);
        let fetcher = TeamInfoFetcher::new(&client);
        let mut progress = EngineProgress::new("teams", quiet);
        let run = pipeline::run_info(config, &scope, &fetcher, RawTable::Teams, |e| {
            progress.handle(e)
        })?;
        print_run_summary("Team info complete", &run);
    }
    Ok(())
}
