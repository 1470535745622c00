//! [`ScopeSource`] and [`ItemFetcher`] implementations backed by the API.

use courtside_core::{BoxscoreCategory, Season, SeasonType, Table};
use courtside_lib::{FetchError, ItemFetcher, ItemTables, ScopeSource};

use crate::client::StatsClient;
use crate::endpoints::{self, Endpoint};
use crate::error::ApiError;

/// Anything that can answer an endpoint request with a table.
pub trait TableSource {
    fn table(&self, endpoint: &Endpoint, params: &[(&str, String)]) -> Result<Table, ApiError>;
}

impl TableSource for StatsClient {
    fn table(&self, endpoint: &Endpoint, params: &[(&str, String)]) -> Result<Table, ApiError> {
        StatsClient::table(self, endpoint, params)
    }
}

/// Identifiers taken from one column of a season-wide game log.
pub struct GameLogScope<'a, S: TableSource> {
    source: &'a S,
    endpoint: Endpoint,
    column: &'static str,
    label: &'static str,
}

impl<'a, S: TableSource> GameLogScope<'a, S> {
    /// Game ids from the league game log.
    pub fn games(source: &'a S) -> Self {
        Self {
            source,
            endpoint: endpoints::LEAGUE_GAME_LOG,
            column: "GAME_ID",
            label: "games",
        }
    }

    /// Player ids from the player game logs.
    pub fn players(source: &'a S) -> Self {
        Self {
            source,
            endpoint: endpoints::PLAYER_GAME_LOGS,
            column: "PLAYER_ID",
            label: "players",
        }
    }

    /// Team ids from the team game logs.
    pub fn teams(source: &'a S) -> Self {
        Self {
            source,
            endpoint: endpoints::TEAM_GAME_LOGS,
            column: "TEAM_ID",
            label: "teams",
        }
    }
}

impl<S: TableSource> ScopeSource for GameLogScope<'_, S> {
    fn describe(&self) -> &str {
        self.label
    }

    fn ids_for(&self, season: &Season, season_type: SeasonType) -> Result<Vec<String>, FetchError> {
        let params = [
            ("Season", season.to_string()),
            ("SeasonType", season_type.label().to_string()),
            ("LeagueID", "00".to_string()),
        ];
        let table = self.source.table(&self.endpoint, &params)?;
        Ok(table.unique(self.column)?)
    }
}

/// All six box score categories for one game, as one unit.
pub struct BoxscoreFetcher<'a, S: TableSource> {
    source: &'a S,
}

impl<'a, S: TableSource> BoxscoreFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }
}

impl<S: TableSource> ItemFetcher for BoxscoreFetcher<'_, S> {
    fn categories(&self) -> Vec<String> {
        BoxscoreCategory::short_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn fetch(&self, id: &str) -> Result<ItemTables, FetchError> {
        let params = endpoints::boxscore_params(id);
        let mut tables = ItemTables::new();
        for &category in BoxscoreCategory::all() {
            let table = self.source.table(&endpoints::boxscore(category), &params)?;
            tables.insert(category.short_name().to_string(), table);
        }
        Ok(tables)
    }

    fn id_column(&self) -> Option<&str> {
        Some("GAME_ID")
    }
}

/// Column group that ends the kept part of the schedule, matched
/// case-insensitively (`pointsLeaders_0_points`, `POINTSLEADERS_3`).
pub const SCHEDULE_LAST_GROUP: &str = "pointsleaders";

/// Drop every schedule column after the last points-leader column.
/// Returns false when the table has no such column.
fn truncate_schedule(table: &mut Table) -> bool {
    let last = table
        .headers()
        .iter()
        .rev()
        .find(|h| h.to_ascii_lowercase().starts_with(SCHEDULE_LAST_GROUP))
        .cloned();
    match last {
        Some(name) => table.truncate_after(&name),
        None => false,
    }
}

/// The league schedule for the season named by the work item.
pub struct ScheduleFetcher<'a, S: TableSource> {
    source: &'a S,
}

impl<'a, S: TableSource> ScheduleFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }
}

impl<S: TableSource> ItemFetcher for ScheduleFetcher<'_, S> {
    fn categories(&self) -> Vec<String> {
        vec!["schedule".to_string()]
    }

    fn fetch(&self, id: &str) -> Result<ItemTables, FetchError> {
        let params = [("Season", id.to_string()), ("LeagueID", "00".to_string())];
        let mut table = self.source.table(&endpoints::SCHEDULE, &params)?;
        if !truncate_schedule(&mut table) {
            log::warn!("No points leader columns in schedule data; keeping all columns");
        }
        Ok(ItemTables::from([("schedule".to_string(), table)]))
    }

    fn accept(&self, tables: &ItemTables) -> bool {
        tables.values().any(|t| !t.is_empty())
    }
}

/// Common player info for one player id.
pub struct PlayerInfoFetcher<'a, S: TableSource> {
    source: &'a S,
}

impl<'a, S: TableSource> PlayerInfoFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }
}

impl<S: TableSource> ItemFetcher for PlayerInfoFetcher<'_, S> {
    fn categories(&self) -> Vec<String> {
        vec!["players".to_string()]
    }

    fn fetch(&self, id: &str) -> Result<ItemTables, FetchError> {
        let params = [("PlayerID", id.to_string()), ("LeagueID", "00".to_string())];
        let table = self.source.table(&endpoints::COMMON_PLAYER_INFO, &params)?;
        Ok(ItemTables::from([("players".to_string(), table)]))
    }
}

/// Team background for one team id. Empty backgrounds are dropped by the
/// engine like any other empty table.
pub struct TeamInfoFetcher<'a, S: TableSource> {
    source: &'a S,
}

impl<'a, S: TableSource> TeamInfoFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }
}

impl<S: TableSource> ItemFetcher for TeamInfoFetcher<'_, S> {
    fn categories(&self) -> Vec<String> {
        vec!["teams".to_string()]
    }

    fn fetch(&self, id: &str) -> Result<ItemTables, FetchError> {
        let params = [("TeamID", id.to_string())];
        let table = self.source.table(&endpoints::TEAM_DETAILS, &params)?;
        Ok(ItemTables::from([("teams".to_string(), table)]))
    }
}
