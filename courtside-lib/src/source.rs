//! The two seams between the pipeline and the upstream data source.

use std::collections::BTreeMap;

use courtside_core::{Season, SeasonType, Table};

use crate::error::FetchError;

/// Tables returned for one work item, keyed by category name.
pub type ItemTables = BTreeMap<String, Table>;

/// Lists the work-item identifiers that exist for a scope.
pub trait ScopeSource {
    /// What the identifiers name, for log messages ("games", "players").
    fn describe(&self) -> &str;

    /// One bulk call for a single season type.
    fn ids_for(&self, season: &Season, season_type: SeasonType) -> Result<Vec<String>, FetchError>;
}

/// Fetches every category table for one work item.
pub trait ItemFetcher {
    /// Category names this fetcher produces, in checkpoint-writing order.
    fn categories(&self) -> Vec<String>;

    /// Fetch all categories for `id` as one unit. Any failure fails the whole
    /// item; partial results are never returned.
    fn fetch(&self, id: &str) -> Result<ItemTables, FetchError>;

    /// Column set to the item identifier on every row, if any.
    fn id_column(&self) -> Option<&str> {
        None
    }

    /// Whether a successful response is usable. Rejected responses are
    /// retried like failures.
    fn accept(&self, _tables: &ItemTables) -> bool {
        true
    }
}
