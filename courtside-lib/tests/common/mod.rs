#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Mutex;

use courtside_core::{Season, SeasonType, Table};
use courtside_lib::{
    EngineSettings, FetchError, ItemFetcher, ItemTables, PipelineConfig, ScopeSource,
};

/// Scope source returning a fixed id list for every season type.
pub struct FixedScope(pub Vec<String>);

impl FixedScope {
    pub fn of(ids: &[&str]) -> Self {
        Self(ids.iter().map(|s| s.to_string()).collect())
    }
}

impl ScopeSource for FixedScope {
    fn describe(&self) -> &str {
        "games"
    }

    fn ids_for(&self, _season: &Season, _season_type: SeasonType) -> Result<Vec<String>, FetchError> {
        Ok(self.0.clone())
    }
}

/// Fetcher whose failures are scripted per id: an id listed in `failures`
/// fails that many calls before succeeding (`u32::MAX` never succeeds).
pub struct ScriptedFetcher {
    categories: Vec<String>,
    failures: HashMap<String, u32>,
    calls: Mutex<HashMap<String, u32>>,
}

impl ScriptedFetcher {
    pub fn new(categories: &[&str]) -> Self {
        Self {
            categories: categories.iter().map(|s| s.to_string()).collect(),
            failures: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn boxscores() -> Self {
        Self::new(&["advanced", "hustle", "scoring", "traditional", "playertrack", "usage"])
    }

    pub fn failing(mut self, id: &str, times: u32) -> Self {
        self.failures.insert(id.to_string(), times);
        self
    }

    pub fn calls(&self, id: &str) -> u32 {
        self.calls.lock().unwrap().get(id).copied().unwrap_or(0)
    }
}

impl ItemFetcher for ScriptedFetcher {
    fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    fn fetch(&self, id: &str) -> Result<ItemTables, FetchError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let n = calls.entry(id.to_string()).or_insert(0);
            *n += 1;
            *n
        };
        if let Some(&fail) = self.failures.get(id) {
            if call <= fail {
                return Err(FetchError::transient(format!("scripted failure {call}")));
            }
        }

        let mut tables = ItemTables::new();
        for category in &self.categories {
            let table = Table::from_rows(
                vec!["PLAYER_ID".into(), "PTS".into()],
                vec![
                    vec![format!("{id}-1"), "10".into()],
                    vec![format!("{id}-2"), "4".into()],
                ],
            )
            .unwrap();
            tables.insert(category.clone(), table);
        }
        Ok(tables)
    }

    fn id_column(&self) -> Option<&str> {
        Some("GAME_ID")
    }
}

/// Config rooted at `root` with no pauses.
pub fn config(root: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::new(root);
    config.season_types = vec![SeasonType::RegularSeason];
    config.engine = EngineSettings::default().without_delays();
    config.paths.ensure().unwrap();
    config
}

pub fn game_ids(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("00224{i:05}")).collect()
}

pub fn ids_in(table: &Table) -> BTreeSet<String> {
    table.column("GAME_ID").unwrap().into_iter().map(str::to_string).collect()
}
