mod common;

use std::collections::BTreeSet;
use std::sync::Mutex;

use chrono::{Duration, Local};
use courtside_core::{BoxscoreCategory, RawTable, Table};
use courtside_lib::append::{append_boxscores, rerun_outputs};
use courtside_lib::pipeline::{remaining_games, run_boxscores, run_info, run_rerun, run_schedule};
use courtside_lib::transform::{CsvWarehouse, TransformStatus, transform_all};
use courtside_lib::{CheckpointLayout, Engine, FetchError, ItemFetcher, ItemTables};

use common::{FixedScope, ScriptedFetcher, config, ids_in};

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn boxscores_consolidate_and_archive() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let scope = FixedScope::of(&["0022400003", "0022400001", "0022400002"]);
    let fetcher = ScriptedFetcher::boxscores().failing("0022400002", 5);

    let run = run_boxscores(&config, &scope, &fetcher, |_| {}).unwrap();

    assert_eq!(run.report.requested, 3);
    assert_eq!(run.report.recovered, 1);
    assert_eq!(run.outputs().count(), 6);

    let final_path = config.paths.raw.join("boxscore_hustle_final_2024-25.csv");
    let merged = Table::read_csv(&final_path).unwrap();
    assert_eq!(merged.len(), 6);
    assert_eq!(ids_in(&merged), set(&["0022400001", "0022400002", "0022400003"]));
    // Main-pass batch first, retried rows last.
    assert_eq!(merged.rows().last().unwrap().last().unwrap(), "0022400002");

    let archive = run.archive.unwrap();
    assert!(archive.join("boxscore_hustle_chunk_1.csv").is_file());
    assert!(archive.join("boxscore_hustle_retried.csv").is_file());
    let layout = CheckpointLayout::new(&config.paths.boxscore_checkpoints, "boxscore");
    assert!(layout.all_files("hustle").unwrap().is_empty());
}

#[test]
fn archive_failure_keeps_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    // Plain files sit at every archive folder name the run could pick.
    let start = Local::now();
    for offset in -2..120 {
        let stamp = (start + Duration::seconds(offset))
            .format("%Y%m%d_%H%M%S")
            .to_string();
        std::fs::write(config.paths.boxscore_checkpoints.join(stamp), "").unwrap();
    }

    let scope = FixedScope::of(&["0022400001", "0022400002"]);
    let run = run_boxscores(&config, &scope, &ScriptedFetcher::boxscores(), |_| {}).unwrap();

    assert_eq!(run.report.succeeded, 2);
    assert_eq!(run.outputs().count(), 6);
    assert!(run.archive.is_none());
    assert!(config.paths.raw.join("boxscore_usage_final_2024-25.csv").is_file());

    // Unarchived checkpoints stay where they were written.
    let layout = CheckpointLayout::new(&config.paths.boxscore_checkpoints, "boxscore");
    assert_eq!(layout.chunk_files("usage").unwrap().len(), 1);
}

/// Schedule source that answers with an empty table for the first `empty`
/// calls, then with three games.
struct LateSchedule {
    empty: usize,
    calls: Mutex<Vec<String>>,
}

impl LateSchedule {
    fn new(empty: usize) -> Self {
        Self {
            empty,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ItemFetcher for LateSchedule {
    fn categories(&self) -> Vec<String> {
        vec!["schedule".to_string()]
    }

    fn fetch(&self, id: &str) -> Result<ItemTables, FetchError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(id.to_string());

        let rows = if calls.len() <= self.empty {
            Vec::new()
        } else {
            (1..=3)
                .map(|n| vec![format!("002240000{n}"), id.to_string()])
                .collect()
        };
        let table = Table::from_rows(vec!["gameId".into(), "seasonYear".into()], rows)?;
        Ok(ItemTables::from([("schedule".to_string(), table)]))
    }

    fn accept(&self, tables: &ItemTables) -> bool {
        tables.values().any(|t| !t.is_empty())
    }
}

#[test]
fn schedule_is_one_item_keyed_by_season() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let fetcher = LateSchedule::new(2);

    let run = run_schedule(&config, &fetcher, |_| {}).unwrap();

    assert_eq!(fetcher.calls(), vec!["2024-25"; 3]);
    assert_eq!(run.report.requested, 1);
    assert_eq!(run.report.succeeded, 1);
    assert_eq!(run.report.deferred, 0);
    assert_eq!(
        run.report.checkpoints,
        vec![config.paths.games_checkpoints.join("schedule_chunk_1.csv")]
    );

    let out = config.paths.raw.join("nba_schedule_2024-25.csv");
    assert_eq!(run.outputs().collect::<Vec<_>>(), vec![&out]);
    let schedule = Table::read_csv(&out).unwrap();
    assert_eq!(schedule.len(), 3);
    assert_eq!(schedule.column("seasonYear").unwrap(), vec!["2024-25"; 3]);

    let archive = run.archive.unwrap();
    assert!(archive.join("schedule_chunk_1.csv").is_file());
}

#[test]
fn empty_schedule_is_deferred_then_recovered() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    // Empty for all five main-pass attempts.
    let fetcher = LateSchedule::new(5);

    let run = run_schedule(&config, &fetcher, |_| {}).unwrap();

    assert_eq!(fetcher.calls().len(), 6);
    assert_eq!(run.report.succeeded, 0);
    assert_eq!(run.report.deferred, 1);
    assert_eq!(run.report.recovered, 1);
    assert!(run.report.is_complete());

    let schedule = Table::read_csv(&config.paths.raw.join("nba_schedule_2024-25.csv")).unwrap();
    assert_eq!(schedule.len(), 3);

    let archive = run.archive.unwrap();
    assert!(archive.join("schedule_retried.csv").is_file());
    assert!(!archive.join("schedule_chunk_1.csv").exists());
}

#[test]
fn rerun_fetches_only_what_checkpoints_lack() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let scope = FixedScope::of(&["A", "B", "C", "D"]);

    // An interrupted earlier run left checkpoints for A and B.
    let layout = CheckpointLayout::new(&config.paths.boxscore_checkpoints, "boxscore");
    let earlier = ScriptedFetcher::boxscores();
    Engine::new(&config.engine, &layout).run(&earlier, &["A".to_string(), "B".to_string()]);

    assert_eq!(remaining_games(&config, &scope).unwrap(), vec!["C", "D"]);

    let fetcher = ScriptedFetcher::boxscores();
    let run = run_rerun(&config, &scope, &fetcher, |_| {}).unwrap().unwrap();
    assert_eq!(run.report.requested, 2);
    assert_eq!(fetcher.calls("A"), 0);
    assert_eq!(fetcher.calls("C"), 1);

    let out = config.paths.raw.join("boxscore_usage_rerun_2024-25.csv");
    assert_eq!(ids_in(&Table::read_csv(&out).unwrap()), set(&["C", "D"]));

    let archive = run.archive.unwrap();
    assert!(archive.to_string_lossy().ends_with("_rerun"));
    assert!(archive.join("boxscore_usage_rerun_chunk_1.csv").is_file());

    // Main checkpoints are left alone for the append step.
    assert_eq!(layout.chunk_files("usage").unwrap().len(), 1);
}

#[test]
fn rerun_with_nothing_left_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let scope = FixedScope::of(&["A"]);
    let layout = CheckpointLayout::new(&config.paths.boxscore_checkpoints, "boxscore");
    Engine::new(&config.engine, &layout).run(&ScriptedFetcher::boxscores(), &["A".to_string()]);

    let fetcher = ScriptedFetcher::boxscores();
    assert!(run_rerun(&config, &scope, &fetcher, |_| {}).unwrap().is_none());
    assert_eq!(fetcher.calls("A"), 0);
}

#[test]
fn append_merges_checkpoints_with_rerun_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let scope = FixedScope::of(&["A", "B", "C"]);
    let layout = CheckpointLayout::new(&config.paths.boxscore_checkpoints, "boxscore");
    Engine::new(&config.engine, &layout).run(&ScriptedFetcher::boxscores(), &["A".to_string()]);
    run_rerun(&config, &scope, &ScriptedFetcher::boxscores(), |_| {})
        .unwrap()
        .unwrap();

    let outcomes = append_boxscores(&config);
    assert_eq!(outcomes.len(), 6);
    for outcome in &outcomes {
        assert_eq!(outcome.inputs, 2);
        assert_eq!(outcome.moved, 1);
    }

    let merged = Table::read_csv(&config.paths.data.join("boxscore_scoring_final_2024-25.csv")).unwrap();
    assert_eq!(ids_in(&merged), set(&["A", "B", "C"]));
    assert!(rerun_outputs(&config.paths.raw, BoxscoreCategory::Scoring).unwrap().is_empty());
    assert!(config.paths.rerun.join("boxscore_scoring_rerun_2024-25.csv").is_file());
}

#[test]
fn info_runs_write_raw_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let scope = FixedScope::of(&["1610612737", "1610612738"]);
    let fetcher = ScriptedFetcher::new(&["teams"]);

    let run = run_info(&config, &scope, &fetcher, RawTable::Teams, |_| {}).unwrap();
    assert_eq!(run.report.succeeded, 2);
    let out = config.paths.raw.join("all_teams_2024-25.csv");
    assert_eq!(Table::read_csv(&out).unwrap().len(), 4);
}

#[test]
fn transform_skips_missing_inputs_and_reports_bad_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    std::fs::write(
        config.paths.raw.join("all_teams_2024-25.csv"),
        "TEAM_ID,ABBREVIATION,CITY,NICKNAME,YEARFOUNDED,ARENA,ARENACAPACITY,OWNER,GENERALMANAGER,HEADCOACH,DLEAGUEAFFILIATION\n\
         1610612737,ATL,Atlanta,Hawks,1949,State Farm Arena,18118,Tony Ressler,Landry Fields,Quin Snyder,College Park Skyhawks\n",
    )
    .unwrap();
    std::fs::write(
        config.paths.raw.join("nba_schedule_2024-25.csv"),
        "gameId\n0022400001\n",
    )
    .unwrap();

    let mut warehouse = CsvWarehouse::new(&config.paths.processed);
    let outcomes = transform_all(&config, &mut warehouse);
    assert_eq!(outcomes.len(), 9);

    let status = |name: &str| {
        outcomes
            .iter()
            .find(|o| o.table == name)
            .map(|o| o.status.clone())
            .unwrap()
    };
    assert!(matches!(status("TEAMS_PROCESSED_2024_25"), TransformStatus::Loaded { rows: 1, .. }));
    assert!(matches!(status("SCHEDULE_PROCESSED_2024_25"), TransformStatus::Failed(_)));
    assert!(matches!(status("PLAYERS_PROCESSED_2024_25"), TransformStatus::MissingInput(_)));

    let teams = Table::read_csv(&config.paths.processed.join("TEAMS_PROCESSED_2024_25.csv")).unwrap();
    assert_eq!(teams.column("ARENACAPACITY").unwrap(), vec!["18118"]);
}
