mod common;

use courtside_core::Table;
use courtside_lib::{CheckpointLayout, EngineEvent, EngineSettings, Engine};

use common::{ScriptedFetcher, game_ids, ids_in};

fn settings() -> EngineSettings {
    EngineSettings::default().without_delays()
}

#[test]
fn two_hundred_fifty_games_with_three_hard_failures() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CheckpointLayout::new(dir.path(), "boxscore");
    let ids = game_ids(250);
    let fetcher = ScriptedFetcher::new(&["traditional", "usage"])
        .failing(&ids[5], u32::MAX)
        .failing(&ids[120], u32::MAX)
        .failing(&ids[249], u32::MAX);
    let settings = settings();

    let mut deferred_before_retry = None;
    let report = Engine::new(&settings, &layout)
        .with_observer(|event| {
            if let EngineEvent::DeferredPassStarted { pass: 1, remaining, .. } = event {
                deferred_before_retry = Some(remaining);
            }
        })
        .run(&fetcher, &ids);

    assert_eq!(report.requested, 250);
    assert_eq!(report.batches, 3);
    assert_eq!(report.succeeded, 247);
    assert_eq!(report.deferred, 3);
    assert_eq!(deferred_before_retry, Some(3));
    assert_eq!(report.recovered, 0);
    assert_eq!(
        report.permanently_failed,
        vec![ids[5].clone(), ids[120].clone(), ids[249].clone()]
    );

    // 5 main attempts + 3 deferred passes of one attempt each
    assert_eq!(fetcher.calls(&ids[5]), 8);
    assert_eq!(fetcher.calls(&ids[0]), 1);

    let sizes: Vec<usize> = (1..=3)
        .map(|n| {
            let t = Table::read_csv(&layout.chunk_path("traditional", n)).unwrap();
            ids_in(&t).len()
        })
        .collect();
    assert_eq!(sizes, vec![99, 99, 49]);
    assert!(!layout.retried_path("traditional").exists());
    assert_eq!(report.checkpoints.len(), 6);
}

#[test]
fn item_recovering_within_budget_is_never_deferred() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CheckpointLayout::new(dir.path(), "boxscore");
    let ids = game_ids(3);
    let fetcher = ScriptedFetcher::new(&["traditional"]).failing(&ids[1], 4);
    let settings = settings();

    let report = Engine::new(&settings, &layout).run(&fetcher, &ids);

    assert_eq!(report.succeeded, 3);
    assert_eq!(report.deferred, 0);
    assert_eq!(fetcher.calls(&ids[1]), 5);

    let t = Table::read_csv(&layout.chunk_path("traditional", 1)).unwrap();
    let rows_for_item = t
        .column("GAME_ID")
        .unwrap()
        .into_iter()
        .filter(|g| *g == ids[1])
        .count();
    assert_eq!(rows_for_item, 2);
    assert!(!layout.retried_path("traditional").exists());
}

#[test]
fn deferred_item_recovered_lands_in_retried_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CheckpointLayout::new(dir.path(), "boxscore");
    let ids = game_ids(4);
    // Fails the 5 main attempts and the first deferred pass.
    let fetcher = ScriptedFetcher::new(&["traditional", "usage"]).failing(&ids[2], 6);
    let settings = settings();

    let report = Engine::new(&settings, &layout).run(&fetcher, &ids);

    assert_eq!(report.deferred, 1);
    assert_eq!(report.recovered, 1);
    assert!(report.is_complete());
    assert_eq!(fetcher.calls(&ids[2]), 7);

    let main = Table::read_csv(&layout.chunk_path("usage", 1)).unwrap();
    assert!(!ids_in(&main).contains(&ids[2]));

    let retried = Table::read_csv(&layout.retried_path("usage")).unwrap();
    assert_eq!(ids_in(&retried).into_iter().collect::<Vec<_>>(), vec![ids[2].clone()]);
    assert_eq!(retried.len(), 2);
}

#[test]
fn batch_with_no_successes_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CheckpointLayout::new(dir.path(), "boxscore");
    let ids = game_ids(2);
    let fetcher = ScriptedFetcher::new(&["traditional"])
        .failing(&ids[0], u32::MAX)
        .failing(&ids[1], u32::MAX);
    let mut settings = settings();
    settings.max_retries = 0;

    let report = Engine::new(&settings, &layout).run(&fetcher, &ids);

    assert_eq!(report.succeeded, 0);
    assert_eq!(report.permanently_failed.len(), 2);
    assert!(report.checkpoints.is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn events_follow_batch_structure() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CheckpointLayout::new(dir.path(), "");
    let ids = game_ids(5);
    let fetcher = ScriptedFetcher::new(&["schedule"]).failing(&ids[0], 1);
    let mut settings = settings();
    settings.chunk_size = 2;

    let mut batches = Vec::new();
    let mut failed_attempts = 0;
    let mut finished = false;
    Engine::new(&settings, &layout)
        .with_observer(|event| match event {
            EngineEvent::BatchStarted { index, total, size } => batches.push((index, total, size)),
            EngineEvent::AttemptFailed { .. } => failed_attempts += 1,
            EngineEvent::Finished { .. } => finished = true,
            _ => {}
        })
        .run(&fetcher, &ids);

    assert_eq!(batches, vec![(1, 3, 2), (2, 3, 2), (3, 3, 1)]);
    assert_eq!(failed_attempts, 1);
    assert!(finished);
    assert!(layout.chunk_path("schedule", 3).is_file());
}
