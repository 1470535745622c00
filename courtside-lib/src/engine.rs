//! The chunked fetch-retry-checkpoint engine.
//!
//! Items are fetched one at a time in fixed-size batches. Each batch's
//! successes are written to one checkpoint per category before the next
//! batch starts. Items that use up their retry budget are deferred and given
//! a few more single-attempt passes once every batch is done; whatever those
//! passes recover goes to a separate `retried` checkpoint.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Duration;

use courtside_core::Table;

use crate::checkpoint::CheckpointLayout;
use crate::config::EngineSettings;
use crate::report::{EngineEvent, RunReport};
use crate::retry::RetryPolicy;
use crate::source::{ItemFetcher, ItemTables};

/// Split `items` into contiguous batches of at most `size`, numbered from 1.
pub fn partition<T>(items: &[T], size: usize) -> impl Iterator<Item = (usize, &[T])> {
    items
        .chunks(size.max(1))
        .enumerate()
        .map(|(i, batch)| (i + 1, batch))
}

/// Number of batches `partition` produces.
pub fn batch_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}

/// Per-category rows gathered since the last flush.
#[derive(Debug, Default)]
struct Accumulator {
    tables: BTreeMap<String, Table>,
}

impl Accumulator {
    fn add(&mut self, id_column: Option<&str>, id: &str, tables: ItemTables) {
        for (category, mut table) in tables {
            if table.is_empty() {
                continue;
            }
            if let Some(column) = id_column {
                table.set_column(column, id);
            }
            self.tables.entry(category).or_default().append(table);
        }
    }

    fn take(&mut self, category: &str) -> Option<Table> {
        self.tables.remove(category).filter(|t| !t.is_empty())
    }
}

pub struct Engine<'a> {
    settings: &'a EngineSettings,
    layout: &'a CheckpointLayout,
    observer: Box<dyn FnMut(EngineEvent) + 'a>,
}

impl<'a> Engine<'a> {
    pub fn new(settings: &'a EngineSettings, layout: &'a CheckpointLayout) -> Self {
        Self {
            settings,
            layout,
            observer: Box::new(|_| {}),
        }
    }

    /// Receive an [`EngineEvent`] for every step of the run.
    pub fn with_observer(mut self, observer: impl FnMut(EngineEvent) + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    fn emit(&mut self, event: EngineEvent) {
        (self.observer)(event);
    }

    /// Fetch every item in `ids`, in order, and checkpoint the results.
    ///
    /// Per-item failures never abort the run; they end up in
    /// [`RunReport::permanently_failed`].
    pub fn run(&mut self, fetcher: &dyn ItemFetcher, ids: &[String]) -> RunReport {
        let categories = fetcher.categories();
        let total = batch_count(ids.len(), self.settings.chunk_size);
        let main_policy = RetryPolicy::new(self.settings.max_attempts, self.settings.retry_delay);

        let mut report = RunReport {
            requested: ids.len(),
            batches: total,
            ..Default::default()
        };
        let mut deferred = BTreeSet::new();

        for (index, batch) in partition(ids, self.settings.chunk_size) {
            log::info!(
                "Processing batch {}/{} ({} items)",
                index,
                total,
                batch.len()
            );
            self.emit(EngineEvent::BatchStarted {
                index,
                total,
                size: batch.len(),
            });

            let mut accumulator = Accumulator::default();
            for id in batch {
                match self.fetch_item(fetcher, id, &main_policy) {
                    Some(tables) => {
                        accumulator.add(fetcher.id_column(), id, tables);
                        report.succeeded += 1;
                    }
                    None => {
                        log::warn!("{} failed all attempts; deferring", id);
                        self.emit(EngineEvent::ItemDeferred { id: id.clone() });
                        deferred.insert(id.clone());
                    }
                }
            }

            for category in &categories {
                match accumulator.take(category) {
                    Some(table) => {
                        let path = self.layout.chunk_path(category, index);
                        self.write_checkpoint(&table, path, &mut report);
                    }
                    None => log::info!("No data for {} in batch {}", category, index),
                }
            }

            sleep(self.settings.batch_pause);
        }

        report.deferred = deferred.len();
        if !deferred.is_empty() {
            let recovered = self.deferred_pass(fetcher, &categories, &mut deferred, &mut report);
            report.recovered = recovered;
        }

        report.permanently_failed = deferred.into_iter().collect();
        if !report.permanently_failed.is_empty() {
            log::error!(
                "{} items failed even after the retry passes: {}",
                report.permanently_failed.len(),
                report.permanently_failed.join(", ")
            );
        }

        self.emit(EngineEvent::Finished {
            report: report.clone(),
        });
        report
    }

    /// Single-attempt passes over the deferred set. Recovered items are
    /// removed from `remaining`; the count recovered is returned.
    fn deferred_pass(
        &mut self,
        fetcher: &dyn ItemFetcher,
        categories: &[String],
        remaining: &mut BTreeSet<String>,
        report: &mut RunReport,
    ) -> usize {
        let max_passes = self.settings.max_retries;
        let once = RetryPolicy::once();
        let mut accumulator = Accumulator::default();
        let mut recovered = 0;

        log::warn!("Retrying {} deferred items", remaining.len());
        for pass in 1..=max_passes {
            if remaining.is_empty() {
                break;
            }
            log::info!(
                "Deferred pass {}/{}: {} remaining",
                pass,
                max_passes,
                remaining.len()
            );
            self.emit(EngineEvent::DeferredPassStarted {
                pass,
                max_passes,
                remaining: remaining.len(),
            });

            let current: Vec<String> = remaining.iter().cloned().collect();
            for id in current {
                if let Some(tables) = self.fetch_item(fetcher, &id, &once) {
                    accumulator.add(fetcher.id_column(), &id, tables);
                    remaining.remove(&id);
                    recovered += 1;
                }
            }

            if !remaining.is_empty() && pass < max_passes {
                sleep(self.settings.deferred_pause);
            }
        }

        for category in categories {
            if let Some(table) = accumulator.take(category) {
                let path = self.layout.retried_path(category);
                self.write_checkpoint(&table, path, report);
            }
        }
        recovered
    }

    fn fetch_item(
        &mut self,
        fetcher: &dyn ItemFetcher,
        id: &str,
        policy: &RetryPolicy,
    ) -> Option<ItemTables> {
        self.emit(EngineEvent::ItemStarted { id: id.to_string() });

        let max_attempts = policy.max_attempts;
        let observer = &mut self.observer;
        let result = policy.run(
            || fetcher.fetch(id),
            |tables| fetcher.accept(tables),
            |attempt, err| {
                log::warn!(
                    "Error fetching {} (attempt {}/{}): {}",
                    id,
                    attempt,
                    max_attempts,
                    err
                );
                observer(EngineEvent::AttemptFailed {
                    id: id.to_string(),
                    attempt,
                    max_attempts,
                    reason: err.to_string(),
                });
            },
        );

        match result {
            Ok(tables) => {
                self.emit(EngineEvent::ItemSucceeded { id: id.to_string() });
                Some(tables)
            }
            Err(_) => None,
        }
    }

    fn write_checkpoint(&mut self, table: &Table, path: PathBuf, report: &mut RunReport) {
        match table.write_csv(&path) {
            Ok(()) => {
                log::info!("Saved checkpoint {} ({} rows)", path.display(), table.len());
                self.emit(EngineEvent::CheckpointWritten {
                    path: path.clone(),
                    rows: table.len(),
                });
                report.checkpoints.push(path);
            }
            Err(e) => log::error!("Failed to write checkpoint {}: {}", path.display(), e),
        }
    }
}

fn sleep(d: Duration) {
    if !d.is_zero() {
        std::thread::sleep(d);
    }
}
