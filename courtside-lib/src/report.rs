use std::path::PathBuf;

/// Outcome of one engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Work items handed to the engine.
    pub requested: usize,
    pub batches: usize,
    /// Items that succeeded in the main pass.
    pub succeeded: usize,
    /// Size of the deferred set when the main pass ended.
    pub deferred: usize,
    /// Deferred items that succeeded in a later pass.
    pub recovered: usize,
    /// Items still failing after every pass, sorted.
    pub permanently_failed: Vec<String>,
    /// Checkpoint files written, in write order.
    pub checkpoints: Vec<PathBuf>,
}

impl RunReport {
    /// Items with data in some checkpoint.
    pub fn total_succeeded(&self) -> usize {
        self.succeeded + self.recovered
    }

    pub fn is_complete(&self) -> bool {
        self.permanently_failed.is_empty()
    }
}

/// Progress notifications emitted while the engine runs.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A batch is about to start (`index` is 1-based).
    BatchStarted {
        index: usize,
        total: usize,
        size: usize,
    },
    ItemStarted { id: String },
    /// One attempt failed; more may follow.
    AttemptFailed {
        id: String,
        attempt: u32,
        max_attempts: u32,
        reason: String,
    },
    ItemSucceeded { id: String },
    /// The item used up its main-pass budget.
    ItemDeferred { id: String },
    CheckpointWritten { path: PathBuf, rows: usize },
    /// A pass over the deferred set is starting.
    DeferredPassStarted {
        pass: u32,
        max_passes: u32,
        remaining: usize,
    },
    Finished { report: RunReport },
}
