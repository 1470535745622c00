//! The immutable run configuration: which season to collect, where files
//! live, and how patient the engine is with the upstream source.

use std::path::{Path, PathBuf};
use std::time::Duration;

use courtside_core::{Season, SeasonType};

use crate::error::PipelineError;

/// Every directory the pipeline reads from or writes to, derived from one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub root: PathBuf,
    pub logging: PathBuf,
    pub data: PathBuf,
    pub raw: PathBuf,
    pub checkpoints: PathBuf,
    pub boxscore_checkpoints: PathBuf,
    pub games_checkpoints: PathBuf,
    pub info_checkpoints: PathBuf,
    pub boxscore_rerun_checkpoints: PathBuf,
    pub rerun: PathBuf,
    pub processed: PathBuf,
}

impl Paths {
    /// Derive the layout under `root`. Nothing is created on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data = root.join("data");
        let checkpoints = data.join("checkpoints");
        Self {
            logging: root.join("logging"),
            raw: data.join("raw"),
            boxscore_checkpoints: checkpoints.join("boxscore_checkpoints"),
            games_checkpoints: checkpoints.join("games_checkpoints"),
            info_checkpoints: checkpoints.join("info_checkpoints"),
            boxscore_rerun_checkpoints: checkpoints.join("boxscore_rerun_checkpoints"),
            rerun: data.join("rerun"),
            processed: data.join("processed"),
            checkpoints,
            data,
            root,
        }
    }

    fn all(&self) -> [&Path; 11] {
        [
            &self.root,
            &self.logging,
            &self.data,
            &self.raw,
            &self.checkpoints,
            &self.boxscore_checkpoints,
            &self.games_checkpoints,
            &self.info_checkpoints,
            &self.boxscore_rerun_checkpoints,
            &self.rerun,
            &self.processed,
        ]
    }

    /// Create every directory in the layout.
    pub fn ensure(&self) -> Result<(), PipelineError> {
        for dir in self.all() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Batch sizes, attempt budgets and the pauses between upstream calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub chunk_size: usize,
    /// Attempts per item in the main pass.
    pub max_attempts: u32,
    /// Delay between attempts on the same item.
    pub retry_delay: Duration,
    /// Pause after every batch.
    pub batch_pause: Duration,
    /// Full passes over the deferred set.
    pub max_retries: u32,
    /// Pause between deferred passes.
    pub deferred_pause: Duration,
    /// Pause between bulk enumeration calls.
    pub enumeration_pause: Duration,
    pub request_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            max_attempts: 5,
            retry_delay: Duration::from_secs(5),
            batch_pause: Duration::from_secs(3),
            max_retries: 3,
            deferred_pause: Duration::from_secs(5),
            enumeration_pause: Duration::from_millis(600),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl EngineSettings {
    /// Same budgets with every pause set to zero.
    pub fn without_delays(self) -> Self {
        Self {
            retry_delay: Duration::ZERO,
            batch_pause: Duration::ZERO,
            deferred_pause: Duration::ZERO,
            enumeration_pause: Duration::ZERO,
            ..self
        }
    }
}

/// Built once at startup and passed by reference to every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub season: Season,
    pub season_types: Vec<SeasonType>,
    pub paths: Paths,
    pub engine: EngineSettings,
}

impl PipelineConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            season: Season::default(),
            season_types: SeasonType::defaults(),
            paths: Paths::new(root),
            engine: EngineSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_root() {
        let paths = Paths::new("/srv/nba");
        assert_eq!(paths.raw, PathBuf::from("/srv/nba/data/raw"));
        assert_eq!(
            paths.boxscore_rerun_checkpoints,
            PathBuf::from("/srv/nba/data/checkpoints/boxscore_rerun_checkpoints")
        );
        assert_eq!(paths.logging, PathBuf::from("/srv/nba/logging"));
        assert_eq!(paths.processed, PathBuf::from("/srv/nba/data/processed"));
    }

    #[test]
    fn ensure_creates_the_tree() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::new(dir.path().join("root"));
        paths.ensure().unwrap();
        for p in paths.all() {
            assert!(p.is_dir(), "{} missing", p.display());
        }
        // Idempotent
        paths.ensure().unwrap();
    }

    #[test]
    fn default_engine_settings() {
        let s = EngineSettings::default();
        assert_eq!(s.chunk_size, 100);
        assert_eq!(s.max_attempts, 5);
        assert_eq!(s.max_retries, 3);
        assert_eq!(s.batch_pause, Duration::from_secs(3));
        assert_eq!(s.without_delays().retry_delay, Duration::ZERO);
    }
}
