//! Settings file handling.
//!
//! The settings file lives at `~/.config/courtside/settings.toml` unless a
//! path is given explicitly. Values resolve through a priority chain:
//!
//! 1. command-line override
//! 2. settings file
//! 3. built-in default

use std::path::{Path, PathBuf};
use std::time::Duration;

use courtside_core::{Season, SeasonType};
use serde::{Deserialize, Serialize};

use crate::config::{EngineSettings, Paths, PipelineConfig};
use crate::error::PipelineError;

/// Canonical path to the settings file: `~/.config/courtside/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("courtside").join("settings.toml")
}

/// On-disk shape of `settings.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub season: SeasonSection,
    pub paths: PathsSection,
    pub engine: EngineSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

/// Engine tuning. Durations are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_pause_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferred_pause_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumeration_pause_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl SettingsFile {
    /// Load settings from `path`. A missing file yields empty settings.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the settings to `path`, replacing any existing file atomically.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Settings with every built-in default spelled out, for `config init`.
    pub fn template() -> Self {
        let engine = EngineSettings::default();
        Self {
            season: SeasonSection {
                name: Some(Season::default().to_string()),
                types: Some(
                    SeasonType::defaults()
                        .iter()
                        .map(|t| t.label().to_string())
                        .collect(),
                ),
            },
            paths: PathsSection::default(),
            engine: EngineSection {
                chunk_size: Some(engine.chunk_size),
                max_attempts: Some(engine.max_attempts),
                retry_delay_ms: Some(millis(engine.retry_delay)),
                batch_pause_ms: Some(millis(engine.batch_pause)),
                max_retries: Some(engine.max_retries),
                deferred_pause_ms: Some(millis(engine.deferred_pause)),
                enumeration_pause_ms: Some(millis(engine.enumeration_pause)),
                request_timeout_ms: Some(millis(engine.request_timeout)),
            },
        }
    }
}

fn millis(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}

/// Values given on the command line, which beat the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub season: Option<Season>,
    pub season_types: Option<Vec<SeasonType>>,
    pub root: Option<PathBuf>,
}

/// Build the run configuration from overrides, the settings file and defaults.
pub fn resolve(overrides: Overrides, file: &SettingsFile) -> Result<PipelineConfig, PipelineError> {
    let season = match (overrides.season, &file.season.name) {
        (Some(season), _) => season,
        (None, Some(name)) => name
            .parse()
            .map_err(|e| PipelineError::settings(format!("[season] name: {e}")))?,
        (None, None) => Season::default(),
    };

    let season_types = match (overrides.season_types, &file.season.types) {
        (Some(types), _) if !types.is_empty() => types,
        (_, Some(names)) if !names.is_empty() => names
            .iter()
            .map(|n| n.parse())
            .collect::<Result<Vec<SeasonType>, _>>()
            .map_err(|e| PipelineError::settings(format!("[season] types: {e}")))?,
        _ => SeasonType::defaults(),
    };

    let root = match (overrides.root, &file.paths.root) {
        (Some(root), _) => root,
        (None, Some(root)) => root.clone(),
        (None, None) => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    Ok(PipelineConfig {
        season,
        season_types,
        paths: Paths::new(root),
        engine: engine_settings(&file.engine)?,
    })
}

fn engine_settings(section: &EngineSection) -> Result<EngineSettings, PipelineError> {
    let defaults = EngineSettings::default();
    let ms = |v: Option<u64>, fallback: Duration| v.map(Duration::from_millis).unwrap_or(fallback);

    let settings = EngineSettings {
        chunk_size: section.chunk_size.unwrap_or(defaults.chunk_size),
        max_attempts: section.max_attempts.unwrap_or(defaults.max_attempts),
        retry_delay: ms(section.retry_delay_ms, defaults.retry_delay),
        batch_pause: ms(section.batch_pause_ms, defaults.batch_pause),
        max_retries: section.max_retries.unwrap_or(defaults.max_retries),
        deferred_pause: ms(section.deferred_pause_ms, defaults.deferred_pause),
        enumeration_pause: ms(section.enumeration_pause_ms, defaults.enumeration_pause),
        request_timeout: ms(section.request_timeout_ms, defaults.request_timeout),
    };

    if settings.chunk_size == 0 {
        return Err(PipelineError::settings("[engine] chunk_size must be at least 1"));
    }
    if settings.max_attempts == 0 {
        return Err(PipelineError::settings("[engine] max_attempts must be at least 1"));
    }
    Ok(settings)
}
