//! Projecting raw tables into the warehouse.

use std::path::{Path, PathBuf};

use courtside_core::{Projection, RawTable, Table};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

/// A tabular store that replaces a table's contents on every write.
pub trait Warehouse {
    /// Replace table `name` with `table`. Returns where it landed.
    fn overwrite(&mut self, name: &str, table: &Table) -> Result<PathBuf, PipelineError>;
}

/// Warehouse backed by one CSV file per table in a directory.
#[derive(Debug, Clone)]
pub struct CsvWarehouse {
    dir: PathBuf,
}

impl CsvWarehouse {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Warehouse for CsvWarehouse {
    fn overwrite(&mut self, name: &str, table: &Table) -> Result<PathBuf, PipelineError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{name}.csv"));
        table.write_csv(&path)?;
        Ok(path)
    }
}

/// What happened to one warehouse table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformStatus {
    Loaded { path: PathBuf, rows: usize },
    MissingInput(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    pub table: String,
    pub status: TransformStatus,
}

/// Where the raw input for `raw` is read from.
///
/// Box score tables prefer the appended file in `data/` over the
/// consolidated one in `data/raw/`.
pub fn input_path(config: &PipelineConfig, raw: RawTable) -> PathBuf {
    let name = raw.file_name(&config.season);
    if let RawTable::Boxscore(_) = raw {
        let appended = config.paths.data.join(&name);
        if appended.is_file() {
            return appended;
        }
    }
    config.paths.raw.join(name)
}

/// Apply one projection and overwrite its warehouse table.
pub fn transform_one(
    config: &PipelineConfig,
    projection: &Projection,
    warehouse: &mut dyn Warehouse,
) -> TransformOutcome {
    let table_name = projection.processed_name(&config.season);
    let input = input_path(config, projection.raw);

    let status = if !input.is_file() {
        log::warn!("{} not found; skipping {}", input.display(), table_name);
        TransformStatus::MissingInput(input)
    } else {
        match load(&input, projection, &table_name, warehouse) {
            Ok((path, rows)) => {
                log::info!("Loaded {} ({} rows)", table_name, rows);
                TransformStatus::Loaded { path, rows }
            }
            Err(e) => {
                log::error!("Failed to transform {}: {}", table_name, e);
                TransformStatus::Failed(e.to_string())
            }
        }
    };

    TransformOutcome {
        table: table_name,
        status,
    }
}

fn load(
    input: &Path,
    projection: &Projection,
    table_name: &str,
    warehouse: &mut dyn Warehouse,
) -> Result<(PathBuf, usize), PipelineError> {
    let raw = Table::read_csv(input)?;
    let projected = projection.apply(&raw)?;
    let path = warehouse.overwrite(table_name, &projected)?;
    Ok((path, projected.len()))
}

/// Run every projection. Failures are per table.
pub fn transform_all(config: &PipelineConfig, warehouse: &mut dyn Warehouse) -> Vec<TransformOutcome> {
    Projection::all()
        .iter()
        .map(|projection| transform_one(config, projection, warehouse))
        .collect()
}
