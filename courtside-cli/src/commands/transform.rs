use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use courtside_core::Projection;
use courtside_lib::transform::{TransformStatus, transform_one};
use courtside_lib::{CsvWarehouse, PipelineConfig};

use crate::error::CliError;

/// Project raw tables into `data/processed/`. `tables` narrows the run to
/// the named projections.
pub(crate) fn run_transform(
    config: &PipelineConfig,
    tables: Option<Vec<String>>,
) -> Result<(), CliError> {
    let projections: Vec<&Projection> = match tables {
        Some(names) => names
            .iter()
            .map(|name| {
                Projection::by_name(name).ok_or_else(|| {
                    let known: Vec<&str> = Projection::all().iter().map(|p| p.name).collect();
                    CliError::config(format!(
                        "Unknown table '{}'. Known tables: {}",
                        name,
                        known.join(", ")
                    ))
                })
            })
            .collect::<Result<_, _>>()?,
        None => Projection::all().iter().collect(),
    };

    std::fs::create_dir_all(&config.paths.processed)?;
    let mut warehouse = CsvWarehouse::new(&config.paths.processed);
    log::info!(
        "Transforming {} tables into {}",
        projections.len(),
        warehouse.dir().display()
    );

    let mut loaded = 0;
    let mut missing = 0;
    let mut failed = 0;
    for projection in projections {
        let outcome = transform_one(config, projection, &mut warehouse);
        match outcome.status {
            TransformStatus::Loaded { .. } => loaded += 1,
            TransformStatus::MissingInput(_) => missing += 1,
            TransformStatus::Failed(_) => failed += 1,
        }
    }

    log::info!("");
    log::info!(
        "{} loaded, {} missing input, {} failed",
        loaded.if_supports_color(Stderr, |t| t.green()),
        missing.if_supports_color(Stderr, |t| t.yellow()),
        failed.if_supports_color(Stderr, |t| t.red()),
    );
    Ok(())
}
