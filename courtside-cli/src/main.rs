//! courtside CLI
//!
//! Collects NBA statistics into checkpointed CSV tables and projects them
//! into processed warehouse tables.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;

use std::path::PathBuf;

use clap::Parser;

use courtside_lib::PipelineConfig;
use courtside_lib::settings::{Overrides, SettingsFile, resolve, settings_path};

use cli_types::{Cli, Commands, ConfigAction};
use commands::append::run_append;
use commands::boxscores::{run_boxscores, run_rerun};
use commands::config::{run_config_init, run_config_path, run_config_show};
use commands::info::run_info;
use commands::schedule::run_schedule;
use commands::transform::run_transform;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        // No logger is installed when logging setup itself failed.
        if log::max_level() == log::LevelFilter::Off {
            eprintln!("Error: {}", e);
        } else {
            log::error!("{}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = cli.config.clone().unwrap_or_else(settings_path);
    let overrides = Overrides {
        season: cli.season,
        season_types: cli.season_types.clone(),
        root: cli.root.clone(),
    };

    if let Commands::Config { action } = &cli.command {
        logging::init(cli.quiet, cli.verbose, None)?;
        return match action {
            ConfigAction::Show => run_config_show(&settings, overrides),
            ConfigAction::Path => {
                run_config_path(&settings);
                Ok(())
            }
            ConfigAction::Init { force } => run_config_init(&settings, *force),
        };
    }

    let config = match load_config(&settings, overrides) {
        Ok(config) => config,
        Err(e) => {
            logging::init(cli.quiet, cli.verbose, None)?;
            return Err(e);
        }
    };

    let log_file: Option<PathBuf> = if cli.no_logfile {
        None
    } else {
        Some(
            cli.logfile
                .clone()
                .unwrap_or_else(|| logging::default_log_path(&config.paths.logging)),
        )
    };
    logging::init(cli.quiet, cli.verbose, log_file.as_deref())?;
    if let Some(path) = &log_file {
        log::debug!("Logging to {}", path.display());
    }

    match cli.command {
        Commands::Boxscores => run_boxscores(&config, cli.quiet),
        Commands::Rerun => run_rerun(&config, cli.quiet),
        Commands::Schedule => run_schedule(&config, cli.quiet),
        Commands::Info {
            players_only,
            teams_only,
        } => run_info(&config, cli.quiet, !teams_only, !players_only),
        Commands::Append => run_append(&config),
        Commands::Transform { tables } => run_transform(&config, tables),
        Commands::Config { .. } => Ok(()),
    }
}

/// Resolve the run configuration and create its folders.
fn load_config(settings: &std::path::Path, overrides: Overrides) -> Result<PipelineConfig, CliError> {
    let file = SettingsFile::load(settings)?;
    let config = resolve(overrides, &file)?;
    config.paths.ensure()?;
    Ok(config)
}
