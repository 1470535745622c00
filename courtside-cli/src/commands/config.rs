use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use courtside_lib::settings::{Overrides, SettingsFile, resolve};

use crate::error::CliError;

/// Show the resolved settings and the file they came from.
pub(crate) fn run_config_show(path: &Path, overrides: Overrides) -> Result<(), CliError> {
    log::info!(
        "{}",
        "courtside configuration".if_supports_color(Stderr, |t| t.bold())
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(exists)".if_supports_color(Stderr, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stderr, |t| t.dimmed()),
        );
    }
    log::info!("");

    let file = SettingsFile::load(path)?;
    let config = resolve(overrides, &file)?;
    let engine = &config.engine;
    let types: Vec<&str> = config.season_types.iter().map(|t| t.label()).collect();

    let rows: &[(&str, String)] = &[
        ("season", config.season.to_string()),
        ("season types", types.join(", ")),
        ("root", config.paths.root.display().to_string()),
        ("chunk size", engine.chunk_size.to_string()),
        ("max attempts", engine.max_attempts.to_string()),
        ("retry delay", format!("{:?}", engine.retry_delay)),
        ("batch pause", format!("{:?}", engine.batch_pause)),
        ("deferred passes", engine.max_retries.to_string()),
        ("deferred pause", format!("{:?}", engine.deferred_pause)),
        ("enumeration pause", format!("{:?}", engine.enumeration_pause)),
        ("request timeout", format!("{:?}", engine.request_timeout)),
    ];
    for (name, value) in rows {
        log::info!("  {:<18} {}", format!("{name}:"), value);
    }
    Ok(())
}

pub(crate) fn run_config_path(path: &Path) {
    println!("{}", path.display());
}

/// Write a settings file with every default filled in.
pub(crate) fn run_config_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    SettingsFile::template().save(path)?;
    log::info!(
        "{} Wrote {}",
        "\u{2714}".if_supports_color(Stderr, |t| t.green()),
        path.display().if_supports_color(Stderr, |t| t.cyan()),
    );
    Ok(())
}
