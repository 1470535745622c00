use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use courtside_lib::PipelineConfig;
use courtside_lib::append::append_boxscores;

use crate::error::CliError;

pub(crate) fn run_append(config: &PipelineConfig) -> Result<(), CliError> {
    log::info!(
        "Appending rerun outputs to the {} box score checkpoints",
        config.season
    );
    let outcomes = append_boxscores(config);

    log::info!("");
    for outcome in &outcomes {
        match &outcome.output {
            Some(path) => log::info!(
                "  {} {} \u{2192} {} ({} rows from {} files, {} reruns moved)",
                "\u{2714}".if_supports_color(Stderr, |t| t.green()),
                outcome.category,
                path.display().if_supports_color(Stderr, |t| t.cyan()),
                outcome.rows,
                outcome.inputs,
                outcome.moved,
            ),
            None => log::warn!(
                "  {} {}: no checkpoint or rerun files",
                "\u{2718}".if_supports_color(Stderr, |t| t.yellow()),
                outcome.category,
            ),
        }
    }

    let written = outcomes.iter().filter(|o| o.output.is_some()).count();
    log::info!(
        "{} of {} categories appended",
        written.if_supports_color(Stderr, |t| t.bold()),
        courtside_core::BoxscoreCategory::all().len()
    );
    Ok(())
}
