pub(crate) mod append;
pub(crate) mod boxscores;
pub(crate) mod config;
pub(crate) mod info;
pub(crate) mod schedule;
pub(crate) mod transform;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use courtside_lib::PipelineRun;

/// Log the outcome of a pipeline run.
pub(crate) fn print_run_summary(title: &str, run: &PipelineRun) {
    let report = &run.report;

    log::info!("");
    log::info!("{}", title.if_supports_color(Stderr, |t| t.bold()));
    log::info!(
        "  Items: {} requested in {} batches",
        report.requested,
        report.batches
    );
    log::info!(
        "  Succeeded: {} (main pass {}, recovered {} of {} deferred)",
        report
            .total_succeeded()
            .if_supports_color(Stderr, |t| t.green()),
        report.succeeded,
        report.recovered,
        report.deferred,
    );
    if !report.is_complete() {
        log::error!(
            "  {} {} permanently failed: {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            report.permanently_failed.len(),
            report.permanently_failed.join(", "),
        );
    }
    log::info!("  Checkpoints written: {}", report.checkpoints.len());

    for consolidation in &run.consolidations {
        match &consolidation.output {
            Some(path) => log::info!(
                "  {} {} \u{2192} {} ({} rows)",
                "\u{2714}".if_supports_color(Stderr, |t| t.green()),
                consolidation.category,
                path.display().if_supports_color(Stderr, |t| t.cyan()),
                consolidation.rows,
            ),
            None => log::warn!(
                "  {} {}: nothing consolidated",
                "\u{2718}".if_supports_color(Stderr, |t| t.yellow()),
                consolidation.category,
            ),
        }
    }
    if let Some(archive) = &run.archive {
        log::info!(
            "  Checkpoints archived to {}",
            archive.display().if_supports_color(Stderr, |t| t.dimmed())
        );
    }
}
