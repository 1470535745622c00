//! Progress bars driven by engine events.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use courtside_lib::EngineEvent;

/// One bar per batch (and per deferred pass), replaced as the run moves on.
pub(crate) struct EngineProgress {
    label: String,
    quiet: bool,
    bar: Option<ProgressBar>,
    deferred_pass: bool,
}

impl EngineProgress {
    pub(crate) fn new(label: impl Into<String>, quiet: bool) -> Self {
        Self {
            label: label.into(),
            quiet,
            bar: None,
            deferred_pass: false,
        }
    }

    fn start_bar(&mut self, len: usize, prefix: String) {
        if let Some(old) = self.bar.take() {
            old.finish_and_clear();
        }
        let bar = if self.quiet {
            ProgressBar::with_draw_target(Some(len as u64), ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new(len as u64)
        };
        let style = ProgressStyle::with_template(
            "  {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
        )
        .expect("static pattern")
        .progress_chars("=> ");
        bar.set_style(style);
        bar.set_prefix(prefix);
        self.bar = Some(bar);
    }

    fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub(crate) fn handle(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::BatchStarted { index, total, size } => {
                self.deferred_pass = false;
                let prefix = format!("{} batch {}/{}", self.label, index, total);
                self.start_bar(size, prefix);
            }
            EngineEvent::DeferredPassStarted {
                pass,
                max_passes,
                remaining,
            } => {
                self.deferred_pass = true;
                let prefix = format!("{} retry pass {}/{}", self.label, pass, max_passes);
                self.start_bar(remaining, prefix);
            }
            EngineEvent::ItemStarted { id } => {
                if let Some(bar) = &self.bar {
                    bar.set_message(id);
                }
            }
            EngineEvent::ItemSucceeded { .. } | EngineEvent::ItemDeferred { .. } => self.inc(),
            // A deferred-pass item gets exactly one attempt, so a failure ends it.
            EngineEvent::AttemptFailed { .. } if self.deferred_pass => self.inc(),
            EngineEvent::AttemptFailed { .. } | EngineEvent::CheckpointWritten { .. } => {}
            EngineEvent::Finished { .. } => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
            }
        }
    }
}
