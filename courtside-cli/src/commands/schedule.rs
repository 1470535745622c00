use courtside_api::{ScheduleFetcher, StatsClient};
use courtside_lib::{PipelineConfig, pipeline};

use crate::error::CliError;
use crate::progress::EngineProgress;

use super::print_run_summary;

pub(crate) fn run_schedule(config: &PipelineConfig, quiet: bool) -> Result<(), CliError> {
    log::info!("Fetching the {} schedule", config.season);
    let client = StatsClient::new(config.engine.request_timeout)?;
    let fetcher = ScheduleFetcher::new(&client);

    let mut progress = EngineProgress::new("schedule", quiet);
    let run = pipeline::run_schedule(config, &fetcher, |e| progress.handle(e))?;
    print_run_summary("Schedule collection complete", &run);
    Ok(())
}
