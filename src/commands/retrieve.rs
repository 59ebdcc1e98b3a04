/// The retrieval run.
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::cli::{Cli, OutputCtx, write_summary};
use crate::config::Config;
use crate::helper::{HelperBinary, HelperFetcher};
use crate::logging;
use crate::retrieve::{AdminShareValidator, Orchestrator, RetrieveError};

/// Run one retrieval request described by `cli`.
///
/// The log sink and the helper binary are both scoped to this call: the
/// helper is removed and "Application end" is logged on every return path.
///
/// # Errors
///
/// Returns the `RetrieveError` (wrapped) that ended the run, or a startup
/// failure such as an unreadable working directory.
pub fn run(cli: &Cli) -> Result<()> {
    let work_dir = std::env::current_dir().context("resolving working directory")?;
    let config = Config::load(cli.config.as_deref(), &work_dir)?;
    let today = Local::now().date_naive();

    let log = logging::init(&config.log, &work_dir, cli.verbose, today)?;
    tracing::debug!(log_file = %log.path().display(), "log sink open");

    let result = execute(cli, &config, &work_dir, today);
    if let Err(e) = &result {
        tracing::error!("Fatal Error: {e:#}");
    }
    result
}

fn execute(cli: &Cli, config: &Config, work_dir: &Path, today: NaiveDate) -> Result<()> {
    let request = cli.to_request(&config.objects);
    tracing::info!(
        host = %request.host_name,
        target_object = ?request.direct_target,
        persist = request.persist_to_file,
        "retrieval requested"
    );

    let helper =
        HelperBinary::provision(&config.helper, work_dir).map_err(RetrieveError::from)?;
    let fetcher = HelperFetcher::new(helper.path(), &config.helper);
    let validator = AdminShareValidator::new(config.host.share_template.as_str());
    let output_dir = cli
        .output_dir
        .as_ref()
        .map_or_else(|| work_dir.to_path_buf(), |d| work_dir.join(d));

    let mut ctx = OutputCtx::new(cli.format(), cli.summary);
    let mut orchestrator = Orchestrator::new(
        &validator,
        &fetcher,
        output_dir,
        config.helper.trailer_lines,
        today,
    );
    let outcome = orchestrator.run(&request, &mut ctx);
    tracing::debug!(state = ?orchestrator.state(), "run finished");
    let summary = outcome?;

    write_summary(&summary, &ctx);
    Ok(())
}
