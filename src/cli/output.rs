/// Console output: per-target reporting, summary table, fatal errors.
use std::io::Write;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::args::OutputFormat;
use crate::retrieve::{Reporter, RunSummary, TargetOutcome, not_found_message};
use crate::types::{ErrorOutput, ObjectOutput};

/// Output context passed to all console writers.
pub struct OutputCtx {
    pub format: OutputFormat,
    /// Print a summary table after the run (text mode only).
    pub summary: bool,
}

impl OutputCtx {
    #[must_use]
    pub fn new(format: OutputFormat, summary: bool) -> Self {
        Self { format, summary }
    }
}

impl Reporter for OutputCtx {
    fn report(&mut self, host: &str, outcome: &TargetOutcome) {
        match self.format {
            OutputFormat::Json => print_compact_json(&ObjectOutput::from_outcome(host, outcome)),
            OutputFormat::Text => write_outcome_text(host, outcome),
        }
    }
}

fn write_outcome_text(host: &str, outcome: &TargetOutcome) {
    match outcome {
        TargetOutcome::Retrieved { result, file } => {
            print!("{}", result.raw_output);
            if let Some(file) = file {
                println!();
                println!("Saved to {}", file.path.display());
            }
        }
        TargetOutcome::SaveFailed {
            result,
            path,
            error,
        } => {
            print!("{}", result.raw_output);
            println!();
            eprintln!("Unable to write {}: {error}", path.display());
        }
        TargetOutcome::NotFound { target } => {
            println!("{}", not_found_message(host, &target.object_path));
        }
    }
    let _ = std::io::stdout().flush();
}

/// Write the end-of-run summary table, if requested.
pub fn write_summary(summary: &RunSummary, ctx: &OutputCtx) {
    if !ctx.summary || ctx.format != OutputFormat::Text {
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(["HOST", "OBJECT", "STATUS", "FILE"]);
    for outcome in &summary.outcomes {
        let row = ObjectOutput::from_outcome(&summary.host, outcome);
        table.add_row([
            row.host.as_str(),
            row.object_path.as_str(),
            row.status.label(),
            row.file.as_deref().unwrap_or(""),
        ]);
    }
    println!("{table}");
}

/// Write a fatal error to stderr.
pub fn write_error(err: &anyhow::Error, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string(&ErrorOutput::from_error(err)).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Text => {
            let _ = writeln!(out, "Fatal Error: {err:#}");
        }
    }
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
