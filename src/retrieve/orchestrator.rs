/// Retrieval orchestration: validate, resolve targets, fetch each, route results.
///
/// Lifecycle: `Init -> Validated -> Fetching -> Done`, or `Init -> Rejected`
/// when validation fails and `Fetching -> Fatal` when the helper cannot run.
/// A target that is not found never stops the remaining targets.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::errors::RetrieveError;
use super::fetch::{ObjectFetcher, RetrievalResult};
use super::host::HostValidator;
use super::naming::{derive_file_name, output_file_path};
use super::normalize::normalize_for_file;
use super::request::{RetrievalRequest, RetrievalTarget, request_is_valid};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Validated,
    Fetching,
    Done,
    Rejected,
    Fatal,
}

/// A persisted object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

/// What happened to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// Retrieved; `file` is set when the object was also persisted.
    Retrieved {
        result: RetrievalResult,
        file: Option<OutputFile>,
    },
    /// Retrieved, but writing the file failed.
    SaveFailed {
        result: RetrievalResult,
        path: PathBuf,
        error: String,
    },
    /// Nothing came back for the target.
    NotFound { target: RetrievalTarget },
}

impl TargetOutcome {
    /// The target this outcome belongs to.
    #[must_use]
    pub fn target(&self) -> &RetrievalTarget {
        match self {
            Self::Retrieved { result, .. } | Self::SaveFailed { result, .. } => &result.target,
            Self::NotFound { target } => target,
        }
    }
}

/// Receives each outcome as soon as its target is processed.
pub trait Reporter {
    fn report(&mut self, host: &str, outcome: &TargetOutcome);
}

/// Outcomes of a completed run, in target order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub host: String,
    pub outcomes: Vec<TargetOutcome>,
}

/// User-facing notice for a target that came back empty.
#[must_use]
pub fn not_found_message(host: &str, object_path: &str) -> String {
    format!(
        "Unable to retrieve the {object_path} object from the {host} terminal. Either the object \
         doesn't exist or a connection with the terminal was unable to be established."
    )
}

/// Drives a single request through validation and sequential fetching.
pub struct Orchestrator<'a> {
    validator: &'a dyn HostValidator,
    fetcher: &'a dyn ObjectFetcher,
    output_dir: PathBuf,
    trailer_lines: usize,
    today: NaiveDate,
    state: RunState,
}

impl<'a> Orchestrator<'a> {
    /// `today` stamps persisted file names; `trailer_lines` is the helper's
    /// run-status block stripped before persisting.
    #[must_use]
    pub fn new(
        validator: &'a dyn HostValidator,
        fetcher: &'a dyn ObjectFetcher,
        output_dir: impl Into<PathBuf>,
        trailer_lines: usize,
        today: NaiveDate,
    ) -> Self {
        Self {
            validator,
            fetcher,
            output_dir: output_dir.into(),
            trailer_lines,
            today,
            state: RunState::Init,
        }
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run `request` to completion.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::InvalidArguments` before any fetch if the host
    /// or the request fails validation, and `RetrieveError::Helper` if the
    /// helper cannot be launched (remaining targets are skipped).
    pub fn run(
        &mut self,
        request: &RetrievalRequest,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, RetrieveError> {
        let host = request.host_name.as_str();

        if !self.validator.is_valid(host)
            || !request_is_valid(request.direct_target(), &request.well_known)
        {
            self.transition(RunState::Rejected);
            return Err(RetrieveError::InvalidArguments {
                host: host.to_owned(),
            });
        }
        self.transition(RunState::Validated);

        let targets = request.targets();
        self.transition(RunState::Fetching);

        let mut outcomes = Vec::with_capacity(targets.len());
        for target in targets {
            let result = match self.fetcher.fetch(host, &target) {
                Ok(result) => result,
                Err(e) => {
                    self.transition(RunState::Fatal);
                    return Err(e.into());
                }
            };

            let outcome = self.route(host, request.persist_to_file, result);
            reporter.report(host, &outcome);
            outcomes.push(outcome);
        }

        self.transition(RunState::Done);
        Ok(RunSummary {
            host: host.to_owned(),
            outcomes,
        })
    }

    fn route(&self, host: &str, persist: bool, result: RetrievalResult) -> TargetOutcome {
        if !result.succeeded() {
            tracing::warn!("{}", not_found_message(host, &result.target.object_path));
            return TargetOutcome::NotFound {
                target: result.target,
            };
        }

        tracing::info!(
            host,
            object = %result.target.object_path,
            stream = ?result.stream,
            exit_code = ?result.exit_code,
            bytes = result.raw_output.len(),
            "object retrieved"
        );

        if !persist {
            return TargetOutcome::Retrieved { result, file: None };
        }

        let file = self.output_file(host, &result.raw_output);
        match persist_file(&file) {
            Ok(()) => TargetOutcome::Retrieved {
                result,
                file: Some(file),
            },
            Err(e) => {
                tracing::error!(path = %file.path.display(), error = %e, "failed to write output file");
                TargetOutcome::SaveFailed {
                    result,
                    path: file.path,
                    error: e.to_string(),
                }
            }
        }
    }

    fn output_file(&self, host: &str, raw: &str) -> OutputFile {
        let name = derive_file_name(raw, self.today);
        OutputFile {
            path: output_file_path(&self.output_dir, host, &name),
            contents: normalize_for_file(raw, self.trailer_lines),
        }
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }
}

/// Write `file`, replacing whatever is already at its path.
fn persist_file(file: &OutputFile) -> std::io::Result<()> {
    if file.path.exists() {
        tracing::info!(path = %file.path.display(), "output file already exists; overwriting");
    }
    ensure_parent(&file.path)?;
    std::fs::write(&file.path, &file.contents)?;
    tracing::info!(path = %file.path.display(), "output file written");
    Ok(())
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
