/// Errors from the retrieval domain layer.
use thiserror::Error;

use crate::helper::HelperError;

/// Exit status for startup failures (config, log sink, file system).
pub const EXIT_STARTUP: i32 = 1;
/// Exit status for a rejected request.
pub const EXIT_INVALID_ARGS: i32 = 2;
/// Exit status when the remote-execution helper cannot be provisioned or launched.
pub const EXIT_HELPER: i32 = 3;

/// Errors that end a run. Per-target misses are not errors.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The host failed the reachability probe, or the request names nothing to retrieve.
    #[error(
        "Invalid arguments provided. Is {host} a valid host name? If so, check if you have \
         access to the terminal. If the host name is not the problem, run the program again \
         with --help to see proper usage information."
    )]
    InvalidArguments {
        /// Host the request was aimed at.
        host: String,
    },

    /// The remote-execution helper could not be provisioned or launched.
    #[error(transparent)]
    Helper(#[from] HelperError),

    /// The configuration file could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The log sink could not be opened.
    #[error("Unable to open log file: {0}")]
    Log(String),
}

impl RetrieveError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArguments { .. } => EXIT_INVALID_ARGS,
            Self::Helper(_) => EXIT_HELPER,
            Self::Config(_) | Self::Log(_) => EXIT_STARTUP,
        }
    }

    /// Machine-readable error code (`snake_case`).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::Helper(_) => "helper_error",
            Self::Config(_) => "config_error",
            Self::Log(_) => "log_error",
        }
    }
}
