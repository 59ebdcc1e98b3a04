/// Errors from the remote-execution helper layer.
use std::path::PathBuf;

use thiserror::Error;

/// Typed errors from provisioning or launching the helper binary.
#[derive(Debug, Error)]
pub enum HelperError {
    /// No helper at the expected path and no source configured to provision one from.
    #[error("Remote-execution helper not found at '{}'", path.display())]
    Missing {
        /// Where the helper was expected.
        path: PathBuf,
    },

    /// Copying the helper from its configured source failed.
    #[error("Failed to provision helper from '{}' to '{}': {source}", from.display(), to.display())]
    Provision {
        /// Configured source binary.
        from: PathBuf,
        /// Destination in the working directory.
        to: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The helper could not be started (missing, not executable, ...).
    #[error("Failed to launch '{}': {source}", program.display())]
    Spawn {
        /// Program that failed to start.
        program: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
