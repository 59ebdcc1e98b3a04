/// Fetch results and the stream reconciliation rule shared by fetchers.
use serde::Serialize;

use super::normalize::sanitize_error;
use super::request::RetrievalTarget;
use crate::helper::HelperError;

/// Which helper stream a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStream {
    /// Standard output: the object itself.
    Stdout,
    /// Sanitized standard error, used when stdout was empty.
    Stderr,
    /// Both streams empty.
    None,
}

/// Outcome of fetching one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalResult {
    /// What was fetched.
    pub target: RetrievalTarget,
    /// Retrieved text, or sanitized error text. Empty means not found.
    pub raw_output: String,
    /// Stream `raw_output` was taken from.
    pub stream: OutputStream,
    /// Helper exit code, if it exited normally. Informational only.
    pub exit_code: Option<i32>,
}

impl RetrievalResult {
    /// Whether anything was retrieved.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !self.raw_output.is_empty()
    }
}

/// Fetches a single object from a remote host.
pub trait ObjectFetcher {
    /// Fetch `target` from `host`.
    ///
    /// A missing object is an `Ok` result with empty output.
    ///
    /// # Errors
    ///
    /// Returns `HelperError` only when the helper itself cannot be run; that
    /// ends the whole run.
    fn fetch(&self, host: &str, target: &RetrievalTarget) -> Result<RetrievalResult, HelperError>;
}

/// Pick the result text from decoded helper streams.
///
/// Non-empty stdout is the object. Otherwise stderr is sanitized and used;
/// if nothing but whitespace survives, the object was not found.
#[must_use]
pub fn reconcile_streams(stdout: String, stderr: &str) -> (String, OutputStream) {
    if !stdout.is_empty() {
        return (stdout, OutputStream::Stdout);
    }

    let sanitized = sanitize_error(stderr);
    if sanitized.trim().is_empty() {
        (String::new(), OutputStream::None)
    } else {
        (sanitized, OutputStream::Stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_wins() {
        let (out, stream) = reconcile_streams("Object: /A\r\n".to_owned(), "noise");
        assert_eq!(out, "Object: /A\r\n");
        assert_eq!(stream, OutputStream::Stdout);
    }

    #[test]
    fn test_stderr_sanitized_when_stdout_empty() {
        let (out, stream) =
            reconcile_streams(String::new(), "\x1b[31mCould not find /A on TERM01.\x1b[0m");
        assert_eq!(out, "Could not find /A on TERM01");
        assert_eq!(stream, OutputStream::Stderr);
    }

    #[test]
    fn test_noise_only_is_not_found() {
        let (out, stream) = reconcile_streams(String::new(), "\x1b[0m\r\n...\r\n");
        assert!(out.is_empty());
        assert_eq!(stream, OutputStream::None);
    }

    #[test]
    fn test_succeeded_tracks_emptiness() {
        let target = RetrievalTarget {
            object_path: "/A".to_owned(),
        };
        let mut result = RetrievalResult {
            target,
            raw_output: String::new(),
            stream: OutputStream::None,
            exit_code: Some(1),
        };
        assert!(!result.succeeded());
        result.raw_output = "x".to_owned();
        assert!(result.succeeded());
    }
}
