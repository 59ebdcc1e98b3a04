/// Serializable console output types.
///
/// These are what `--output json` writes; they are decoupled from the
/// domain's `TargetOutcome`.
use serde::{Deserialize, Serialize};

use crate::retrieve::{OutputStream, RetrieveError, TargetOutcome};

/// Per-target status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStatus {
    Retrieved,
    NotFound,
    SaveFailed,
}

impl ObjectStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Retrieved => "retrieved",
            Self::NotFound => "not found",
            Self::SaveFailed => "save failed",
        }
    }
}

/// One processed target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectOutput {
    /// Host the object was requested from.
    pub host: String,
    /// Requested object path.
    pub object_path: String,
    /// What happened.
    pub status: ObjectStatus,
    /// `stdout` or `stderr`; absent when nothing came back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    /// Retrieved text exactly as the helper produced it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// File the object was written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Write failure, for `save_failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ObjectOutput {
    /// Construct from a domain outcome.
    #[must_use]
    pub fn from_outcome(host: &str, outcome: &TargetOutcome) -> Self {
        let mut out = Self {
            host: host.to_owned(),
            object_path: outcome.target().object_path.clone(),
            status: ObjectStatus::NotFound,
            stream: None,
            content: None,
            file: None,
            error: None,
        };
        match outcome {
            TargetOutcome::Retrieved { result, file } => {
                out.status = ObjectStatus::Retrieved;
                out.stream = stream_name(result.stream);
                out.content = Some(result.raw_output.clone());
                out.file = file.as_ref().map(|f| f.path.display().to_string());
            }
            TargetOutcome::SaveFailed {
                result,
                path,
                error,
            } => {
                out.status = ObjectStatus::SaveFailed;
                out.stream = stream_name(result.stream);
                out.content = Some(result.raw_output.clone());
                out.file = Some(path.display().to_string());
                out.error = Some(error.clone());
            }
            TargetOutcome::NotFound { .. } => {}
        }
        out
    }
}

fn stream_name(stream: OutputStream) -> Option<String> {
    match stream {
        OutputStream::Stdout => Some("stdout".to_owned()),
        OutputStream::Stderr => Some("stderr".to_owned()),
        OutputStream::None => None,
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a run error. Errors outside the domain become
    /// `startup_error`.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        let code = err
            .downcast_ref::<RetrieveError>()
            .map_or("startup_error", RetrieveError::code);
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: format!("{err:#}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieve::{RetrievalResult, RetrievalTarget};

    fn target() -> RetrievalTarget {
        RetrievalTarget {
            object_path: "/Configurations/RSS/Data".to_owned(),
        }
    }

    #[test]
    fn test_not_found_serializes_without_content() {
        let out = ObjectOutput::from_outcome("TERM01", &TargetOutcome::NotFound { target: target() });
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["object_path"], "/Configurations/RSS/Data");
        assert!(json.get("content").is_none());
        assert!(json.get("stream").is_none());
    }

    #[test]
    fn test_retrieved_carries_raw_content() {
        let outcome = TargetOutcome::Retrieved {
            result: RetrievalResult {
                target: target(),
                raw_output: "Object: /Configurations/RSS/Data\r\n".to_owned(),
                stream: OutputStream::Stdout,
                exit_code: Some(0),
            },
            file: None,
        };
        let out = ObjectOutput::from_outcome("TERM01", &outcome);
        assert_eq!(out.status, ObjectStatus::Retrieved);
        assert_eq!(out.stream.as_deref(), Some("stdout"));
        assert_eq!(out.content.as_deref(), Some("Object: /Configurations/RSS/Data\r\n"));
    }

    #[test]
    fn test_error_envelope_uses_domain_code() {
        let err = anyhow::Error::new(RetrieveError::InvalidArguments {
            host: "TERM01".to_owned(),
        });
        let out = ErrorOutput::from_error(&err);
        assert!(!out.ok);
        assert_eq!(out.error.code, "invalid_arguments");

        let other = anyhow::anyhow!("no working directory");
        assert_eq!(ErrorOutput::from_error(&other).error.code, "startup_error");
    }
}
