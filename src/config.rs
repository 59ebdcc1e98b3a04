/// Runtime configuration loaded from an optional TOML file.
///
/// Every field has a default, so running without a config file behaves
/// like the stock tool: `PsExec.exe` in the working directory, the
/// administrative `c$` share probe, and the two built-in well-known objects.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::retrieve::RetrieveError;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "object-retriever.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote-execution helper settings.
    pub helper: HelperConfig,
    /// Host validation settings.
    pub host: HostConfig,
    /// Paths of the well-known objects selectable by flag.
    pub objects: WellKnownObjects,
    /// Log sink settings.
    pub log: LogConfig,
}

/// Text encoding of a helper output stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamEncoding {
    /// Little-endian UTF-16, the native Windows console encoding.
    #[default]
    #[serde(rename = "utf-16le")]
    Utf16Le,
    /// Plain UTF-8.
    #[serde(rename = "utf-8")]
    Utf8,
}

/// How the remote-execution helper is located and invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelperConfig {
    /// Helper location. Relative paths resolve against the working directory.
    pub path: PathBuf,
    /// Optional binary copied to `path` at startup and removed at shutdown.
    pub source: Option<PathBuf>,
    /// Remote command that lists an object tree; the object path is appended.
    pub list_tree_command: String,
    /// Encoding of the helper's standard output.
    pub stdout_encoding: StreamEncoding,
    /// Encoding of the helper's standard error.
    pub stderr_encoding: StreamEncoding,
    /// Run-status lines the helper appends after a successful payload.
    pub trailer_lines: usize,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("PsExec.exe"),
            source: None,
            list_tree_command: "WebRiposteObjectFile List Tree".to_owned(),
            stdout_encoding: StreamEncoding::Utf16Le,
            stderr_encoding: StreamEncoding::Utf16Le,
            trailer_lines: 3,
        }
    }
}

/// Host reachability probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Directory that must be enumerable for a host to count as valid.
    /// `{host}` is replaced with the host name.
    pub share_template: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            share_template: r"\\{host}\c$".to_owned(),
        }
    }
}

/// Object paths behind the well-known retrieval flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WellKnownObjects {
    /// Object behind `--enabled-services`.
    pub enabled_services: String,
    /// Object behind `--logging`.
    pub enabled_logging: String,
}

impl Default for WellKnownObjects {
    fn default() -> Self {
        Self {
            enabled_services: "/Configurations/RSS/EnabledServices".to_owned(),
            enabled_logging: "/Configurations/EGA/Logging".to_owned(),
        }
    }
}

/// Log sink settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Directory for the dated log file. Defaults to the working directory.
    pub directory: Option<PathBuf>,
    /// Log file name prefix; the date and `.log` are appended.
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: "ObjectRetriever".to_owned(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Config` on malformed TOML or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, RetrieveError> {
        toml::from_str(text).map_err(|e| RetrieveError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RetrieveError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| RetrieveError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `object-retriever.toml` in
    /// `work_dir` is used when present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::Config` if the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, work_dir: &Path) -> Result<Self, RetrieveError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback = work_dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::from_file(&fallback)
        } else {
            Ok(Self::default())
        }
    }
}
