/// Provisioning and teardown of the helper executable.
use std::path::{Path, PathBuf};

use super::errors::HelperError;
use crate::config::HelperConfig;

/// The helper executable for the lifetime of a run.
///
/// When a `source` is configured the binary is copied into place on
/// `provision` and deleted again when the guard drops, on every exit path.
/// A helper that was already present is used as-is and left alone.
#[derive(Debug)]
pub struct HelperBinary {
    path: PathBuf,
    owned: bool,
}

impl HelperBinary {
    /// Put the helper in place under `work_dir`.
    ///
    /// # Errors
    ///
    /// Returns `HelperError::Provision` if the copy fails, or
    /// `HelperError::Missing` if there is no source and no helper at the path.
    pub fn provision(config: &HelperConfig, work_dir: &Path) -> Result<Self, HelperError> {
        let path = work_dir.join(&config.path);

        if let Some(source) = &config.source {
            std::fs::copy(source, &path).map_err(|e| HelperError::Provision {
                from: source.clone(),
                to: path.clone(),
                source: e,
            })?;
            tracing::info!(path = %path.display(), "helper provisioned");
            return Ok(Self { path, owned: true });
        }

        if path.is_file() {
            tracing::debug!(path = %path.display(), "using existing helper");
            Ok(Self { path, owned: false })
        } else {
            Err(HelperError::Missing { path })
        }
    }

    /// Location of the executable.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for HelperBinary {
    fn drop(&mut self) {
        if !self.owned {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::info!(path = %self.path.display(), "helper removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove helper");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(path: &str, source: Option<PathBuf>) -> HelperConfig {
        HelperConfig {
            path: PathBuf::from(path),
            source,
            ..HelperConfig::default()
        }
    }

    #[test]
    fn test_provisioned_helper_removed_on_drop() {
        let src_dir = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        let source = src_dir.path().join("PsExec.exe");
        std::fs::write(&source, b"MZ").unwrap();

        let helper = HelperBinary::provision(&config("PsExec.exe", Some(source)), work.path()).unwrap();
        let path = helper.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"MZ");

        drop(helper);
        assert!(!path.exists());
    }

    #[test]
    fn test_existing_helper_left_in_place() {
        let work = tempfile::tempdir().unwrap();
        let path = work.path().join("PsExec.exe");
        std::fs::write(&path, b"MZ").unwrap();

        let helper = HelperBinary::provision(&config("PsExec.exe", None), work.path()).unwrap();
        assert_eq!(helper.path(), path);
        drop(helper);
        assert!(path.exists());
    }

    #[test]
    fn test_missing_helper_is_error() {
        let work = tempfile::tempdir().unwrap();
        let err = HelperBinary::provision(&config("PsExec.exe", None), work.path()).unwrap_err();
        assert!(matches!(err, HelperError::Missing { .. }));
    }

    #[test]
    fn test_missing_source_is_provision_error() {
        let work = tempfile::tempdir().unwrap();
        let source = work.path().join("nowhere").join("PsExec.exe");
        let err = HelperBinary::provision(&config("PsExec.exe", Some(source)), work.path()).unwrap_err();
        assert!(matches!(err, HelperError::Provision { .. }));
    }
}
