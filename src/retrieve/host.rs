/// Host reachability check via the administrative share probe.
use std::path::PathBuf;

/// Decides whether a host may be targeted before any remote call is made.
pub trait HostValidator {
    /// Whether `host` is a reachable, authorized remote target.
    fn is_valid(&self, host: &str) -> bool;
}

/// Probes an administrative share (`\\<host>\c$` by default).
///
/// Being able to enumerate the share proves both that the host answers and
/// that the caller already holds credentials for it. There are no retries: a
/// transient network failure reads the same as an invalid host.
#[derive(Debug, Clone)]
pub struct AdminShareValidator {
    template: String,
}

impl AdminShareValidator {
    /// Build a validator from a share template containing `{host}`.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The share path probed for `host`.
    #[must_use]
    pub fn share_path(&self, host: &str) -> PathBuf {
        PathBuf::from(self.template.replace("{host}", host))
    }
}

impl HostValidator for AdminShareValidator {
    fn is_valid(&self, host: &str) -> bool {
        if !is_plausible_host_name(host) {
            tracing::debug!(host, "host name rejected before probing");
            return false;
        }

        let share = self.share_path(host);
        match std::fs::read_dir(&share) {
            Ok(_) => {
                tracing::debug!(host, share = %share.display(), "administrative share reachable");
                true
            }
            Err(e) => {
                tracing::info!(host, share = %share.display(), error = %e, "administrative share probe failed");
                false
            }
        }
    }
}

/// Cheap syntactic gate: a host name must not be empty or smuggle path syntax
/// into the share template.
fn is_plausible_host_name(host: &str) -> bool {
    !host.is_empty()
        && !host.starts_with('.')
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
}
