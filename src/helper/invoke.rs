/// Subprocess invocation of the remote-execution helper.
///
/// The command line is
/// `<helper> /s -nobanner \\<host> <list-tree command...> <object path>`.
/// The call blocks until the helper exits; there is no timeout, so a remote
/// that never answers stalls the run.
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::errors::HelperError;
use crate::config::{HelperConfig, StreamEncoding};
use crate::retrieve::{ObjectFetcher, RetrievalResult, RetrievalTarget, reconcile_streams};

/// Fetches objects by running the helper once per target.
#[derive(Debug, Clone)]
pub struct HelperFetcher {
    program: PathBuf,
    list_tree_command: Vec<String>,
    stdout_encoding: StreamEncoding,
    stderr_encoding: StreamEncoding,
}

impl HelperFetcher {
    #[must_use]
    pub fn new(program: &Path, config: &HelperConfig) -> Self {
        Self {
            program: program.to_path_buf(),
            list_tree_command: config
                .list_tree_command
                .split_whitespace()
                .map(str::to_owned)
                .collect(),
            stdout_encoding: config.stdout_encoding,
            stderr_encoding: config.stderr_encoding,
        }
    }

    /// Helper arguments for fetching `object_path` from `host`.
    #[must_use]
    pub fn arguments(&self, host: &str, object_path: &str) -> Vec<String> {
        let mut args = vec![
            "/s".to_owned(),
            "-nobanner".to_owned(),
            format!(r"\\{host}"),
        ];
        args.extend(self.list_tree_command.iter().cloned());
        args.push(object_path.to_owned());
        args
    }
}

impl ObjectFetcher for HelperFetcher {
    fn fetch(&self, host: &str, target: &RetrievalTarget) -> Result<RetrievalResult, HelperError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.arguments(host, &target.object_path))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_window(&mut cmd);

        tracing::debug!(host, object = %target.object_path, program = %self.program.display(), "launching helper");
        let output = cmd.output().map_err(|source| HelperError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdout = decode(&output.stdout, self.stdout_encoding);
        let stderr = decode(&output.stderr, self.stderr_encoding);
        let exit_code = output.status.code();
        tracing::debug!(
            host,
            object = %target.object_path,
            ?exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "helper exited"
        );

        let (raw_output, stream) = reconcile_streams(stdout, &stderr);
        Ok(RetrievalResult {
            target: target.clone(),
            raw_output,
            stream,
            exit_code,
        })
    }
}

/// Decode a captured stream. A leading byte-order mark is dropped and a
/// dangling odd byte in UTF-16 input is ignored.
#[must_use]
pub fn decode(bytes: &[u8], encoding: StreamEncoding) -> String {
    let text = match encoding {
        StreamEncoding::Utf16Le => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        StreamEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
    };
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_owned(),
        None => text,
    }
}

#[cfg(windows)]
fn hide_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_window(_cmd: &mut Command) {}
