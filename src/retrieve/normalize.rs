/// Output normalization: trailer stripping for persisted objects and error
/// text sanitizing.
///
/// The helper appends a fixed block of run-status lines after every
/// successful payload. The block size belongs to the helper, not to this
/// tool, so it is passed in (see `HelperConfig::trailer_lines`).
use std::sync::LazyLock;

use regex::Regex;

/// ANSI CSI sequences (`ESC [ ... final`), the bulk of the helper's error noise.
static CSI_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("CSI pattern is a valid regex")
});

/// Strip the helper's trailer from a retrieved object before writing it to disk.
///
/// Splits on `\n`, drops the last `trailer_lines` lines, joins the rest with
/// no separator and trims trailing `\r`/`\n`. Text without any `\n` carries
/// no trailer (this function's own output never does) and is only trimmed.
///
/// Fewer lines than the trailer yields an empty string.
#[must_use]
pub fn normalize_for_file(raw: &str, trailer_lines: usize) -> String {
    if !raw.contains('\n') {
        return trim_line_endings(raw).to_owned();
    }

    let lines: Vec<&str> = raw.split('\n').collect();
    let keep = lines.len().saturating_sub(trailer_lines);
    let joined = lines[..keep].concat();
    trim_line_endings(&joined).to_owned()
}

/// Remove everything but alphanumerics, whitespace and path separators.
///
/// Escape sequences are removed whole first so their parameter digits do not
/// leak into the result. Idempotent.
#[must_use]
pub fn sanitize_error(raw: &str) -> String {
    CSI_SEQUENCE
        .replace_all(raw, "")
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '\\' | '/'))
        .collect()
}

fn trim_line_endings(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n'])
}
