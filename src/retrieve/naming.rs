/// Output file naming for persisted objects.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Labels the helper prints in front of the object path on the header line.
const HEADER_LABELS: [&str; 2] = ["Object", "Path"];

/// Characters rejected in Windows file names. Applied on every platform so a
/// file written anywhere stays valid on the terminals' own machines.
const ILLEGAL_FILE_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Derive a file name (without extension) from a retrieved object.
///
/// Takes the header line (everything before the first `\n`, or the whole text
/// if there is none), removes the `Object`/`Path` labels, appends
/// `-dd-MM-yyyy` for `date`, then strips characters illegal in file names.
/// Two objects with the same header on the same day get the same name.
#[must_use]
pub fn derive_file_name(retrieved: &str, date: NaiveDate) -> String {
    let header = retrieved.split('\n').next().unwrap_or_default();
    let mut label = header.to_owned();
    for lbl in HEADER_LABELS {
        label = label.replace(lbl, "");
    }

    let label = strip_illegal_chars(&label);
    format!("{}-{}", label.trim(), date.format("%d-%m-%Y"))
}

/// Full path of the file a host's object is persisted to:
/// `<dir>/<HOST>-<name>.txt`.
#[must_use]
pub fn output_file_path(dir: &Path, host: &str, file_name: &str) -> PathBuf {
    let host = strip_illegal_chars(&host.to_uppercase());
    dir.join(format!("{host}-{file_name}.txt"))
}

fn strip_illegal_chars(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() && !ILLEGAL_FILE_NAME_CHARS.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_header_labels_removed_and_date_appended() {
        let name = derive_file_name("Object: /Configurations/RSS/Data\nmore text", jan_15());
        assert_eq!(name, "ConfigurationsRSSData-15-01-2024");
        assert!(!name.contains("Object"));
        assert!(name.ends_with("-15-01-2024"));
    }

    #[test]
    fn test_same_input_same_name() {
        let content = "Path: /Configurations/EGA/Logging\r\nLevel = 3\r\n";
        assert_eq!(
            derive_file_name(content, jan_15()),
            derive_file_name(content, jan_15())
        );
        assert_eq!(
            derive_file_name(content, jan_15()),
            "ConfigurationsEGALogging-15-01-2024"
        );
    }

    #[test]
    fn test_date_changes_name() {
        let content = "Object: /A\n";
        let other = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        assert_ne!(derive_file_name(content, jan_15()), derive_file_name(content, other));
    }

    #[test]
    fn test_no_newline_uses_whole_text() {
        assert_eq!(derive_file_name("Object: /A/B", jan_15()), "AB-15-01-2024");
        assert_eq!(derive_file_name("", jan_15()), "-15-01-2024");
    }

    #[test]
    fn test_output_file_path_uppercases_host() {
        let path = output_file_path(Path::new("out"), "term01", "AB-15-01-2024");
        assert_eq!(path, Path::new("out").join("TERM01-AB-15-01-2024.txt"));
    }
}
