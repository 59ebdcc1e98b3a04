/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::WellKnownObjects;
use crate::retrieve::{RetrievalRequest, WellKnownFlag};

/// object-retriever: retrieve configuration objects from remote terminals.
#[derive(Debug, Parser)]
#[command(
    name = "object-retriever",
    about = "Retrieve configuration objects from a remote terminal",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// The host name of the target terminal.
    #[arg(short = 'H', long, value_name = "HOST")]
    pub hostname: String,

    /// The object to retrieve. Not compatible with the common retrieval flags.
    #[arg(
        short = 't',
        long,
        alias = "targetobject",
        value_name = "PATH",
        conflicts_with_all = ["enabled_services", "logging"]
    )]
    pub target_object: Option<String>,

    /// Retrieve the object denoting enabled services.
    #[arg(short = 'e', long, alias = "enabledservices")]
    pub enabled_services: bool,

    /// Retrieve the object denoting enabled logging.
    #[arg(short = 'l', long)]
    pub logging: bool,

    /// Also print each retrieved object to a file.
    #[arg(short = 'p', long, alias = "printfile")]
    pub print_file: bool,

    /// Directory for files written by --print-file (default: working directory).
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (default: object-retriever.toml in the working directory).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Console output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Print a summary table after all objects are processed.
    #[arg(long)]
    pub summary: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Retrieved objects verbatim, notices as plain lines.
    #[default]
    Text,
    /// One JSON object per target (newline-delimited).
    Json,
}

impl Cli {
    /// Effective output format, honoring `--json`.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }

    /// Build the retrieval request, pairing each flag with its configured object.
    #[must_use]
    pub fn to_request(&self, objects: &WellKnownObjects) -> RetrievalRequest {
        RetrievalRequest {
            host_name: self.hostname.clone(),
            direct_target: self.target_object.clone(),
            well_known: vec![
                WellKnownFlag::new(&objects.enabled_services, self.enabled_services),
                WellKnownFlag::new(&objects.enabled_logging, self.logging),
            ],
            persist_to_file: self.print_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("object-retriever").chain(args.iter().copied()))
    }

    #[test]
    fn test_well_known_flags_combine() {
        let cli = parse(&["-H", "TERM01", "-e", "-l", "-p"]).unwrap();
        let req = cli.to_request(&WellKnownObjects::default());
        assert_eq!(req.host_name, "TERM01");
        assert!(req.persist_to_file);
        assert!(req.well_known.iter().all(|f| f.selected));
        assert_eq!(req.well_known[0].object_path, "/Configurations/RSS/EnabledServices");
        assert_eq!(req.well_known[1].object_path, "/Configurations/EGA/Logging");
    }

    #[test]
    fn test_target_object_excludes_flags() {
        assert!(parse(&["-H", "TERM01", "-t", "/Configurations/X", "-e"]).is_err());
        assert!(parse(&["-H", "TERM01", "--targetobject", "/Configurations/X", "--logging"]).is_err());
    }

    #[test]
    fn test_hostname_required() {
        assert!(parse(&["-e"]).is_err());
    }

    #[test]
    fn test_no_selection_still_parses() {
        // Rejected later by the request check, not by the parser.
        let cli = parse(&["--hostname", "TERM01"]).unwrap();
        let req = cli.to_request(&WellKnownObjects::default());
        assert!(req.direct_target.is_none());
        assert!(req.well_known.iter().all(|f| !f.selected));
    }

    #[test]
    fn test_json_shorthand() {
        assert_eq!(parse(&["-H", "T", "-e", "--json"]).unwrap().format(), OutputFormat::Json);
        assert_eq!(parse(&["-H", "T", "-e"]).unwrap().format(), OutputFormat::Text);
    }
}
