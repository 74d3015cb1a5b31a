//! CLI argument definitions using Clap v4

// this_file: crates/tabid-cli/src/cli.rs

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tabid_core::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use tabid_core::PipelineConfig;

/// tabid - prefix upstream/downstream message ids with their ancestors' ids
#[derive(Parser, Debug)]
#[command(name = "tabid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON document to annotate ("-" reads stdin)
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the annotated document ("-" writes stdout)
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Id that gets prefixed (repeatable; replaces the default labels)
    ///
    /// Defaults to 上行报文 and 下行报文, or to the comma-separated list in
    /// TABID_SENTINELS when that is set.
    #[arg(short = 's', long = "sentinel", action = ArgAction::Append)]
    pub sentinels: Vec<String>,

    /// Suppress the status line
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print rewrite statistics and enable info logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Merge arguments over the environment-derived defaults
    pub fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::from_env();
        config.input = self.input.clone();
        config.output = self.output.clone();
        if !self.sentinels.is_empty() {
            config.sentinel_labels = self.sentinels.iter().cloned().collect();
        }
        config
    }

    /// True when the annotated document goes to stdout
    pub fn writes_stdout(&self) -> bool {
        self.output.as_os_str() == tabid_core::pipeline::STDIO_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["tabid"]);
        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(cli.sentinels.is_empty());
        assert!(!cli.writes_stdout());
    }

    #[test]
    fn test_sentinels_replace_defaults() {
        let cli = Cli::parse_from(["tabid", "in.json", "-o", "-", "-s", "a", "--sentinel", "b"]);
        let config = cli.to_config();
        assert_eq!(config.input, PathBuf::from("in.json"));
        assert!(cli.writes_stdout());
        assert_eq!(
            config.sentinel_labels.into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["tabid", "-q", "-v"]).is_err());
    }
}
