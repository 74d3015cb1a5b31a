//! Run configuration
//!
//! Holds the sentinel labels that mark a node for renaming plus the input and
//! output paths of a single run. Defaults match the historical layout of the
//! message tables (`./json/3762.json` in, `3762_processed.json` out).
//!
//! # Environment Variable
//!
//! `TABID_SENTINELS` replaces the default sentinel set with a comma-separated
//! list when the config is built via [`PipelineConfig::from_env`]:
//!
//! ```bash
//! TABID_SENTINELS="上行报文,下行报文,应答报文" tabid tables.json
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::{Result, TabidError};

/// Label of the upstream message node
pub const UPSTREAM_LABEL: &str = "上行报文";

/// Label of the downstream message node
pub const DOWNSTREAM_LABEL: &str = "下行报文";

/// Input path used when none is given
pub const DEFAULT_INPUT: &str = "./json/3762.json";

/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "3762_processed.json";

/// Environment variable overriding the sentinel set
pub const SENTINELS_ENV: &str = "TABID_SENTINELS";

/// The default sentinel set: upstream and downstream message labels
pub fn default_sentinels() -> BTreeSet<String> {
    [UPSTREAM_LABEL, DOWNSTREAM_LABEL]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Split a comma-separated sentinel list, dropping blank entries
pub fn parse_sentinel_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Everything a single run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Ids that get prefixed with their ancestors' ids
    pub sentinel_labels: BTreeSet<String>,
    /// Document to read (`-` for stdin)
    pub input: PathBuf,
    /// Where the annotated document goes (`-` for stdout)
    pub output: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sentinel_labels: default_sentinels(),
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl PipelineConfig {
    /// Defaults, with the sentinel set taken from `TABID_SENTINELS` if set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(SENTINELS_ENV) {
            config.apply_sentinel_override(&raw);
        }
        config
    }

    fn apply_sentinel_override(&mut self, raw: &str) {
        let labels = parse_sentinel_list(raw);
        if labels.is_empty() {
            log::warn!("{SENTINELS_ENV} is set but lists no labels, keeping defaults");
        } else {
            log::info!("Sentinel labels overridden via {SENTINELS_ENV}: {labels:?}");
            self.sentinel_labels = labels;
        }
    }

    /// Reject configurations that can never produce a rewrite
    pub fn validate(&self) -> Result<()> {
        if self.sentinel_labels.is_empty() {
            return Err(TabidError::Config("no sentinel labels configured".into()));
        }
        if self.sentinel_labels.iter().any(|label| label.is_empty()) {
            return Err(TabidError::Config("sentinel labels must not be empty".into()));
        }
        if self.input.as_os_str().is_empty() {
            return Err(TabidError::Config("input path is empty".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(TabidError::Config("output path is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert!(config.sentinel_labels.contains(UPSTREAM_LABEL));
        assert!(config.sentinel_labels.contains(DOWNSTREAM_LABEL));
        assert_eq!(config.sentinel_labels.len(), 2);
        assert_eq!(config.input, PathBuf::from("./json/3762.json"));
        assert_eq!(config.output, PathBuf::from("3762_processed.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sentinel_list_trims_and_drops_blanks() {
        let labels = parse_sentinel_list(" a , ,b,,a ");
        assert_eq!(labels.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_override_with_blank_list_keeps_defaults() {
        let mut config = PipelineConfig::default();
        config.apply_sentinel_override(" , ");
        assert_eq!(config.sentinel_labels, default_sentinels());

        config.apply_sentinel_override("reply");
        assert_eq!(config.sentinel_labels.len(), 1);
        assert!(config.sentinel_labels.contains("reply"));
    }

    #[test]
    fn test_validate_rejects_empty_sentinels() {
        let config = PipelineConfig {
            sentinel_labels: BTreeSet::new(),
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(TabidError::Config(_))));

        let config = PipelineConfig {
            sentinel_labels: [String::new()].into_iter().collect(),
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(TabidError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let config = PipelineConfig {
            output: PathBuf::new(),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
