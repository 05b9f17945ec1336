//! Configuration file loading.
//!
//! The configuration lives in a small key-value file (default
//! `zeek-otx.conf`) with an `[otx]` table:
//!
//! ```toml
//! [otx]
//! api_key = "0123456789abcdef"
//! days_of_history = 7
//! outfile = "/var/zeek/intel/otx.dat"
//! do_notice = "T"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of the `[otx]` configuration table.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Config {
    /// OTXv2 API key.
    pub api_key: String,
    /// How many days back to request modified pulses for.
    pub days_of_history: i64,
    /// Final output path of the intel file.
    pub outfile: PathBuf,
    /// `meta.do_notice` value, written verbatim into every record.
    pub do_notice: String,
}

/// Top-level configuration file structure.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    otx: Config,
}

/// Loads the configuration from `path`.
pub(crate) fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid config file: {}", path.display()))
}

fn parse(text: &str) -> Result<Config> {
    let file: ConfigFile = toml::from_str(text)?;
    Ok(file.otx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = parse(
            r#"
            [otx]
            api_key = "abc123"
            days_of_history = 7
            outfile = "/var/zeek/intel/otx.dat"
            do_notice = "T"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.days_of_history, 7);
        assert_eq!(config.outfile, PathBuf::from("/var/zeek/intel/otx.dat"));
        assert_eq!(config.do_notice, "T");
    }

    #[test]
    fn test_do_notice_is_verbatim() {
        let config = parse(
            r#"
            [otx]
            api_key = "k"
            days_of_history = 1
            outfile = "o"
            do_notice = "false"
            "#,
        )
        .unwrap();

        // Not coerced to a boolean; Zeek sees exactly what was configured
        assert_eq!(config.do_notice, "false");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let result = parse(
            r#"
            [otx]
            api_key = "k"
            days_of_history = 1
            outfile = "o"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_table_is_an_error() {
        assert!(parse(r#"api_key = "k""#).is_err());
    }
}
