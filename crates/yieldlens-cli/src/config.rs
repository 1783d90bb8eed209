// crates/yieldlens-cli/src/config.rs
//
// CLI configuration, loaded from a TOML file or populated with defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use yieldlens_rewards::FetchOptions;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default output format: "table", "json", or "csv".
    #[serde(default = "default_output")]
    pub output: String,

    /// Transactions requested per page when building reports.
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Retries per failed page.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Upper bound on pages fetched for one report.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Wait before the first retry of a failed page, doubled per retry.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_output() -> String {
    "table".to_string()
}

fn default_page_size() -> u64 {
    100
}

fn default_max_retries() -> u32 {
    3
}

fn default_max_pages() -> u32 {
    1_000
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: default_output(),
            page_size: default_page_size(),
            max_retries: default_max_retries(),
            max_pages: default_max_pages(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// `~/.yieldlens/config.toml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".yieldlens").join("config.toml"))
    }

    /// Paging limits for transaction reports.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            page_size: self.page_size,
            max_retries: self.max_retries,
            max_pages: self.max_pages,
            retry_backoff_ms: self.retry_backoff_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: CliConfig = toml::from_str("output = \"json\"\npage_size = 25\n").unwrap();
        assert_eq!(config.output, "json");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_backoff_ms, 500);
    }

    #[test]
    fn test_fetch_options() {
        let options = CliConfig::default().fetch_options();
        assert_eq!(options.page_size, 100);
        assert_eq!(options.max_pages, 1_000);
        assert_eq!(options.retry_backoff_ms, 500);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CliConfig::load("/nonexistent/yieldlens.toml").is_err());
    }
}
