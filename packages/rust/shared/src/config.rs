//! Application configuration for joblens.
//!
//! User config lives at `~/.joblens/joblens.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JoblensError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "joblens.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".joblens";

// ---------------------------------------------------------------------------
// Config structs (matching joblens.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Fetch policies.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Hire-rate threshold (percent) for the high-trust classification.
    #[serde(default = "default_threshold")]
    pub hire_rate_threshold: u8,

    /// Maximum concurrent job fetches.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// Whether to follow client-profile links for contact enrichment.
    #[serde(default)]
    pub enrich_profiles: bool,

    /// Default CSV output path.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            hire_rate_threshold: default_threshold(),
            concurrency: default_concurrency(),
            enrich_profiles: false,
            output: default_output(),
        }
    }
}

fn default_threshold() -> u8 {
    50
}
fn default_concurrency() -> u32 {
    1
}
fn default_output() -> String {
    "jobs.csv".into()
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum ms between primary fetches.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_ms: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            rate_limit_ms: default_rate_limit(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_rate_limit() -> u64 {
    200
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".into()
}

// ---------------------------------------------------------------------------
// Scrape config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime scrape configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Hire-rate threshold (0–100) for the high-trust classification.
    pub hire_rate_threshold: u8,
    /// Maximum concurrent job fetches.
    pub concurrency: u32,
    /// Whether to fetch linked client-profile pages for contact enrichment.
    pub enrich_profiles: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Minimum ms between primary fetches.
    pub rate_limit_ms: u64,
    /// User-Agent header.
    pub user_agent: String,
}

impl From<&AppConfig> for ScrapeConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            hire_rate_threshold: config.defaults.hire_rate_threshold,
            concurrency: config.defaults.concurrency,
            enrich_profiles: config.defaults.enrich_profiles,
            timeout_secs: config.fetch.timeout_secs,
            rate_limit_ms: config.fetch.rate_limit_ms,
            user_agent: config.fetch.user_agent.clone(),
        }
    }
}

impl ScrapeConfig {
    /// Check that the merged configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.hire_rate_threshold > 100 {
            return Err(JoblensError::validation(format!(
                "hire_rate_threshold {} out of range (expected 0–100)",
                self.hire_rate_threshold
            )));
        }
        if self.concurrency == 0 {
            return Err(JoblensError::validation("concurrency must be at least 1"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.joblens/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| JoblensError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.joblens/joblens.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| JoblensError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| JoblensError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| JoblensError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| JoblensError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| JoblensError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("hire_rate_threshold"));
        assert!(toml_str.contains("timeout_secs"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.hire_rate_threshold, 50);
        assert_eq!(parsed.fetch.timeout_secs, 30);
        assert!(!parsed.defaults.enrich_profiles);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
hire_rate_threshold = 75
enrich_profiles = true
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.hire_rate_threshold, 75);
        assert!(config.defaults.enrich_profiles);
        // Untouched sections keep defaults
        assert_eq!(config.defaults.concurrency, 1);
        assert_eq!(config.fetch.rate_limit_ms, 200);
    }

    #[test]
    fn scrape_config_from_app_config() {
        let app = AppConfig::default();
        let scrape = ScrapeConfig::from(&app);
        assert_eq!(scrape.hire_rate_threshold, 50);
        assert_eq!(scrape.concurrency, 1);
        assert_eq!(scrape.timeout_secs, 30);
        assert!(scrape.validate().is_ok());
    }

    #[test]
    fn scrape_config_rejects_bad_values() {
        let mut scrape = ScrapeConfig::from(&AppConfig::default());
        scrape.hire_rate_threshold = 101;
        assert!(scrape.validate().is_err());

        let mut scrape = ScrapeConfig::from(&AppConfig::default());
        scrape.concurrency = 0;
        assert!(scrape.validate().is_err());
    }
}
