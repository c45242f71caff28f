//! Configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument / environment variable (handled by the binary's
//!    CLI parser and passed in as [`ConfigOverrides`])
//! 2. TOML config file
//! 3. Compiled default
//!
//! A missing config file is normal; an unreadable or malformed one produces a
//! warning and the remaining tiers still apply. Startup never fails here.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::schedule::CountPolicy;
use crate::{Error, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
const DATABASE_FILE: &str = "showbill.db";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database: Option<PathBuf>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub count_policy: Option<CountPolicy>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database: Option<PathBuf>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub count_policy: Option<CountPolicy>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ShowbillConfig {
    pub database: PathBuf,
    pub bind: String,
    pub log_level: String,
    pub count_policy: CountPolicy,
    /// Config file that contributed values, if any
    pub config_source: Option<PathBuf>,
    /// Problems met while resolving; logged once tracing is up
    pub warnings: Vec<String>,
}

impl ShowbillConfig {
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        let mut warnings = Vec::new();

        let (file, config_source) = match locate_config_file(overrides.config_file.as_deref()) {
            Some(path) => match load_toml_config(&path) {
                Ok(file) => (file, Some(path)),
                Err(e) => {
                    warnings.push(format!("Ignoring config file {}: {}", path.display(), e));
                    (TomlConfig::default(), None)
                }
            },
            None => {
                if let Some(explicit) = &overrides.config_file {
                    warnings.push(format!(
                        "Config file {} not found, using defaults",
                        explicit.display()
                    ));
                }
                (TomlConfig::default(), None)
            }
        };

        Self {
            database: overrides
                .database
                .or(file.database)
                .unwrap_or_else(default_database_path),
            bind: overrides
                .bind
                .or(file.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            count_policy: overrides
                .count_policy
                .or(file.listing.count_policy)
                .unwrap_or_default(),
            config_source,
            warnings,
        }
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Explicit path if it exists, else the first existing platform location
fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    let user_config = dirs::config_dir().map(|d| d.join("showbill").join("config.toml"));
    let system_config = PathBuf::from("/etc/showbill/config.toml");

    user_config
        .into_iter()
        .chain(cfg!(target_os = "linux").then_some(system_config))
        .find(|p| p.exists())
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("showbill"))
        .unwrap_or_else(|| PathBuf::from("./showbill_data"))
        .join(DATABASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_path() {
        let path = default_database_path();
        assert!(path.ends_with("showbill/showbill.db") || path.ends_with("showbill_data/showbill.db"));
    }

    #[test]
    fn test_parse_full_toml() {
        let config: TomlConfig = toml::from_str(
            r#"
            database = "/srv/showbill/showbill.db"
            bind = "0.0.0.0:8080"
            log_level = "debug"

            [listing]
            count_policy = "all_shows"
            "#,
        )
        .unwrap();

        assert_eq!(config.database, Some(PathBuf::from("/srv/showbill/showbill.db")));
        assert_eq!(config.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.listing.count_policy, Some(CountPolicy::AllShows));
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let parsed: std::result::Result<TomlConfig, _> =
            toml::from_str("[listing]\ncount_policy = \"someday\"\n");
        assert!(parsed.is_err());
    }
}
