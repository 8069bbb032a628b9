//! Configuration loading, validation, and management for Strata.
//!
//! Loads configuration from `~/.strata/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strata_core::CascadeRemoval;

/// The root configuration structure.
///
/// Maps directly to `~/.strata/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default log filter when `RUST_LOG` is unset (e.g. "info", "strata=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Registry behaviour
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Which catalogs to load at startup
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Agent tool settings
    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_true() -> bool {
    true
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// "retain_shared" keeps stages/strategies still reachable from another
    /// registered container; "unconditional" drops them anyway.
    #[serde(default)]
    pub cascade_removal: CascadeRemoval,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Register the embedded EDA catalog
    #[serde(default = "default_true")]
    pub builtin: bool,

    /// Extra catalog files, loaded in order after the built-in one
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            paths: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Append the planning instructions to listing tool outputs
    #[serde(default = "default_true")]
    pub include_instructions: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            include_instructions: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.strata/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `STRATA_LOG`: default log filter
    /// - `STRATA_CASCADE_REMOVAL`: `retain_shared` or `unconditional`
    /// - `STRATA_CATALOG`: extra catalog files, joined like `PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides read through `lookup` (the process environment in
    /// [`AppConfig::load`]).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("STRATA_LOG") {
            self.log_level = level;
        }

        if let Some(policy) = lookup("STRATA_CASCADE_REMOVAL") {
            self.registry.cascade_removal = policy
                .parse()
                .map_err(|e: strata_core::RegistryError| ConfigError::ValidationError(e.to_string()))?;
        }

        if let Some(paths) = lookup("STRATA_CATALOG") {
            self.catalog
                .paths
                .extend(std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()));
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".strata")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.log_level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) && !level.contains('=') {
            return Err(ConfigError::ValidationError(format!(
                "log_level '{}' is not one of {} or a target=level directive",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if self.catalog.paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::ValidationError(
                "catalog.paths must not contain empty entries".into(),
            ));
        }

        if !self.catalog.builtin && self.catalog.paths.is_empty() {
            tracing::warn!("Built-in catalog disabled and no catalog paths configured");
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            registry: RegistryConfig::default(),
            catalog: CatalogConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.catalog.builtin);
        assert!(config.tools.include_instructions);
        assert_eq!(config.registry.cascade_removal, CascadeRemoval::RetainShared);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.log_level, config.log_level);
        assert_eq!(parsed.registry.cascade_removal, config.registry.cascade_removal);
    }

    #[test]
    fn invalid_log_level_rejected() {
        let config = AppConfig {
            log_level: "loud".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn directive_log_level_accepted() {
        let config = AppConfig {
            log_level: "strata_core=debug".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"

[registry]
cascade_removal = "unconditional"

[catalog]
builtin = false
paths = ["/srv/catalogs/nlp.toml"]

[tools]
include_instructions = false
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.registry.cascade_removal, CascadeRemoval::Unconditional);
        assert!(!config.catalog.builtin);
        assert_eq!(config.catalog.paths, [PathBuf::from("/srv/catalogs/nlp.toml")]);
        assert!(!config.tools.include_instructions);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[registry]\ncascade_removal = \"sometimes\"\n").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, String> = HashMap::from([
            ("STRATA_LOG", "warn".to_string()),
            ("STRATA_CASCADE_REMOVAL", "unconditional".to_string()),
            ("STRATA_CATALOG", "/a.toml".to_string()),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|key| env.get(key).cloned())
            .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.registry.cascade_removal, CascadeRemoval::Unconditional);
        assert_eq!(config.catalog.paths, [PathBuf::from("/a.toml")]);
    }

    #[test]
    fn bad_env_policy_is_validation_error() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(|key| (key == "STRATA_CASCADE_REMOVAL").then(|| "never".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("retain_shared"));
        assert!(toml_str.contains("log_level"));
    }
}
