//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sagatree/sagatree.toml`
//! 3. Local config: `<dir>/.sagatree.toml` (usually the working directory)
//! 4. Environment variables: `SAGATREE_*` prefix
//!
//! Lists replace wholesale at every layer: candidate order matters, so there
//! is no union merge.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub base: Option<String>,
    pub sources: Option<Vec<String>>,
    pub saga_files: Option<Vec<String>>,
    pub http_timeout_secs: Option<u64>,
}

/// Unified configuration for sagatree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory or http(s) URL the candidate sources are relative to
    pub base: String,
    /// Dataset candidates, tried in order
    pub sources: Vec<String>,
    /// Per-saga detail files under `data/`
    pub saga_files: Vec<String>,
    /// Timeout for HTTP sources
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base: ".".into(),
            sources: vec![
                "one_piece_anime.json".into(),
                "data/one_piece_anime.json".into(),
            ],
            saga_files: vec![
                "east_blue_saga.json".into(),
                "sky_island_saga.json".into(),
                "water_7_saga.json".into(),
                "thriller_bark_saga.json".into(),
                "summit_war_saga.json".into(),
            ],
            http_timeout_secs: 10,
        }
    }
}

/// Get the XDG config directory for sagatree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sagatree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sagatree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".sagatree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the base location.
    fn expand_paths(&mut self) {
        self.base = shellexpand::full(&self.base)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| self.base.clone());
    }

    /// Overlay wins where specified; lists are replaced, not merged.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base: overlay.base.clone().unwrap_or_else(|| self.base.clone()),
            sources: overlay
                .sources
                .clone()
                .unwrap_or_else(|| self.sources.clone()),
            saga_files: overlay
                .saga_files
                .clone()
                .unwrap_or_else(|| self.saga_files.clone()),
            http_timeout_secs: overlay.http_timeout_secs.unwrap_or(self.http_timeout_secs),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.sagatree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply SAGATREE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        Self::apply_env(settings, env_source())
    }

    /// A variable that is set but does not parse is an error, not ignored.
    fn apply_env(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder().add_source(env).build().map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "base")? {
            settings.base = val;
        }
        if let Some(val) = env_value::<Vec<String>>(&config, "sources")? {
            settings.sources = val;
        }
        if let Some(val) = env_value::<Vec<String>>(&config, "saga_files")? {
            settings.saga_files = val;
        }
        if let Some(val) = env_value::<u64>(&config, "http_timeout_secs")? {
            settings.http_timeout_secs = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.sources.is_empty() {
            return Err(ApplicationError::Config {
                message: "sources must list at least one dataset location".into(),
            });
        }
        if self.http_timeout_secs == 0 {
            return Err(ApplicationError::Config {
                message: "http_timeout_secs must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# sagatree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/sagatree/sagatree.toml
#   Local:  ./.sagatree.toml
#   Env:    SAGATREE_* environment variables (lists comma-separated)
#   Flag:   --base
#
# Lists REPLACE the inherited value; candidate order is significant.

# Directory or http(s) URL the dataset candidates are relative to
# base = "."

# Dataset candidates, tried in order until one loads
# sources = ["one_piece_anime.json", "data/one_piece_anime.json"]

# Optional per-saga detail files (read from <base>/data/)
# saga_files = ["east_blue_saga.json", "sky_island_saga.json"]

# Timeout for HTTP sources
# http_timeout_secs = 10
"#
        .to_string()
    }
}

/// `SAGATREE_<KEY>`; `__` separates nested keys, `,` list items.
fn env_source() -> Environment {
    Environment::with_prefix("SAGATREE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("sources")
        .with_list_parse_key("saga_files")
}

fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("SAGATREE_{}: {e}", key.to_uppercase()),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_two_candidates_in_fixed_order() {
        let settings = Settings::default();
        assert_eq!(
            settings.sources,
            ["one_piece_anime.json", "data/one_piece_anime.json"]
        );
        assert_eq!(settings.saga_files.len(), 5);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let overlay = RawSettings {
            base: Some("https://example.org/op".into()),
            sources: None,
            saga_files: Some(vec![]),
            http_timeout_secs: None,
        };
        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.base, "https://example.org/op");
        assert_eq!(merged.sources, Settings::default().sources);
        assert!(merged.saga_files.is_empty());
        assert_eq!(merged.http_timeout_secs, 10);
    }

    #[test]
    fn given_tilde_in_base_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            base: "~/anime".into(),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.base.starts_with(&home), "base: {}", settings.base);
        assert!(!settings.base.contains('~'));
    }

    #[test]
    fn given_empty_sources_when_validating_then_config_error() {
        let settings = Settings {
            sources: vec![],
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: ::config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env_source().source(Some(map))
    }

    #[test]
    fn given_single_underscore_vars_when_applying_env_then_fields_replaced() {
        let settings = Settings::apply_env(
            Settings::default(),
            env(&[
                ("SAGATREE_BASE", "/srv/op"),
                ("SAGATREE_SOURCES", "a.json,b.json"),
                ("SAGATREE_SAGA_FILES", "x.json"),
                ("SAGATREE_HTTP_TIMEOUT_SECS", "3"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.base, "/srv/op");
        assert_eq!(settings.sources, ["a.json", "b.json"]);
        assert_eq!(settings.saga_files, ["x.json"]);
        assert_eq!(settings.http_timeout_secs, 3);
    }

    #[test]
    fn given_no_vars_when_applying_env_then_unchanged() {
        let settings = Settings::apply_env(Settings::default(), env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_unparsable_timeout_when_applying_env_then_config_error() {
        let err = Settings::apply_env(
            Settings::default(),
            env(&[("SAGATREE_HTTP_TIMEOUT_SECS", "abc")]),
        )
        .unwrap_err();

        assert!(matches!(err, ApplicationError::Config { .. }));
        assert!(err.to_string().contains("SAGATREE_HTTP_TIMEOUT_SECS"), "{err}");
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.base.is_none());
    }
}
