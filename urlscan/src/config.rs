// Settings resolution: defaults, config file, environment, command line

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/urlscan/config.toml";

pub const ENV_ORIGIN: &str = "URLSCAN_ORIGIN";
pub const ENV_BASE_API: &str = "URLSCAN_BASE_API";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the front end is "served from"; an empty `base_api` talks to it.
    pub origin: String,
    /// Prefix in front of `/urlvalidator/...`. Empty means same origin.
    pub base_api: String,
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.into(),
            base_api: String::new(),
            user_agent: None,
        }
    }
}

impl Settings {
    /// Reads a TOML settings file. `Ok(None)` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(settings))
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_ORIGIN) {
            self.origin = v;
        }
        if let Some(v) = lookup(ENV_BASE_API) {
            self.base_api = v;
        }
    }

    pub fn apply_overrides(&mut self, origin: Option<&str>, base_api: Option<&str>) {
        if let Some(v) = origin {
            self.origin = v.to_string();
        }
        if let Some(v) = base_api {
            self.base_api = v.to_string();
        }
    }
}

/// Resolves settings in increasing priority: defaults, config file, environment,
/// flags. The default config path may be absent; an explicit one may not.
pub fn load_settings(
    config_path: Option<&str>,
    origin: Option<&str>,
    base_api: Option<&str>,
) -> Result<Settings> {
    let raw_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
    let expanded = shellexpand::tilde(raw_path);
    let path = Path::new(expanded.as_ref());

    let mut settings = match Settings::from_file(path)? {
        Some(file_settings) => {
            debug!("Loaded settings from {}", path.display());
            file_settings
        }
        None if config_path.is_some() => {
            anyhow::bail!("Config file {} does not exist", path.display());
        }
        None => Settings::default(),
    };

    settings.apply_env(|key| std::env::var(key).ok());
    settings.apply_overrides(origin, base_api);
    Ok(settings)
}
