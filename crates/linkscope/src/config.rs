use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::layout::order::OrderSpec;
use crate::state::Viz;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "linkscope";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viz: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `linkscope config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Linkscope configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.viz" => {
                if Viz::from_key(value).is_none() {
                    anyhow::bail!("Invalid viz: {value}. Must be 'chord' or 'matrix'.");
                }
                self.defaults.get_or_insert_with(DefaultsConfig::default).viz =
                    Some(value.to_string());
            }
            "defaults.order" => {
                if OrderSpec::from_key(value).is_none() {
                    anyhow::bail!(
                        "Invalid order: {value}. Must be 'department', 'links', 'emphasis', or 'faculty'."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .order = Some(value.to_string());
            }
            "defaults.autoplay" => {
                let autoplay = match value {
                    "true" | "on" => true,
                    "false" | "off" => false,
                    _ => anyhow::bail!("Invalid autoplay: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .autoplay = Some(autoplay);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.viz, defaults.order, defaults.autoplay"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_rejects_unknown_keys_and_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.nope", "x").is_err());
        assert!(config.set("defaults.theme", "sepia").is_err());
        assert!(config.set("defaults.viz", "sunburst").is_err());
        assert!(config.set("defaults.order", "alphabet").is_err());
        assert!(config.set("defaults.autoplay", "maybe").is_err());
        assert!(config.defaults.is_none());
    }

    #[test]
    fn set_accepts_valid_values() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.viz", "matrix").unwrap();
        config.set("defaults.order", "faculty").unwrap();
        config.set("defaults.autoplay", "off").unwrap();
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.theme.as_deref(), Some("dark"));
        assert_eq!(defaults.viz.as_deref(), Some("matrix"));
        assert_eq!(defaults.order.as_deref(), Some("faculty"));
        assert_eq!(defaults.autoplay, Some(false));
    }

    #[test]
    fn yaml_round_trips() {
        let mut config = Config::default();
        config.set("defaults.order", "links").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            back.defaults.unwrap().order.as_deref(),
            Some("links")
        );
    }

    #[test]
    fn empty_yaml_parses_to_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert!(config.defaults.is_none());
    }
}
