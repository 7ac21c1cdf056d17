use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wardrive_core::OuiCache;
use wardrive_core::cache::{DEFAULT_MAX_AGE_DAYS, DEFAULT_OUI_URL};
use wardrive_engine::DEFAULT_JITTER_DEGREES;
use wardrive_providers::discovery::DEFAULT_SESSION_SUFFIX;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_OUTPUT_FILE: &str = "wardrive.geojson";
pub const DEFAULT_OUI_CACHE_FILE: &str = "oui.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OuiConfig {
    pub url: String,
    /// Defaults to `oui.csv` inside the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_file: Option<PathBuf>,
    pub max_age_days: u64,
    pub offline: bool,
}

impl Default for OuiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OUI_URL.to_string(),
            cache_file: None,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            offline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults to `wardrive.geojson` inside the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub jitter_degrees: f64,
    pub session_suffix: String,
    pub oui: OuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: None,
            jitter_degrees: DEFAULT_JITTER_DEGREES,
            session_suffix: DEFAULT_SESSION_SUFFIX.to_string(),
            oui: OuiConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the data directory, or defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_from(&Self::default_path(data_dir))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject values that would break a run partway through.
    pub fn validate(&self) -> Result<()> {
        if !self.jitter_degrees.is_finite() || self.jitter_degrees < 0.0 {
            return Err(Error::Config(format!(
                "jitter_degrees must be a finite, non-negative number (got {})",
                self.jitter_degrees
            )));
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn output_path(&self, data_dir: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_OUTPUT_FILE))
    }

    pub fn oui_cache_path(&self, data_dir: &Path) -> PathBuf {
        self.oui
            .cache_file
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_OUI_CACHE_FILE))
    }

    pub fn oui_cache(&self, data_dir: &Path) -> OuiCache {
        OuiCache::new(self.oui_cache_path(data_dir))
            .with_url(self.oui.url.clone())
            .with_max_age_days(self.oui.max_age_days)
            .offline(self.oui.offline)
    }
}
