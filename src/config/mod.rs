// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_MAX_SRC_RESOLUTION, VALID_LOG_LEVELS};
use crate::security::SecurityConfig;

pub mod logging;

pub use logging::{LogFormat, LoggingConfig};

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_src_resolution() -> u64 {
    DEFAULT_MAX_SRC_RESOLUTION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Prefix prepended to every decoded source address (default: none)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum source image resolution in pixels (default: 16.8 MP)
    #[serde(default = "default_max_src_resolution")]
    pub max_src_resolution: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_src_resolution: default_max_src_resolution(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        // An empty document means "all defaults"
        if substituted.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_src_resolution == 0 {
            return Err("max_src_resolution must be greater than 0".to_string());
        }

        if !self.base_url.is_empty() {
            url::Url::parse(&self.base_url).map_err(|e| {
                format!("base_url '{}' is not an absolute URL: {}", self.base_url, e)
            })?;
        }

        let level = self.logging.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "Invalid log level '{}', expected one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        Ok(())
    }

    /// Limits for the source image size guard
    pub fn security(&self) -> SecurityConfig {
        SecurityConfig {
            max_src_resolution: self.max_src_resolution,
        }
    }
}
