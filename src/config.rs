use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, VersionTaggerError};

/// Represents the complete configuration for version-tagger.
///
/// Holds the tagging scheme settings and the hosting-API endpoint. CLI
/// arguments override anything configured here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tagging: TaggingConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

/// Settings of the versioning scheme itself.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaggingConfig {
    /// Namespace prefix for tags of this scheme
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// The major version line to release; may instead come from the CLI
    #[serde(default)]
    pub major_version: Option<u32>,

    /// Path of the committed version-marker file
    #[serde(default = "default_version_file")]
    pub version_file: String,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_version_file() -> String {
    ".version".to_string()
}

impl Default for TaggingConfig {
    fn default() -> Self {
        TaggingConfig {
            tag_prefix: default_tag_prefix(),
            major_version: None,
            version_file: default_version_file(),
        }
    }
}

/// Hosting-API endpoint configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// REST API base URL; point this at a GitHub Enterprise instance
    /// when not using github.com
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versiontagger.toml` in current directory
/// 3. `~/.config/.versiontagger.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./versiontagger.toml").exists() {
        fs::read_to_string("./versiontagger.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".versiontagger.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| VersionTaggerError::config(format!("invalid config file: {}", e)))?;
    Ok(config)
}
