//! Configuration management

use crate::core::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default interface: every address, IPv6 and IPv4
pub const DEFAULT_HOST: &str = "::";

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "soundboard.toml";

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub clips: ClipsConfig,
    pub template: TemplateConfig,
    pub color: ColorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind; `::` also accepts IPv4 where the OS allows it
    pub host: String,
    /// TCP port
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipsConfig {
    /// Directory scanned for audio files, relative to the base directory
    pub dir: PathBuf,
    /// URL segment the directory is served under (also the clip file prefix)
    pub route: String,
    /// Walk in file-name order instead of directory order
    pub sort: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Glob for the page template, relative to the base directory
    pub pattern: String,
    /// Re-parse the template on every request
    pub live_reload: bool,
    /// Re-parse a cached template when the file changes
    pub watch: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Seed for reproducible colors
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for ClipsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("clips"),
            route: "clips".to_string(),
            sort: false,
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            pattern: "soundboard.html".to_string(),
            live_reload: true,
            watch: false,
        }
    }
}

impl Config {
    /// Load configuration, looking in `base_dir` before the platform config dir
    pub fn load(base_dir: &Path) -> Result<Self> {
        match Self::config_path(base_dir) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Find the config file to use, if any
    pub fn config_path(base_dir: &Path) -> Option<PathBuf> {
        // SOUNDBOARD_CONFIG wins, even when the file is missing (load reports it)
        if let Ok(path) = std::env::var("SOUNDBOARD_CONFIG") {
            return Some(PathBuf::from(path));
        }

        let local = base_dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        ProjectDirs::from("dev", "soundboard", "soundboard")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .filter(|path| path.exists())
    }

    fn validate(&self) -> Result<()> {
        let route = self.clips.route.trim_matches('/');
        if route.is_empty() {
            return Err(Error::ConfigError {
                message: "clips.route must not be empty".to_string(),
            });
        }
        if self.template.pattern.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "template.pattern must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute clip directory
    pub fn clips_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.clips.dir)
    }

    /// URL segment for the clip route, without slashes
    pub fn clips_route(&self) -> &str {
        self.clips.route.trim_matches('/')
    }
}
