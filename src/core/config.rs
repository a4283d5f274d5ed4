/*
 * Application configuration for the category picker: the heading shown above
 * the tree, whether the "Select All" control is offered, where the catalog
 * comes from and how verbose logging is. Settings live in `config.json` inside
 * the per-user configuration directory; a missing file means defaults.
 *
 * `ConfigManagerOperations` keeps storage swappable, so the picker can also be
 * pointed at a directory chosen on the command line.
 */
use crate::core::path_utils;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoProjectDirectory,
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "Configuration format error: {e}"),
            ConfigError::NoProjectDirectory => {
                write!(f, "Could not determine directory for configuration")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            ConfigError::NoProjectDirectory => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub heading: String,
    pub show_select_all_button: bool,
    /* JSON catalog to load. `None` selects the built-in sample catalog. */
    pub catalog_path: Option<PathBuf>,
    /* One of `off`, `error`, `warn`, `info`, `debug`, `trace`. */
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            heading: "Select Categories".to_string(),
            show_select_all_button: true,
            catalog_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    // Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info)
    }
}

pub trait ConfigManagerOperations: Send + Sync {
    fn load_config(&self, app_name: &str) -> Result<AppConfig>;
}

fn read_config_file(file_path: &Path) -> Result<AppConfig> {
    if !file_path.exists() {
        log::debug!("Config: {file_path:?} does not exist, using defaults.");
        return Ok(AppConfig::default());
    }
    let reader = BufReader::new(File::open(file_path)?);
    let config: AppConfig = serde_json::from_reader(reader)?;
    log::debug!("Config: Loaded configuration from {file_path:?}.");
    Ok(config)
}

/*
 * Reads `config.json` from the directory returned by
 * `path_utils::get_base_app_config_local_dir`.
 */
pub struct CoreConfigManager {}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {}
    }

    fn config_file_path(app_name: &str) -> Result<PathBuf> {
        let dir = path_utils::get_base_app_config_local_dir(app_name)
            .ok_or(ConfigError::NoProjectDirectory)?;
        Ok(dir.join(CONFIG_FILENAME))
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    fn load_config(&self, app_name: &str) -> Result<AppConfig> {
        log::trace!("CoreConfigManager: Loading config for app '{app_name}'");
        read_config_file(&Self::config_file_path(app_name)?)
    }
}

/*
 * Reads the configuration from a caller-chosen directory instead of the
 * per-user one. The app name is ignored.
 */
pub struct DirectoryConfigManager {
    dir: PathBuf,
}

impl DirectoryConfigManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryConfigManager { dir: dir.into() }
    }
}

impl ConfigManagerOperations for DirectoryConfigManager {
    fn load_config(&self, _app_name: &str) -> Result<AppConfig> {
        log::trace!("DirectoryConfigManager: Loading config from {:?}", self.dir);
        read_config_file(&self.dir.join(CONFIG_FILENAME))
    }
}
