//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "CIVITAS_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "civitas.db";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is unset (trace, debug, info, warn, error)
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Hub listener section of the TOML config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
}

/// Contents of `config.toml`
///
/// Every field is optional; a missing file is equivalent to an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub hub: HubConfig,
    /// Base URL of an external assist API; unset means local fallback only
    pub assist_api_url: Option<String>,
    pub assist_timeout_secs: Option<u64>,
}

/// Parse a TOML config file
///
/// A missing file yields defaults with a warning. A file that exists but does
/// not parse is a configuration error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file {} not found, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the platform config file, or defaults when there is none
pub fn load_default_config() -> Result<TomlConfig> {
    match default_config_path() {
        Some(path) => load_toml_config(&path),
        None => {
            info!("No config file found, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Root folder resolution priority:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Create the root folder if missing and return the database path inside it
pub fn prepare_root_folder(root_folder: &Path) -> Result<PathBuf> {
    if !root_folder.exists() {
        std::fs::create_dir_all(root_folder)?;
        info!("Created root folder: {}", root_folder.display());
    }
    Ok(root_folder.join(DATABASE_FILE))
}

/// Locate the config file for the platform, if one exists
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("civitas").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/civitas/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/civitas (or /var/lib/civitas for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("civitas"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/civitas"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/civitas
        dirs::data_dir()
            .map(|d| d.join("civitas"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/civitas"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\civitas
        dirs::data_local_dir()
            .map(|d| d.join("civitas"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\civitas"))
    } else {
        PathBuf::from("./civitas_data")
    }
}
