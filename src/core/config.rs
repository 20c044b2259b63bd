//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.atlas/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_ENDPOINT;
use crate::core::favorites::FAVORITES_KEY;
use crate::core::pipeline::{DEFAULT_LIMIT, MAX_LIMIT, SortKey, SortOrder};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_limit: Option<u16>,
    pub default_sort_key: Option<SortKey>,
    pub default_sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FavoritesConfig {
    /// Path of the favorites file. Relative paths resolve against `~/.atlas/`.
    pub file: Option<String>,
}

// ============================================================================
// CLI overrides
// ============================================================================

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub favorites_file: Option<PathBuf>,
    pub limit: Option<u16>,
    pub no_persist: bool,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: String,
    /// None = keep favorites in memory only.
    pub favorites_path: Option<PathBuf>,
    pub limit: u16,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.atlas/`.
pub fn atlas_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".atlas"))
}

/// Returns the path to `~/.atlas/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    atlas_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.atlas/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AtlasConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AtlasConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AtlasConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AtlasConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<AtlasConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AtlasConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Atlas Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_limit = 40                 # 0..=250 countries shown
# default_sort_key = "name"          # "name" or "population"
# default_sort_order = "asc"         # "asc" or "desc"

# [source]
# endpoint = "https://restcountries.com/v3.1/all"   # Or set ATLAS_ENDPOINT env var

# [favorites]
# file = "countries-favorites.json"  # Relative to ~/.atlas/, or ATLAS_FAVORITES_FILE
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AtlasConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| std::env::var("ATLAS_ENDPOINT").ok())
        .or_else(|| config.source.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Favorites file: CLI → env → config → default; --no-persist disables it
    let favorites_path = if cli.no_persist {
        None
    } else {
        cli.favorites_file
            .clone()
            .or_else(|| std::env::var("ATLAS_FAVORITES_FILE").ok().map(PathBuf::from))
            .or_else(|| config.favorites.file.as_deref().and_then(resolve_in_atlas_dir))
            .or_else(|| resolve_in_atlas_dir(&format!("{FAVORITES_KEY}.json")))
    };

    let limit = cli
        .limit
        .or(config.general.default_limit)
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT);

    ResolvedConfig {
        endpoint,
        favorites_path,
        limit,
        sort_key: config.general.default_sort_key.unwrap_or_default(),
        sort_order: config.general.default_sort_order.unwrap_or_default(),
    }
}

/// Absolute paths pass through; relative ones are placed under `~/.atlas/`.
fn resolve_in_atlas_dir(file: &str) -> Option<PathBuf> {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        Some(path)
    } else {
        atlas_dir().map(|d| d.join(path))
    }
}
