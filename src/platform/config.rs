// vpsdeals - platform/config.rs
//
// Directory resolution and config.toml loading. Config problems are never
// fatal: bad files and bad values produce warnings and defaults so the
// catalog still loads.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Platform locations for vpsdeals configuration and catalog data.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Where config.toml lives (e.g. ~/.config/vpsdeals on Linux).
    pub config_dir: PathBuf,

    /// Default directory for catalog override files
    /// (e.g. ~/.local/share/vpsdeals on Linux).
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve the platform directories, falling back to the current
    /// directory when the home directory cannot be determined.
    pub fn resolve() -> Self {
        match ProjectDirs::from("", "", constants::APP_ID) {
            Some(dirs) => {
                let paths = Self {
                    config_dir: dirs.config_dir().to_path_buf(),
                    data_dir: dirs.data_dir().to_path_buf(),
                };
                tracing::debug!(
                    config_dir = %paths.config_dir.display(),
                    data_dir = %paths.data_dir.display(),
                    "Resolved platform directories"
                );
                paths
            }
            None => {
                tracing::warn!("No home directory found; using the current directory");
                Self {
                    config_dir: PathBuf::from("."),
                    data_dir: PathBuf::from("."),
                }
            }
        }
    }
}

// =============================================================================
// config.toml
// =============================================================================

/// Deserialised shape of config.toml. Unknown keys are ignored so a
/// config written for a newer release still loads.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub data: DataSection,
    pub display: DisplaySection,
    pub logging: LoggingSection,
}

/// `[data]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Directory holding catalog override files.
    pub directory: Option<String>,
}

/// `[display]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Maximum deal rows printed per invocation.
    pub max_rows: Option<usize>,
}

/// `[logging]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// One of: error, warn, info, debug, trace.
    pub level: Option<String>,
}

/// Validated configuration after range checks.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog override directory (the CLI argument wins over it).
    pub data_dir: Option<PathBuf>,

    /// Maximum deal rows printed by the CLI.
    pub max_rows: usize,

    /// Log level, consumed before tracing is initialised.
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_rows: constants::DEFAULT_DISPLAY_ROWS,
            log_level: None,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Load config.toml from the given directory.
///
/// A missing file is a silent first-run default. An unreadable or
/// unparseable file, and every out-of-range value, each add one warning
/// to the returned list while the rest of the config still applies.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings = Vec::new();

    let raw = match read_raw(&path) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (AppConfig::default(), warnings),
        Err(warning) => {
            tracing::warn!("{warning}");
            warnings.push(warning);
            return (AppConfig::default(), warnings);
        }
    };

    let config = validate(raw, &mut warnings);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(path = %path.display(), warnings = warnings.len(), "Config loaded");
    (config, warnings)
}

/// Read and parse the raw file. `Ok(None)` means the file does not exist.
fn read_raw(path: &Path) -> Result<Option<RawConfig>, String> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file; using defaults");
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read '{}': {e}. Using defaults.", path.display()))?;
    let raw = toml::from_str(&content)
        .map_err(|e| format!("Cannot parse '{}': {e}. Using defaults.", path.display()))?;
    Ok(Some(raw))
}

/// Range-check every raw value, keeping defaults for rejected ones.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    match raw.data.directory.as_deref() {
        Some("") => warnings.push("[data] directory is empty; ignoring.".to_string()),
        Some(dir) => config.data_dir = Some(PathBuf::from(dir)),
        None => {}
    }

    if let Some(rows) = raw.display.max_rows {
        if (constants::MIN_DISPLAY_ROWS..=constants::MAX_DISPLAY_ROWS).contains(&rows) {
            config.max_rows = rows;
        } else {
            warnings.push(format!(
                "[display] max_rows = {rows} must be between {} and {}; keeping {}.",
                constants::MIN_DISPLAY_ROWS,
                constants::MAX_DISPLAY_ROWS,
                constants::DEFAULT_DISPLAY_ROWS,
            ));
        }
    }

    if let Some(level) = raw.logging.level {
        if LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not one of {}; keeping \"{}\".",
                LOG_LEVELS.join("/"),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    config
}
