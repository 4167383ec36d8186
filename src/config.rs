//! Configuration file support.
//!
//! Label appearance and hit-test tolerance are kept in a small JSON file so
//! the host can ship defaults and users can tweak them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::overlay::LabelStyle;
use crate::text_metrics::TextMetrics;

/// Log level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Label feature configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Label font size in display pixels
    pub font_size: f64,

    /// Average glyph width as a ratio of font size
    pub char_width_ratio: f64,

    /// Line height as a ratio of font size
    pub line_height_ratio: f64,

    /// Extra display pixels around a label that still start a drag
    pub hit_margin: f64,

    /// Draw a contrasting outline under label text
    pub outline: bool,

    /// Outline offset in display pixels
    pub outline_width: f64,

    /// RGB text color
    pub fill_color: [u8; 3],

    /// RGB outline color
    pub outline_color: [u8; 3],

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for LabelConfig {
    fn default() -> Self {
        let style = LabelStyle::default();
        Self {
            version: CONFIG_VERSION,
            font_size: style.metrics.size,
            char_width_ratio: style.metrics.char_width_ratio,
            line_height_ratio: style.metrics.line_height_ratio,
            hit_margin: style.hit_margin,
            outline: style.outline,
            outline_width: style.outline_width,
            fill_color: style.fill_color,
            outline_color: style.outline_color,
            log_level: LogLevel::default(),
        }
    }
}

impl LabelConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Style used for both painting and hit-testing.
    pub fn style(&self) -> LabelStyle {
        LabelStyle {
            metrics: TextMetrics::custom(
                self.font_size,
                self.char_width_ratio,
                self.line_height_ratio,
            ),
            hit_margin: self.hit_margin.max(0.0),
            outline: self.outline,
            outline_width: self.outline_width,
            fill_color: self.fill_color,
            outline_color: self.outline_color,
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        // Label boxes are sized from these.
        let metrics = [
            ("font_size", config.font_size),
            ("char_width_ratio", config.char_width_ratio),
            ("line_height_ratio", config.line_height_ratio),
        ];
        for (field, value) in metrics {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "draggable-labels.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(
                config_dir
                    .join("draggable-labels")
                    .join(Self::default_filename()),
            )
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("draggable-labels")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save configuration to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved label configuration to {:?}", path);
        Ok(())
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No label config file found at {:?}", path);
            return None;
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded label configuration from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to load label config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save_to(&path)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A numeric setting is out of range
    #[error("Invalid value {value} for '{field}'")]
    InvalidValue { field: &'static str, value: f64 },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
