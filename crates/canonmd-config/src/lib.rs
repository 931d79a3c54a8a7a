//! Configuration management for canonmd.
//!
//! Parses `canonmd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [format]
//! profile = "narrow"   # "wide" (100 columns, default) or "narrow" (80)
//! text_width = 72      # explicit override, wins over the profile
//! ```

use std::path::{Path, PathBuf};

use canonmd_renderer::{DEFAULT_TEXT_WIDTH, Flags, NARROW_TEXT_WIDTH, RendererOptions};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "canonmd.toml";

/// Narrowest accepted wrap width.
const MIN_TEXT_WIDTH: usize = 10;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override wrap width.
    pub text_width: Option<usize>,
    /// Override profile.
    pub profile: Option<Profile>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Formatting configuration.
    pub format: FormatConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Formatting configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Width profile.
    pub profile: Profile,
    /// Explicit wrap width, overriding the profile.
    pub text_width: Option<usize>,
}

/// Named wrap width presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// 100 columns.
    #[default]
    Wide,
    /// 80 columns.
    Narrow,
}

impl Profile {
    /// Wrap width of the profile.
    #[must_use]
    pub fn text_width(self) -> usize {
        match self {
            Self::Wide => DEFAULT_TEXT_WIDTH,
            Self::Narrow => NARROW_TEXT_WIDTH,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `canonmd.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let start = std::env::current_dir()?;
        Self::load_from(&start, config_path, cli_settings)
    }

    /// Like [`load`](Self::load), discovering from `start` instead of the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_from(
        start: &Path,
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config(start) {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Effective wrap width.
    #[must_use]
    pub fn text_width(&self) -> usize {
        self.format
            .text_width
            .unwrap_or_else(|| self.format.profile.text_width())
    }

    /// Renderer options for this configuration.
    #[must_use]
    pub fn renderer_options(&self) -> RendererOptions {
        RendererOptions {
            flags: Flags::COMMON,
            text_width: self.text_width(),
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the wrap width is too narrow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(width) = self.format.text_width
            && width < MIN_TEXT_WIDTH
        {
            return Err(ConfigError::Validation(format!(
                "format.text_width must be at least {MIN_TEXT_WIDTH}, got {width}"
            )));
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(profile) = settings.profile {
            self.format.profile = profile;
            self.format.text_width = None;
        }
        if let Some(width) = settings.text_width {
            self.format.text_width = Some(width);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}
