//! Configuration management for `iconex.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                         |
//! |------------|-------------------------------------------------|
//! | `[cdn]`    | Asset host base URL and default icon style      |
//! | `[browse]` | Paging window sizes and query debounce interval |
//! | `[export]` | Output directory and default raster size        |
//!
//! The config file is optional: a missing file means defaults. Unknown
//! fields are warned about and ignored.

mod error;
mod handle;

pub use error::ConfigError;
pub use handle::{cfg, init_config};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::cdn::DEFAULT_BASE_URL;
use crate::cli::Cli;
use crate::core::debounce::DEBOUNCE_MS;
use crate::core::{INITIAL_VISIBLE, IconStyle, VISIBLE_INCREMENT};
use crate::export::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::log;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing iconex.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Asset host settings
    #[serde(default)]
    pub cdn: CdnConfig,

    /// Browse session settings
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            cdn: CdnConfig::default(),
            browse: BrowseConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

// ============================================================================
// sections
// ============================================================================

/// `[cdn]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    /// Base URL for icon sources.
    pub base_url: String,

    /// Style selected at startup.
    pub style: IconStyle,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            style: IconStyle::default(),
        }
    }
}

/// `[browse]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Icons shown when a list is (re)computed.
    pub initial_visible: usize,

    /// Icons revealed per near-bottom scroll.
    pub load_increment: usize,

    /// Query quiet period in milliseconds.
    pub debounce_ms: u64,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            initial_visible: INITIAL_VISIBLE,
            load_increment: VISIBLE_INCREMENT,
            debounce_ms: DEBOUNCE_MS,
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exports are written to.
    pub dir: PathBuf,

    /// Default raster size in pixels.
    pub size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            size: DEFAULT_SIZE,
        }
    }
}

// ============================================================================
// loading and validation
// ============================================================================

impl AppConfig {
    /// Load configuration from CLI arguments.
    ///
    /// A missing config file is not an error: the tool works out of the box
    /// with defaults.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let config_path = cli.config.clone();

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {}, ignoring:", path.display());
            for field in &ignored {
                eprintln!("- {field}");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base = url::Url::parse(&self.cdn.base_url).map_err(|err| {
            ConfigError::Validation(format!(
                "cdn.base_url `{}` is not an absolute URL: {err}",
                self.cdn.base_url
            ))
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::Validation(format!(
                "cdn.base_url `{}` cannot carry path segments",
                self.cdn.base_url
            )));
        }

        if self.browse.initial_visible == 0 {
            return Err(ConfigError::Validation(
                "browse.initial_visible must be at least 1".into(),
            ));
        }
        if self.browse.load_increment == 0 {
            return Err(ConfigError::Validation(
                "browse.load_increment must be at least 1".into(),
            ));
        }

        if !(MIN_SIZE..=MAX_SIZE).contains(&self.export.size) {
            return Err(ConfigError::Validation(format!(
                "export.size must be between {MIN_SIZE} and {MAX_SIZE}, got {}",
                self.export.size
            )));
        }

        Ok(())
    }
}
