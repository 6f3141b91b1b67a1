//! Config persistence and path resolution for `CompositeConfig`.
//!
//! Covers:
//! - `load` / `save` against the default XDG-style path
//! - `load_from` / `save_to` for explicit paths (atomic write)

use super::CompositeConfig;
use crate::error::ConfigError;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

impl CompositeConfig {
    /// Load configuration from the default path, or fall back to defaults
    /// when no file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Compositor config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Compositor config not found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading compositor config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config = Self::from_yaml_str(&contents)?;
        log::debug!(
            "Compositor config loaded: variant={:?} gamma_exponent_inverse={}",
            config.composite.variant,
            config.composite.gamma_exponent_inverse
        );
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = self.to_yaml_string()?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("compositor.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("cellblend")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/cellblend on all Unix-like platforms
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("cellblend")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
