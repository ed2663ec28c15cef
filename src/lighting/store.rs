//! Daylight config persistence
//!
//! Stores the controller config as JSON in the platform config directory so
//! the sunrise/sunset windows can be tuned without rebuilding.

use anyhow::Context;
use bevy::prelude::*;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

use super::curve::DaylightConfig;

const CONFIG_FILE: &str = "daylight.json";

/// Daylight config file manager
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    /// Create a store in the platform config directory
    ///
    /// - macOS: ~/Library/Application Support/daynight_lighting/
    /// - Linux: ~/.config/daynight_lighting/
    /// - Windows: %APPDATA%\daynight_lighting\config\
    pub fn new() -> Result<Self, anyhow::Error> {
        let proj_dirs = ProjectDirs::from("", "", "daynight_lighting")
            .ok_or_else(|| anyhow::anyhow!("Failed to resolve config directory"))?;

        Self::new_in_dir(proj_dirs.config_dir().to_path_buf())
    }

    /// Create a store rooted at a specific directory
    pub fn new_in_dir(config_dir: PathBuf) -> Result<Self, anyhow::Error> {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("creating {}", config_dir.display()))?;

        Ok(Self { config_dir })
    }

    /// Read the stored config
    ///
    /// Returns Ok(None) if no config file exists yet.
    /// Returns Err if the file exists but cannot be read or parsed.
    pub fn read(&self) -> Result<Option<DaylightConfig>, anyhow::Error> {
        let path = self.path();

        if !path.exists() {
            return Ok(None);
        }

        let contents =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let config: DaylightConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;

        Ok(Some(config))
    }

    /// Write a config, replacing any existing file
    pub fn write(&self, config: &DaylightConfig) -> Result<(), anyhow::Error> {
        let contents = serde_json::to_string_pretty(config)?;
        fs::write(self.path(), contents)?;
        Ok(())
    }

    /// Load a valid config, falling back to defaults
    ///
    /// A missing file is created with the defaults so it can be edited.
    pub fn load_or_default(&self) -> DaylightConfig {
        match self.read() {
            Ok(Some(config)) => match config.validate() {
                Ok(()) => {
                    info!("Loaded daylight config from {}", self.path().display());
                    config
                }
                Err(err) => {
                    warn!("Ignoring daylight config: {:#}", err);
                    DaylightConfig::default()
                }
            },
            Ok(None) => {
                let config = DaylightConfig::default();
                if let Err(err) = self.write(&config) {
                    warn!("Failed to write default daylight config: {:#}", err);
                }
                config
            }
            Err(err) => {
                warn!("Failed to load daylight config: {:#}", err);
                DaylightConfig::default()
            }
        }
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}
