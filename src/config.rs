use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    catalog::{AppCatalog, AppInfo},
    storage::json_store::DEFAULT_DATA_FILE,
    tracker::{engine::EngineSettings, shortcuts::ShortcutBindings},
};

pub const CONFIG_FILE: &str = "config.json";

/// Contents of `config.json` in the application directory. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub poll_interval_ms: u64,
    pub autosave_interval_secs: u64,
    pub shortcuts: ShortcutBindings,
    /// Extra or replacement entries for the application catalog.
    pub apps: BTreeMap<String, AppInfo>,
    /// Location of the daily log. Relative paths are resolved against the application directory.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            poll_interval_ms: settings.poll_interval.as_millis() as u64,
            autosave_interval_secs: settings.autosave_interval.as_secs(),
            shortcuts: ShortcutBindings::default(),
            apps: BTreeMap::new(),
            data_file: None,
        }
    }
}

impl Config {
    /// Reads the configuration. A missing file means defaults, a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No configuration at {path:?}, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read {path:?}")),
        };
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Configuration {path:?} is malformed"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_dir(app_dir: &Path) -> Result<Self> {
        Self::load(&app_dir.join(CONFIG_FILE))
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be positive");
        }
        if self.autosave_interval_secs == 0 {
            bail!("autosave_interval_secs must be positive");
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            autosave_interval: Duration::from_secs(self.autosave_interval_secs),
        }
    }

    pub fn data_file(&self, app_dir: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) => app_dir.join(path),
            None => app_dir.join(DEFAULT_DATA_FILE),
        }
    }

    pub fn catalog(&self) -> AppCatalog {
        let mut catalog = AppCatalog::builtin();
        catalog.extend(self.apps.clone());
        catalog
    }
}
