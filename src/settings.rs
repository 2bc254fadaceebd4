use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::log_warn;
use crate::scoring::ScoringConfig;

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EngineSettings {
    scoring: ScoringConfig,
}

/// JSON-backed engine settings. A missing or unreadable file yields defaults.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<EngineSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            match serde_json::from_str::<EngineSettings>(&contents) {
                Ok(settings) => match settings.scoring.validate() {
                    Ok(()) => settings,
                    Err(err) => {
                        log_warn!("Ignoring invalid settings at {}: {err}", path.display());
                        EngineSettings::default()
                    }
                },
                Err(err) => {
                    log_warn!("Ignoring malformed settings at {}: {err}", path.display());
                    EngineSettings::default()
                }
            }
        } else {
            EngineSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn scoring(&self) -> ScoringConfig {
        match self.data.read() {
            Ok(guard) => guard.scoring.clone(),
            Err(poisoned) => poisoned.into_inner().scoring.clone(),
        }
    }

    /// Validate and persist a new scoring configuration.
    pub fn update_scoring(&self, scoring: ScoringConfig) -> Result<()> {
        scoring.validate().context("Refusing to save scoring settings")?;
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.scoring = scoring;
        self.persist(&guard)
    }

    fn persist(&self, data: &EngineSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
