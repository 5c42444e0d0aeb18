//! Optional TOML configuration (`triage.toml`) overriding the built-in
//! defaults. A missing file is not an error; a present but unparseable one
//! is, so a typo never silently falls back to defaults.

use crate::error::TriageError;
use crate::scoring::ScorerConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "triage.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the complaint CSV export.
    pub input: Option<String>,
    pub scorer: ScorerConfig,
}

impl AppConfig {
    pub fn load_or_default(path: &str) -> Result<AppConfig, TriageError> {
        if !Path::new(path).exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TriageError::Config(e.to_string()))
    }
}
