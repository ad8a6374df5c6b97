use {
    crate::{
        reba::{RebaModifiers, RebaTableLayout},
        ConfigError,
    },
    ergo_base::LogLevel,
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RebaConfig {
    pub table_layout: RebaTableLayout,
    pub modifiers: RebaModifiers,
}

/// Engine settings, loadable from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    reba: RebaConfig,
    weight_adjustment: bool,
    log_level: LogLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reba: RebaConfig::default(),
            weight_adjustment: true,
            log_level: LogLevel::Info,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Set the REBA table layout and modifiers.
    pub fn with_reba(mut self, reba: RebaConfig) -> Self {
        self.reba = reba;
        self
    }

    /// Enable or disable the weight-adjusted scores in assessments.
    pub fn with_weight_adjustment(mut self, enabled: bool) -> Self {
        self.weight_adjustment = enabled;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn reba(&self) -> &RebaConfig {
        &self.reba
    }

    pub fn weight_adjustment(&self) -> bool {
        self.weight_adjustment
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }
}
