//! Runtime configuration, loaded from YAML. Missing file or missing keys fall back to defaults.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::{DispatchSettings, UniverseLimits};

pub const DEFAULT_CONFIG_PATH: &str = "config/sortie.yaml";
pub const CONFIG_PATH_ENV: &str = "SORTIE_CONFIG";
pub const BIND_ADDR_ENV: &str = "SORTIE_BIND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortieConfig {
    pub universe: UniverseLimits,
    pub max_speed_step: u32,
    pub bind_addr: String,
    pub universe_path: String,
}

impl Default for SortieConfig {
    fn default() -> Self {
        Self {
            universe: UniverseLimits::default(),
            max_speed_step: 10,
            bind_addr: "127.0.0.1:3000".to_string(),
            universe_path: crate::data::universe::DEFAULT_UNIVERSE_PATH.to_string(),
        }
    }
}

impl SortieConfig {
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            limits: self.universe,
            max_speed_step: self.max_speed_step,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config: {0}")]
    Read(#[source] std::io::Error),
    #[error("unable to parse config: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

pub fn parse_config(raw: &str) -> Result<SortieConfig, ConfigError> {
    let config: SortieConfig = serde_yaml::from_str(raw).map_err(ConfigError::Parse)?;
    let limits = &config.universe;
    if limits.galaxies == 0 || limits.systems == 0 || limits.planets == 0 {
        return Err(ConfigError::Invalid("universe limits must be positive"));
    }
    if limits.planets == u32::MAX {
        return Err(ConfigError::Invalid("planets must leave room for the expedition slot"));
    }
    if config.max_speed_step == 0 {
        return Err(ConfigError::Invalid("max_speed_step must be positive"));
    }
    Ok(config)
}

/// Load config from `path`. A missing file yields defaults; a present but broken file is an error.
pub fn load_config(path: &str) -> Result<SortieConfig, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(SortieConfig::default());
    }
    let raw = fs::read_to_string(path).map_err(ConfigError::Read)?;
    parse_config(&raw)
}

/// Config from `SORTIE_CONFIG` (or the default path), with `SORTIE_BIND` applied on top.
pub fn load_config_from_env() -> Result<SortieConfig, ConfigError> {
    let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_config(&path)?;
    if let Ok(bind_addr) = env::var(BIND_ADDR_ENV) {
        config.bind_addr = bind_addr;
    }
    Ok(config)
}
