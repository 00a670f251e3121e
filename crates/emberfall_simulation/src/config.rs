//! Simulation config + ошибки загрузки данных

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logger::LogLevel;

/// Глобальные параметры симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f64,
    /// Интервал периодического scan/attack-range check агентов (сек)
    pub scan_interval_secs: f32,
    /// Дистанция "дошёл до waypoint" (world units)
    pub waypoint_epsilon: f32,
    pub log_level: LogLevel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 60.0,
            scan_interval_secs: 1.0,
            waypoint_epsilon: 1.0,
            log_level: LogLevel::Info,
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path, source })?;
        Self::from_ron_str(&source)
    }
}

/// Ошибки загрузки config / level blueprint
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
