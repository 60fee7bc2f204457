use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::Validate;

pub const DEFAULT_GRID_SIZE: usize = 20;
pub const MIN_GRID_SIZE: usize = 5;
pub const MAX_GRID_SIZE: usize = 100;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;
pub const MIN_TICK_INTERVAL_MS: u64 = 20;
pub const MAX_TICK_INTERVAL_MS: u64 = 2000;

/// Construction-time options for a snake game.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameSettings {
    /// Cells per side of the square grid.
    pub grid_size: usize,
    pub tick_interval_ms: u64,
    /// Fixed seed for food placement; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// Start a new round automatically once the snake dies.
    pub auto_restart: bool,
}

impl GameSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            auto_restart: false,
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        check_grid_size(self.grid_size).map_err(|e| e.to_string())?;
        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(format!(
                "tick_interval_ms must be at least {}",
                MIN_TICK_INTERVAL_MS
            ));
        }
        if self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(format!(
                "tick_interval_ms must not exceed {}",
                MAX_TICK_INTERVAL_MS
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    GridSizeOutOfRange { size: usize, min: usize, max: usize },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::GridSizeOutOfRange { size, min, max } => write!(
                f,
                "grid_size must be between {} and {}, got {}",
                min, max, size
            ),
        }
    }
}

impl std::error::Error for SettingsError {}

pub(crate) fn check_grid_size(size: usize) -> Result<(), SettingsError> {
    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
        return Err(SettingsError::GridSizeOutOfRange {
            size,
            min: MIN_GRID_SIZE,
            max: MAX_GRID_SIZE,
        });
    }
    Ok(())
}
