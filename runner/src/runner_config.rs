use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snake_common::config::{
    ConfigManager, FileContentConfigProvider, GameSettings, Validate, YamlConfigSerializer,
};

const CONFIG_FILE_NAME: &str = "snake_runner_config.yaml";

pub fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct RunnerConfig {
    #[serde(default)]
    pub game: GameSettings,
    #[serde(default)]
    pub replays: ReplayConfig,
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.replays.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ReplayConfig {
    pub save: bool,
    pub location: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            save: false,
            location: "snakereplays".to_string(),
        }
    }
}

impl Validate for ReplayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.location.is_empty() {
            return Err("replay location must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_runner_config_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let manager = get_config_manager(&get_temp_file_path());
        let config = manager.get_config().unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.game.grid_size, 20);
    }

    #[test]
    fn test_save_and_reload() {
        let path = get_temp_file_path();
        let mut config = RunnerConfig::default();
        config.game.grid_size = 32;
        config.replays.save = true;

        get_config_manager(&path).set_config(&config).unwrap();
        let reloaded = get_config_manager(&path).get_config().unwrap();
        assert_eq!(reloaded, config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_empty_replay_location_rejected() {
        let mut config = RunnerConfig::default();
        config.replays.location.clear();
        assert!(config.validate().is_err());
    }
}
