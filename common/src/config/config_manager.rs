use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.as_ref()),
            YamlConfigSerializer,
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|e| format!("Config lock poisoned: {}", e))?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let config_data_result = self.config_content_provider.get_config_content()?;
        if let Some(config_data) = config_data_result {
            let config = self.config_serializer.deserialize(&config_data)?;

            config
                .validate()
                .map_err(|e| format!("Config validation error: {}", e))?;

            *current = Some(config.clone());
            return Ok(config);
        }

        Ok(TConfig::default())
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;

        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|e| format!("Config lock poisoned: {}", e))?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use std::cell::RefCell;

    struct MemoryContentProvider {
        content: RefCell<Option<String>>,
    }

    impl ConfigContentProvider for MemoryContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn memory_manager(
        content: Option<&str>,
    ) -> ConfigManager<MemoryContentProvider, GameSettings, YamlConfigSerializer> {
        ConfigManager::new(
            MemoryContentProvider {
                content: RefCell::new(content.map(str::to_string)),
            },
            YamlConfigSerializer,
        )
    }

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_config_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_content_yields_defaults() {
        let manager = memory_manager(None);
        assert_eq!(manager.get_config().unwrap(), GameSettings::default());
    }

    #[test]
    fn test_invalid_stored_config_is_rejected() {
        let manager = memory_manager(Some("grid_size: 2\ntick_interval_ms: 150\n"));
        let err = manager.get_config().unwrap_err();
        assert!(err.contains("Config validation error"));
        assert!(err.contains("grid_size"));
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let manager = memory_manager(None);
        let settings = GameSettings {
            grid_size: 500,
            ..GameSettings::default()
        };
        assert!(manager.set_config(&settings).is_err());
        assert!(manager.config_content_provider.content.borrow().is_none());
    }

    #[test]
    fn test_file_round_trip() {
        let path = get_temp_file_path();
        let manager: ConfigManager<_, GameSettings> = ConfigManager::from_yaml_file(&path);

        let settings = GameSettings {
            grid_size: 12,
            tick_interval_ms: 90,
            seed: Some(7),
            auto_restart: true,
        };
        manager.set_config(&settings).unwrap();

        let reloaded: ConfigManager<_, GameSettings> = ConfigManager::from_yaml_file(&path);
        assert_eq!(reloaded.get_config().unwrap(), settings);

        let _ = std::fs::remove_file(&path);
    }
}
