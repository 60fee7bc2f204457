mod config_content_provider;
mod config_manager;
mod config_serializer;
mod game_settings;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use game_settings::{
    GameSettings, SettingsError, DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS, MAX_GRID_SIZE,
    MAX_TICK_INTERVAL_MS, MIN_GRID_SIZE, MIN_TICK_INTERVAL_MS,
};
pub use validate::Validate;

pub(crate) use game_settings::check_grid_size;
