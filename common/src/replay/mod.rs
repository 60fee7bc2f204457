pub mod file_io;
pub mod player;
pub mod recorder;

use serde::{Deserialize, Serialize};

use crate::games::snake::Direction;

pub use file_io::{
    generate_replay_filename, load_replay, load_replay_from_bytes, save_replay,
    save_replay_to_bytes, ReplayError,
};
pub use player::{replay_session, ReplayPlayer};
pub use recorder::ReplayRecorder;

pub const REPLAY_FILE_EXTENSION: &str = "snakereplay";
pub const REPLAY_VERSION: u8 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayMetadata {
    pub engine_version: String,
    pub game_started_timestamp_ms: i64,
    pub seed: u64,
    pub grid_size: usize,
    pub tick_interval_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Turn(Direction),
    TogglePause,
    Restart,
}

/// An action applied before the session's `tick`-th tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayAction {
    pub tick: u64,
    pub action: PlayerAction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub metadata: ReplayMetadata,
    pub total_ticks: u64,
    pub actions: Vec<ReplayAction>,
}
