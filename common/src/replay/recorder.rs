use super::{PlayerAction, Replay, ReplayAction, ReplayMetadata};

pub struct ReplayRecorder {
    engine_version: String,
    game_started_timestamp_ms: i64,
    seed: u64,
    grid_size: usize,
    tick_interval_ms: u64,
    actions: Vec<ReplayAction>,
}

impl ReplayRecorder {
    pub fn new(engine_version: String, seed: u64, grid_size: usize, tick_interval_ms: u64) -> Self {
        let game_started_timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        Self {
            engine_version,
            game_started_timestamp_ms,
            seed,
            grid_size,
            tick_interval_ms,
            actions: Vec::new(),
        }
    }

    pub fn record(&mut self, tick: u64, action: PlayerAction) {
        self.actions.push(ReplayAction { tick, action });
    }

    pub fn finalize(&mut self, total_ticks: u64) -> Replay {
        let mut actions = std::mem::take(&mut self.actions);
        actions.sort_by_key(|a| a.tick);

        Replay {
            metadata: ReplayMetadata {
                engine_version: std::mem::take(&mut self.engine_version),
                game_started_timestamp_ms: self.game_started_timestamp_ms,
                seed: self.seed,
                grid_size: self.grid_size,
                tick_interval_ms: self.tick_interval_ms,
            },
            total_ticks,
            actions,
        }
    }

    pub fn actions_count(&self) -> usize {
        self.actions.len()
    }
}
