use crate::config::SettingsError;
use crate::games::SessionRng;
use crate::games::snake::{GameState, SnakeSession};
use super::{Replay, ReplayAction, ReplayMetadata};

pub struct ReplayPlayer {
    replay: Replay,
    current_action_index: usize,
}

impl ReplayPlayer {
    pub fn new(replay: Replay) -> Self {
        Self {
            replay,
            current_action_index: 0,
        }
    }

    pub fn metadata(&self) -> &ReplayMetadata {
        &self.replay.metadata
    }

    pub fn engine_version(&self) -> &str {
        &self.replay.metadata.engine_version
    }

    pub fn seed(&self) -> u64 {
        self.replay.metadata.seed
    }

    pub fn total_ticks(&self) -> u64 {
        self.replay.total_ticks
    }

    pub fn total_actions(&self) -> usize {
        self.replay.actions.len()
    }

    pub fn current_action_index(&self) -> usize {
        self.current_action_index
    }

    pub fn is_finished(&self) -> bool {
        self.current_action_index >= self.replay.actions.len()
    }

    pub fn next_action(&mut self) -> Option<&ReplayAction> {
        let action = self.replay.actions.get(self.current_action_index)?;
        self.current_action_index += 1;
        Some(action)
    }

    /// Consumes the actions recorded for `tick`, skipping any stale ones
    /// from earlier ticks.
    pub fn actions_for_tick(&mut self, tick: u64) -> Vec<ReplayAction> {
        let mut actions = Vec::new();
        while let Some(action) = self.replay.actions.get(self.current_action_index) {
            if action.tick > tick {
                break;
            }
            if action.tick == tick {
                actions.push(*action);
            }
            self.current_action_index += 1;
        }
        actions
    }

    pub fn reset(&mut self) {
        self.current_action_index = 0;
    }
}

/// Re-runs a recorded session tick by tick. `max_ticks` caps the run for
/// partial playback.
pub fn replay_session(replay: &Replay, max_ticks: Option<u64>) -> Result<SnakeSession, SettingsError> {
    let mut player = ReplayPlayer::new(replay.clone());
    let game = GameState::new(player.metadata().grid_size, SessionRng::new(player.seed()))?;
    let mut session = SnakeSession::new(game);

    let last_tick = max_ticks.map_or(replay.total_ticks, |max| max.min(replay.total_ticks));
    for tick in 0..last_tick {
        for action in player.actions_for_tick(tick) {
            session.apply(action.action);
        }
        session.tick();
    }
    if last_tick == replay.total_ticks {
        for action in player.actions_for_tick(last_tick) {
            session.apply(action.action);
        }
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{BotController, Direction, StepOutcome};
    use crate::replay::{PlayerAction, ReplayRecorder};

    fn create_test_replay() -> Replay {
        Replay {
            metadata: ReplayMetadata {
                engine_version: "1.0.0".to_string(),
                game_started_timestamp_ms: 1234567890,
                seed: 42,
                grid_size: 20,
                tick_interval_ms: 150,
            },
            total_ticks: 5,
            actions: vec![
                ReplayAction { tick: 1, action: PlayerAction::Turn(Direction::Down) },
                ReplayAction { tick: 2, action: PlayerAction::Turn(Direction::Left) },
                ReplayAction { tick: 2, action: PlayerAction::TogglePause },
            ],
        }
    }

    #[test]
    fn test_replay_player_basic() {
        let player = ReplayPlayer::new(create_test_replay());

        assert_eq!(player.engine_version(), "1.0.0");
        assert_eq!(player.seed(), 42);
        assert_eq!(player.total_ticks(), 5);
        assert_eq!(player.total_actions(), 3);
        assert!(!player.is_finished());
    }

    #[test]
    fn test_replay_player_actions_for_tick() {
        let mut player = ReplayPlayer::new(create_test_replay());

        assert!(player.actions_for_tick(0).is_empty());
        assert_eq!(player.actions_for_tick(1).len(), 1);
        assert_eq!(player.actions_for_tick(2).len(), 2);
        assert!(player.is_finished());
    }

    #[test]
    fn test_replay_player_skips_stale_actions() {
        let mut player = ReplayPlayer::new(create_test_replay());
        let actions = player.actions_for_tick(2);
        assert_eq!(actions.len(), 2);
        assert!(player.is_finished());
    }

    #[test]
    fn test_replay_player_reset() {
        let mut player = ReplayPlayer::new(create_test_replay());

        player.next_action();
        player.next_action();
        assert_eq!(player.current_action_index(), 2);

        player.reset();
        assert_eq!(player.current_action_index(), 0);
        assert!(!player.is_finished());
    }

    #[test]
    fn test_recorded_session_replays_identically() {
        let game = GameState::new(12, SessionRng::new(777)).unwrap();
        let mut session = SnakeSession::new(game)
            .with_recorder(ReplayRecorder::new("test".to_string(), 777, 12, 100));

        let mut rounds_finished = 0;
        for tick in 0..600u64 {
            if tick == 40 {
                session.toggle_pause();
            }
            if tick == 45 {
                session.toggle_pause();
            }
            if let Some(dir) = BotController::calculate_move(session.game()) {
                session.turn(dir);
            }
            if let StepOutcome::Died(_) = session.tick() {
                rounds_finished += 1;
                if rounds_finished == 3 {
                    break;
                }
                session.restart();
            }
        }

        let replay = session.take_replay().unwrap();
        let replayed = replay_session(&replay, None).unwrap();

        assert_eq!(replayed.ticks(), session.ticks());
        assert_eq!(replayed.round(), session.round());
        assert_eq!(replayed.high_score(), session.high_score());
        assert_eq!(replayed.game().score(), session.game().score());
        assert_eq!(replayed.game().food(), session.game().food());
        assert_eq!(
            replayed.game().snake_body().collect::<Vec<_>>(),
            session.game().snake_body().collect::<Vec<_>>()
        );
        assert_eq!(replayed.game().death_reason(), session.game().death_reason());
    }

    #[test]
    fn test_partial_replay_stops_early() {
        let game = GameState::new(20, SessionRng::new(5)).unwrap();
        let mut session = SnakeSession::new(game)
            .with_recorder(ReplayRecorder::new("test".to_string(), 5, 20, 100));
        for _ in 0..6 {
            session.tick();
        }
        let replay = session.take_replay().unwrap();

        let partial = replay_session(&replay, Some(3)).unwrap();
        assert_eq!(partial.ticks(), 3);
    }

    #[test]
    fn test_replay_with_invalid_grid_fails() {
        let mut replay = create_test_replay();
        replay.metadata.grid_size = 2;
        assert!(replay_session(&replay, None).is_err());
    }
}
