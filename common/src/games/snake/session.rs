use crate::log;
use crate::replay::{PlayerAction, Replay, ReplayRecorder};
use super::game_state::GameState;
use super::types::{Direction, StepOutcome};

/// A run of consecutive rounds on one `GameState`, with pause, high score,
/// and optional replay recording layered on top of the core.
pub struct SnakeSession {
    game: GameState,
    high_score: u32,
    paused: bool,
    round: u32,
    tick: u64,
    recorder: Option<ReplayRecorder>,
}

impl SnakeSession {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            high_score: 0,
            paused: false,
            round: 1,
            tick: 0,
            recorder: None,
        }
    }

    pub fn with_recorder(mut self, recorder: ReplayRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Driver ticks so far, paused ones included.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Turns are dropped while paused.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.paused || !self.game.set_direction(direction) {
            return false;
        }
        self.record(PlayerAction::Turn(direction));
        true
    }

    /// Returns the new pause state. A finished round cannot be paused.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game.is_game_over() {
            return self.paused;
        }
        self.paused = !self.paused;
        self.record(PlayerAction::TogglePause);
        log!("{}", if self.paused { "Paused" } else { "Resumed" });
        self.paused
    }

    pub fn restart(&mut self) {
        self.game.reset();
        self.paused = false;
        self.round += 1;
        self.record(PlayerAction::Restart);
        log!("Round {} started. High score: {}", self.round, self.high_score);
    }

    pub fn apply(&mut self, action: PlayerAction) {
        match action {
            PlayerAction::Turn(direction) => {
                self.turn(direction);
            }
            PlayerAction::TogglePause => {
                self.toggle_pause();
            }
            PlayerAction::Restart => self.restart(),
        }
    }

    pub fn tick(&mut self) -> StepOutcome {
        self.tick += 1;
        if self.paused {
            return StepOutcome::Frozen;
        }

        let outcome = self.game.step();
        if outcome == StepOutcome::AteFood && self.game.score() > self.high_score {
            self.high_score = self.game.score();
        }
        outcome
    }

    /// Finalizes and detaches the recorder.
    pub fn take_replay(&mut self) -> Option<Replay> {
        let mut recorder = self.recorder.take()?;
        Some(recorder.finalize(self.tick))
    }

    fn record(&mut self, action: PlayerAction) {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record(self.tick, action);
        }
    }
}
