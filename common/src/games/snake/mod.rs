mod bot_controller;
mod game_state;
mod session;
mod snake;
mod types;

pub use bot_controller::BotController;
pub use game_state::GameState;
pub use session::SnakeSession;
pub use snake::Snake;
pub use types::{DeathReason, Direction, Point, StepOutcome};
