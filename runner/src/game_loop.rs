use std::time::Duration;

use snake_common::games::snake::{BotController, SnakeSession, StepOutcome};
use snake_common::{debug_log, log};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::input::InputCommand;

#[derive(Debug, Clone)]
pub struct LoopOptions {
    pub tick_interval: Duration,
    pub autopilot: bool,
    pub auto_restart: bool,
    /// Stop after this many rounds have ended.
    pub rounds: u32,
    pub max_ticks: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds_finished: u32,
    pub high_score: u32,
    pub ticks: u64,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Fixed-rate driver. Queued commands are applied before the next tick; a
/// turn only overwrites the pending heading, which that tick consumes.
pub async fn run_game_loop(
    session: &mut SnakeSession,
    options: &LoopOptions,
    command_rx: &mut mpsc::UnboundedReceiver<InputCommand>,
) -> RunSummary {
    let mut tick_interval_timer = interval(options.tick_interval);
    tick_interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut rounds_finished = 0;
    let mut input_open = true;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                log!("Shutdown signal received");
                break;
            }
            command = command_rx.recv(), if input_open => {
                match command {
                    Some(command) => {
                        if apply_command(session, command) == Flow::Stop {
                            log!("Quit requested");
                            break;
                        }
                    }
                    None => {
                        debug_log!("Input closed");
                        input_open = false;
                    }
                }
            }
            _ = tick_interval_timer.tick() => {
                if run_tick(session, options, &mut rounds_finished) == Flow::Stop {
                    break;
                }
            }
        }

        if !input_open && is_waiting_for_input(session, options) {
            log!("Input closed while waiting for a restart or unpause, stopping");
            break;
        }
    }

    RunSummary {
        rounds_finished,
        high_score: session.high_score(),
        ticks: session.ticks(),
    }
}

/// Only input can end a pause or, without auto-restart, start the next round.
fn is_waiting_for_input(session: &SnakeSession, options: &LoopOptions) -> bool {
    session.is_paused() || (session.game().is_game_over() && !options.auto_restart)
}

fn apply_command(session: &mut SnakeSession, command: InputCommand) -> Flow {
    match command {
        InputCommand::Turn(direction) => {
            if !session.turn(direction) {
                debug_log!("Ignored turn to {:?}", direction);
            }
        }
        InputCommand::TogglePause => {
            session.toggle_pause();
        }
        InputCommand::Restart => {
            if session.game().is_game_over() {
                session.restart();
            } else {
                debug_log!("Restart ignored, round still running");
            }
        }
        InputCommand::Quit => return Flow::Stop,
    }
    Flow::Continue
}

fn run_tick(session: &mut SnakeSession, options: &LoopOptions, rounds_finished: &mut u32) -> Flow {
    if options.autopilot
        && !session.is_paused()
        && let Some(direction) = BotController::calculate_move(session.game())
    {
        session.turn(direction);
    }

    match session.tick() {
        StepOutcome::AteFood => {
            log!(
                "Round {}: score {} (high score {})",
                session.round(),
                session.game().score(),
                session.high_score()
            );
        }
        StepOutcome::Died(reason) => {
            *rounds_finished += 1;
            log!(
                "Round {} over after {} moves: {:?}, score {}",
                session.round(),
                session.game().ticks(),
                reason,
                session.game().score()
            );
            if *rounds_finished >= options.rounds {
                return Flow::Stop;
            }
            if options.auto_restart {
                session.restart();
            } else {
                log!("Enter 'r' to start the next round");
            }
        }
        StepOutcome::Moved | StepOutcome::Frozen => {}
    }

    if let Some(max_ticks) = options.max_ticks
        && session.ticks() >= max_ticks
    {
        log!("Reached tick limit of {}", max_ticks);
        return Flow::Stop;
    }

    Flow::Continue
}
