use snake_common::games::snake::Direction;
use snake_common::log;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
}

pub fn parse_command(line: &str) -> Option<InputCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => Some(InputCommand::Turn(Direction::Up)),
        "s" | "down" => Some(InputCommand::Turn(Direction::Down)),
        "a" | "left" => Some(InputCommand::Turn(Direction::Left)),
        "d" | "right" => Some(InputCommand::Turn(Direction::Right)),
        "p" | "pause" => Some(InputCommand::TogglePause),
        "r" | "restart" => Some(InputCommand::Restart),
        "q" | "quit" | "exit" => Some(InputCommand::Quit),
        _ => None,
    }
}

/// Reads commands line by line from stdin until EOF or the receiver is gone.
pub fn spawn_stdin_reader(command_tx: mpsc::UnboundedSender<InputCommand>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let Some(command) = parse_command(&line) else {
                        if !line.trim().is_empty() {
                            log!("Unknown command: {:?}", line.trim());
                        }
                        continue;
                    };
                    if command_tx.send(command).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    log!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    })
}
