mod game_loop;
mod input;
mod runner_config;

use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use snake_common::config::{GameSettings, Validate};
use snake_common::games::SessionRng;
use snake_common::games::snake::{GameState, SnakeSession};
use snake_common::replay::{
    generate_replay_filename, load_replay, replay_session, save_replay, ReplayRecorder,
};
use snake_common::version::VERSION;
use snake_common::{log, logger};
use tokio::sync::mpsc;

use game_loop::{run_game_loop, LoopOptions};
use runner_config::{default_config_path, get_config_manager, RunnerConfig};

#[derive(Parser)]
#[command(name = "snake_runner", version, about = "Headless driver for the snake game")]
struct Args {
    #[arg(long, global = true)]
    use_log_prefix: bool,

    /// Also log food spawns and ignored input.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds, reading w/a/s/d, p, r, q from stdin.
    Play(PlayArgs),
    /// Re-run a saved replay and report the outcome.
    Replay {
        file: PathBuf,
        #[arg(long)]
        max_ticks: Option<u64>,
    },
}

#[derive(ClapArgs)]
struct PlayArgs {
    /// YAML config file; defaults to snake_runner_config.yaml next to the binary.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    grid_size: Option<usize>,
    #[arg(long)]
    tick_interval_ms: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Let the built-in bot steer.
    #[arg(long)]
    autopilot: bool,
    #[arg(long)]
    auto_restart: bool,
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Directory to write a replay of the session into.
    #[arg(long)]
    save_replay: Option<PathBuf>,
    /// Write the effective settings back to the config file.
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    match args.command {
        Command::Play(play_args) => play(play_args).await,
        Command::Replay { file, max_ticks } => replay(&file, max_ticks),
    }
}

fn resolve_config(play_args: &PlayArgs, config_path: &Path) -> Result<RunnerConfig, String> {
    let manager = get_config_manager(config_path);
    let mut config = manager.get_config()?;

    if let Some(grid_size) = play_args.grid_size {
        config.game.grid_size = grid_size;
    }
    if let Some(tick_interval_ms) = play_args.tick_interval_ms {
        config.game.tick_interval_ms = tick_interval_ms;
    }
    if play_args.seed.is_some() {
        config.game.seed = play_args.seed;
    }
    if play_args.auto_restart {
        config.game.auto_restart = true;
    }
    if let Some(dir) = &play_args.save_replay {
        config.replays.save = true;
        config.replays.location = dir.to_string_lossy().into_owned();
    }

    config
        .validate()
        .map_err(|e| format!("Invalid settings: {}", e))?;

    if play_args.save_config {
        manager.set_config(&config)?;
        log!("Settings saved to {}", config_path.display());
    }

    Ok(config)
}

async fn play(play_args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = play_args.config.clone().unwrap_or_else(default_config_path);
    let config = resolve_config(&play_args, &config_path)?;
    let settings: &GameSettings = &config.game;

    let seed = settings.seed.unwrap_or_else(rand::random);
    let game = GameState::new(settings.grid_size, SessionRng::new(seed))?;
    let mut session = SnakeSession::new(game);
    if config.replays.save {
        session = session.with_recorder(ReplayRecorder::new(
            VERSION.to_string(),
            seed,
            settings.grid_size,
            settings.tick_interval_ms,
        ));
    }

    log!(
        "Snake {} on a {}x{} grid, seed {}, tick {}ms",
        VERSION,
        settings.grid_size,
        settings.grid_size,
        seed,
        settings.tick_interval_ms
    );

    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    let input_handle = input::spawn_stdin_reader(command_tx);

    let options = LoopOptions {
        tick_interval: settings.tick_interval(),
        autopilot: play_args.autopilot,
        auto_restart: settings.auto_restart,
        rounds: play_args.rounds.max(1),
        max_ticks: play_args.max_ticks,
    };
    let summary = run_game_loop(&mut session, &options, &mut command_rx).await;
    input_handle.abort();

    log!(
        "Finished {} round(s) in {} ticks. High score: {}",
        summary.rounds_finished,
        summary.ticks,
        summary.high_score
    );

    if let Some(replay) = session.take_replay() {
        let replay_dir = Path::new(&config.replays.location);
        if let Err(e) = std::fs::create_dir_all(replay_dir) {
            log!("Failed to create replay directory: {}", e);
        } else {
            let file_path = replay_dir.join(generate_replay_filename(VERSION));
            match save_replay(&file_path, &replay) {
                Ok(_) => log!("Replay saved to: {}", file_path.display()),
                Err(e) => log!("Failed to save replay: {}", e),
            }
        }
    }

    Ok(())
}

fn replay(file: &Path, max_ticks: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let replay = load_replay(file)?;
    if replay.metadata.engine_version != VERSION {
        log!(
            "Replay was recorded with version {}, running {}",
            replay.metadata.engine_version,
            VERSION
        );
    }

    let session = replay_session(&replay, max_ticks)?;
    let game = session.game();
    log!(
        "Replayed {} ticks over {} round(s). Final score {}, high score {}, {}",
        session.ticks(),
        session.round(),
        game.score(),
        session.high_score(),
        match game.death_reason() {
            Some(reason) => format!("ended by {:?}", reason),
            None => "still running".to_string(),
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_args() -> PlayArgs {
        PlayArgs {
            config: None,
            grid_size: None,
            tick_interval_ms: None,
            seed: None,
            autopilot: false,
            auto_restart: false,
            rounds: 1,
            max_ticks: None,
            save_replay: None,
            save_config: false,
        }
    }

    fn missing_config_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("missing_snake_runner_config_{}.yaml", random_number))
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = PlayArgs {
            grid_size: Some(30),
            seed: Some(9),
            save_replay: Some(PathBuf::from("out")),
            ..play_args()
        };
        let config = resolve_config(&args, &missing_config_path()).unwrap();
        assert_eq!(config.game.grid_size, 30);
        assert_eq!(config.game.seed, Some(9));
        assert!(config.replays.save);
        assert_eq!(config.replays.location, "out");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = PlayArgs {
            grid_size: Some(2),
            ..play_args()
        };
        let err = resolve_config(&args, &missing_config_path()).unwrap_err();
        assert!(err.contains("grid_size"));
    }

    #[test]
    fn test_cli_parses_play_subcommand() {
        let args = Args::try_parse_from([
            "snake_runner",
            "play",
            "--grid-size",
            "15",
            "--autopilot",
            "--rounds",
            "3",
        ])
        .unwrap();
        match args.command {
            Command::Play(play) => {
                assert_eq!(play.grid_size, Some(15));
                assert!(play.autopilot);
                assert_eq!(play.rounds, 3);
            }
            Command::Replay { .. } => panic!("expected play"),
        }
    }
}
