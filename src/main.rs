use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Instant;

use arena_snake::config::{FRAME_INTERVAL, GameConfig, Ruleset, THEME_CLASSIC};
use arena_snake::game::GameLoop;
use arena_snake::input::KeyState;
use arena_snake::renderer;
use arena_snake::score::{JsonSettingsStore, data_dir, settings_path};
use arena_snake::terminal_runtime::{TerminalSession, restore_terminal, sample_keys, wants_quit};
use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};

const LOG_FILE_NAME: &str = "arena-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Play the original rules: walls only, constant speed, no win condition.
    #[arg(long)]
    classic: bool,

    /// Seed the random generator for a reproducible arena and food sequence.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the log here instead of the per-user data directory.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone());

    let store = match JsonSettingsStore::open_default() {
        Ok(store) => store,
        Err(error) => {
            // Surface before raw mode hides stderr; the high score restarts from zero.
            eprintln!("Warning: {error}");
            error!("{error}");
            JsonSettingsStore::empty(settings_path())
        }
    };

    install_panic_hook();
    run(&cli, store)
}

fn run(cli: &Cli, store: JsonSettingsStore) -> io::Result<()> {
    let ruleset = if cli.classic {
        Ruleset::Classic
    } else {
        Ruleset::Arena
    };
    let config = GameConfig::for_ruleset(ruleset);

    let mut session = TerminalSession::enter()?;
    let clock = Instant::now();
    let mut game = match cli.seed {
        Some(seed) => GameLoop::new_with_seed(config, store, seed),
        None => GameLoop::new(config, store),
    };
    let mut keys = KeyState::default();
    info!(
        "arena-snake started with {ruleset:?} rules, settings at {}",
        game.store().path().display()
    );

    loop {
        let sample = sample_keys(FRAME_INTERVAL)?;
        if wants_quit(&sample) {
            break;
        }
        keys.update(sample);

        let now = clock.elapsed();
        game.update(now, &keys);

        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &game, &THEME_CLASSIC, now))?;
    }

    info!("quit with high score {}", game.high_score());
    Ok(())
}

fn init_logging(path: Option<PathBuf>) {
    let path = path.unwrap_or_else(|| data_dir().join(LOG_FILE_NAME));
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("Warning: logging disabled, {} not writable: {error}", path.display());
            return;
        }
    };

    if let Err(error) = WriteLogger::init(LevelFilter::Info, Config::default(), file) {
        eprintln!("Warning: logging disabled: {error}");
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
