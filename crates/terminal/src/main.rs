mod app;
mod keyboard;
mod tui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use app::{App, Screen};
use termduel::GameConfig;
use tui::Tui;

#[derive(Parser, Debug)]
#[command(name = "termduel")]
#[command(about = "Two-player terminal shooting duel over TCP")]
struct Args {
    #[arg(short, long, default_value_t = termduel::DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value_t = 50, help = "Host tick period in ms")]
    tick_ms: u64,

    #[arg(
        long,
        value_parser = clap::value_parser!(i32).range(1..),
        help = "Starting health for both players"
    )]
    health: Option<i32>,

    #[arg(long, value_parser = parse_speed, help = "Cells moved per key press")]
    speed: Option<f64>,

    #[arg(long, conflicts_with = "join", help = "Create a room right away")]
    host: bool,

    #[arg(short, long, help = "Join the room at this address right away")]
    join: Option<String>,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
            player_health: self.health.unwrap_or(defaults.player_health),
            player_speed: self.speed.unwrap_or(defaults.player_speed),
            ..defaults
        }
    }

    fn first_screen(&self) -> Screen {
        if self.host {
            Screen::CreateRoom
        } else if let Some(address) = &self.join {
            Screen::JoinRoom(Some(address.clone()))
        } else {
            Screen::Menu
        }
    }
}

fn parse_speed(value: &str) -> Result<f64, String> {
    let speed: f64 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err("speed must be a finite number above zero".to_string())
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => env_logger::init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = args.game_config();
    let runtime = tokio::runtime::Runtime::new().context("cannot start async runtime")?;

    let mut tui = Tui::new().context("cannot set up terminal")?;
    log::info!("Starting with {:?}", config);

    let result = App::new(&mut tui, &runtime, config, args.port).run(args.first_screen());
    tui.restore()?;

    if let Err(e) = &result {
        eprintln!("termduel: {:#}", e);
    }
    result
}
