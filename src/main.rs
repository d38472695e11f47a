mod game;
mod term;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use grid_snake::config::{self, Config};

/// Snake on a square grid, played in the terminal.
#[derive(Parser, Debug)]
#[command(name = "grid-snake", version)]
struct Args {
    /// Side length of the board, in cells
    #[arg(long, default_value_t = config::GRID_SIZE)]
    grid_size: i32,

    /// Redraw and input polling interval, in milliseconds
    #[arg(long, default_value_t = config::RENDER_TICK_MS)]
    render_ms: u64,

    /// Interval between snake moves, in milliseconds
    #[arg(long, default_value_t = config::MOVE_TICK_MS)]
    move_ms: u64,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            render_tick: Duration::from_millis(self.render_ms),
            move_tick: Duration::from_millis(self.move_ms),
            ..Config::default()
        }
        .with_grid_size(self.grid_size)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr, redirect it while playing (RUST_LOG=debug grid-snake 2>snake.log)
    env_logger::init();

    let args = Args::parse();
    let mut game = game::SnakeGame::new(args.config(), args.seed)?;
    game.initialize()?;

    // The terminal has to come back even when the game errors out
    let res = game.run();
    game.restore()?;
    res
}
