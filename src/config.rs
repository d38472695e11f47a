use std::time::Duration;

use crate::error::ConfigError;
use crate::grid::{Cell, Direction};

pub const GRID_SIZE: i32 = 20;
/// Largest accepted board side; food placement walks every cell.
pub const MAX_GRID_SIZE: i32 = 256;
pub const RENDER_TICK_MS: u64 = 50;
pub const MOVE_TICK_MS: u64 = 200;
pub const START_CELL: Cell = Cell::new(5, 5);
pub const START_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Side length of the square board.
    pub grid_size: i32,
    /// Interval at which the host redraws and samples input.
    pub render_tick: Duration,
    /// Interval between simulation steps. Should be a multiple of `render_tick`.
    pub move_tick: Duration,
    pub start: Cell,
    pub start_direction: Direction,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: GRID_SIZE,
            render_tick: Duration::from_millis(RENDER_TICK_MS),
            move_tick: Duration::from_millis(MOVE_TICK_MS),
            start: START_CELL,
            start_direction: START_DIRECTION,
        }
    }
}

impl Config {
    pub fn with_grid_size(mut self, grid_size: i32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge { size: self.grid_size, max: MAX_GRID_SIZE });
        }

        if !self.start.is_inside(self.grid_size) {
            return Err(ConfigError::StartOutsideGrid { start: self.start, size: self.grid_size });
        }

        if self.render_tick.is_zero() {
            return Err(ConfigError::ZeroRenderTick);
        }

        if self.move_tick < self.render_tick {
            return Err(ConfigError::MoveFasterThanRender {
                move_ms: self.move_tick.as_millis(),
                render_ms: self.render_tick.as_millis(),
            });
        }

        Ok(())
    }
}
