use thiserror::Error;

use crate::grid::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Every cell is covered by the snake, so food has nowhere to go.
    #[error("board is full: no free cell left for food")]
    BoardFull,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(i32),
    #[error("grid size must be at most {max}, got {size}")]
    GridTooLarge { size: i32, max: i32 },
    #[error("start cell ({}, {}) lies outside a {size}x{size} grid", .start.x, .start.y)]
    StartOutsideGrid { start: Cell, size: i32 },
    #[error("render tick must be non-zero")]
    ZeroRenderTick,
    #[error("move tick ({move_ms}ms) is shorter than the render tick ({render_ms}ms)")]
    MoveFasterThanRender { move_ms: u128, render_ms: u128 },
}

/// A hand-built starting state that does not fit the board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("snake cell ({}, {}) lies outside the grid", .0.x, .0.y)]
    SnakeOutsideGrid(Cell),
    #[error("snake covers ({}, {}) more than once", .0.x, .0.y)]
    SnakeOverlaps(Cell),
    #[error("food ({}, {}) lies outside the grid", .0.x, .0.y)]
    FoodOutsideGrid(Cell),
    #[error("food ({}, {}) is under the snake", .0.x, .0.y)]
    FoodOnSnake(Cell),
}
