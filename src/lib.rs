//! Grid snake simulation.
//!
//! The crate holds the game rules only: a square board, a snake that moves one
//! cell per step, food placement and collision checks. Drawing and timing belong
//! to the host, which drives a [`GameSimulation`] through `step`, `set_direction`
//! and `reset`, and reads back a [`GameState`] every frame.

pub mod config;
pub mod error;
pub mod grid;
pub mod pacer;
pub mod sim;
pub mod snake;

pub use config::Config;
pub use error::{ConfigError, SimError, StateError};
pub use grid::{Cell, Direction};
pub use pacer::{Cadence, Pacer};
pub use sim::{place_food, GameSimulation, GameState, Status};
pub use snake::Snake;
