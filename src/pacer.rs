//! Splits the host's fast render tick into the slower movement cadence.
//!
//! The simulation never looks at a clock. The host sleeps for `render_tick`,
//! calls `Pacer::tick`, and steps the game whenever it returns `true`.

use std::convert::TryFrom;
use std::time::Duration;

use crate::config::Config;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cadence {
    pub render_tick: Duration,
    pub move_tick: Duration,
}

impl Cadence {
    /// Render ticks per movement step, rounded up, never below one and
    /// saturating at `u32::MAX`.
    pub fn ticks_per_move(&self) -> u32 {
        let render = self.render_tick.as_micros().max(1);
        let moves = self.move_tick.as_micros();
        let ticks = (moves + render - 1) / render;
        u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
    }
}

impl From<&Config> for Cadence {
    fn from(config: &Config) -> Self {
        Cadence { render_tick: config.render_tick, move_tick: config.move_tick }
    }
}

pub struct Pacer {
    cadence: Cadence,
    ticks_until_step: u32,
}

impl Pacer {
    pub fn new(cadence: Cadence) -> Self {
        Pacer { cadence, ticks_until_step: cadence.ticks_per_move() }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Counts one render tick. Returns `true` when a simulation step is due.
    pub fn tick(&mut self) -> bool {
        self.ticks_until_step -= 1;
        if self.ticks_until_step == 0 {
            self.ticks_until_step = self.cadence.ticks_per_move();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.ticks_until_step = self.cadence.ticks_per_move();
    }
}
