use std::convert::TryFrom;
use std::thread::sleep;

use anyhow::{bail, Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;

use grid_snake::{Cadence, Cell, Config, Direction::{self, *}, GameSimulation, Pacer, Status};

use crate::term::{Coords, TermInt, TermManager};

// Each board cell takes two terminal columns so the grid looks square
const SNAKE_BODY: &str = "██";
const FOOD: &str = "()";
const EMPTY: &str = "  ";
const DEAD_SNAKE: &str = "XX";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    PlayAgain,
    Quit,
}

pub struct SnakeGame {
    sim: GameSimulation,
    pacer: Pacer,
    paused: bool,
    term: TermManager,
    // Top-left corner of the board frame; the score line sits just above it
    origin: Coords,
    frame: Coords,
}

impl SnakeGame {
    /// Checks that the board fits the terminal before any game state is built.
    pub fn new(config: Config, seed: Option<u64>) -> Result<Self> {
        config.validate().context("invalid game configuration")?;

        let term = TermManager::new().context("reading terminal size")?;
        let (w, h) = term.get_terminal_size();
        let (origin, frame) = match frame_size(config.grid_size) {
            Some((board_w, board_h)) if w >= board_w && h > board_h => {
                (((w - board_w) / 2, (h - board_h + 1) / 2), (board_w, board_h))
            }
            _ => bail!(
                "terminal is {}x{}, too small for a {}x{} grid",
                w, h, config.grid_size, config.grid_size
            ),
        };

        let pacer = Pacer::new(Cadence::from(&config));
        let sim = match seed {
            Some(seed) => GameSimulation::with_seed(config, seed),
            None => GameSimulation::new(config),
        }
        .context("invalid game configuration")?;

        Ok(SnakeGame { sim, pacer, paused: false, term, origin, frame })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup().context("setting up the terminal")
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore().context("restoring the terminal")
    }

    /// Intro screen, then games back to back until the player quits.
    pub fn run(&mut self) -> Result<()> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(());
        }

        self.term.hide_message()?;

        while self.play()? == Flow::PlayAgain {}
        Ok(())
    }

    pub fn play(&mut self) -> Result<Flow> {
        self.sim.reset();
        self.pacer.reset();
        self.paused = false;

        self.term.clear()?;
        self.term.draw_borders(self.origin, self.frame)?;
        self.draw_board()?;

        let render_tick = self.pacer.cadence().render_tick;

        loop {
            sleep(render_tick);

            for key_ev in self.term.read_key_events_queue()? {
                match &key_ev {
                    ev if is_ctrl_c(ev) => return Ok(Flow::Quit),
                    KeyEvent { code, .. } => match code {
                        KeyCode::Char('w') | KeyCode::Up => self.sim.set_direction(Up),
                        KeyCode::Char('a') | KeyCode::Left => self.sim.set_direction(Left),
                        KeyCode::Char('s') | KeyCode::Down => self.sim.set_direction(Down),
                        KeyCode::Char('d') | KeyCode::Right => self.sim.set_direction(Right),
                        KeyCode::Esc => self.toggle_pause()?,
                        _ => {}
                    }
                }
            }

            if self.paused { continue; }

            if self.pacer.tick() {
                self.sim.step();
            }

            self.draw_board()?;

            if self.sim.is_game_over() {
                self.game_over()?;
                break;
            }
        } // Game loop

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            Ok(Flow::Quit)
        } else {
            Ok(Flow::PlayAgain)
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn cell_pos(&self, cell: Cell) -> Coords {
        (self.origin.0 + 1 + cell.x as TermInt * 2, self.origin.1 + 1 + cell.y as TermInt)
    }

    fn draw_board(&mut self) -> Result<()> {
        let state = self.sim.snapshot();
        let n = self.sim.grid_size();

        self.term.print_str_at((self.origin.0, self.origin.1 - 1), &format!("Score: {:<6}", state.score()))?;

        for y in 0..n {
            for x in 0..n {
                let cell = Cell::new(x, y);
                let glyph = if cell == state.head() {
                    head_glyph(state.direction())
                } else if state.snake().contains(&cell) {
                    SNAKE_BODY
                } else if cell == state.food() {
                    FOOD
                } else {
                    EMPTY
                };
                let pos = self.cell_pos(cell);
                self.term.print_str_at(pos, glyph)?;
            }
        }

        self.term.flush()?;
        Ok(())
    }

    fn game_over(&mut self) -> Result<()> {
        let state = self.sim.snapshot();
        let n = self.sim.grid_size();
        let won = state.status() == Status::Won;
        info!("{} with score {}", if won {"won"} else {"lost"}, state.score());

        if !won {
            for cell in state.snake().iter().filter(|c| c.is_inside(n)) {
                let pos = self.cell_pos(*cell);
                self.term.print_str_at(pos, DEAD_SNAKE)?;
            }
        }

        let s = if won {"You won!"} else {"Game over!"};
        self.term.show_message(&[
            s,
            &*format!("Score: {}", state.score()),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])?;
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

/// Outer size of the bordered board, or `None` if it cannot be addressed on a terminal.
fn frame_size(grid_size: i32) -> Option<Coords> {
    let n = TermInt::try_from(grid_size).ok()?;
    let width = n.checked_mul(2)?.checked_add(2)?;
    let height = n.checked_add(2)?;
    Some((width, height))
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Up => "^^",
        Down => "vv",
        Left => "<<",
        Right => ">>",
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
