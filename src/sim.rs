//! The snake simulation: owns the board state and advances it one step at a time.
//!
//! Timing is left to the caller. A host calls [`GameSimulation::step`] on its
//! movement cadence, feeds key presses through [`GameSimulation::set_direction`]
//! and reads [`GameSimulation::state`] whenever it redraws.

use log::{debug, info, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::Config;
use crate::error::{ConfigError, SimError, StateError};
use crate::grid::{Cell, Direction};
use crate::snake::{Moved, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// The head left the board or ran into the body.
    Lost,
    /// The snake covers the whole board.
    Won,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    snake: Snake,
    food: Cell,
    direction: Direction,
    status: Status,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, direction: Direction) -> Self {
        GameState { snake, food, direction, status: Status::Running }
    }

    /// Snake cells, head first.
    pub fn snake(&self) -> &[Cell] {
        self.snake.body()
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    /// Heading used by the most recent step.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status != Status::Running
    }

    pub fn score(&self) -> usize {
        self.snake.len() - 1
    }

    /// Every snake cell on the board and distinct, food on a free board cell.
    pub fn check(&self, grid_size: i32) -> Result<(), StateError> {
        let body = self.snake();
        for (i, &cell) in body.iter().enumerate() {
            if !cell.is_inside(grid_size) {
                return Err(StateError::SnakeOutsideGrid(cell));
            }
            if body[..i].contains(&cell) {
                return Err(StateError::SnakeOverlaps(cell));
            }
        }

        if !self.food.is_inside(grid_size) {
            return Err(StateError::FoodOutsideGrid(self.food));
        }
        if body.contains(&self.food) {
            return Err(StateError::FoodOnSnake(self.food));
        }

        Ok(())
    }
}

/// Picks a uniformly random cell of the `grid_size` board not covered by `snake`.
pub fn place_food<R: Rng + ?Sized>(
    snake: &[Cell],
    grid_size: i32,
    rng: &mut R,
) -> Result<Cell, SimError> {
    let free: Vec<Cell> = (0..grid_size)
        .flat_map(|x| (0..grid_size).map(move |y| Cell::new(x, y)))
        .filter(|cell| !snake.contains(cell))
        .collect();

    free.choose(rng).copied().ok_or(SimError::BoardFull)
}

pub struct GameSimulation<R = Pcg32> {
    config: Config,
    state: GameState,
    pending: Option<Direction>,
    rng: R,
}

impl GameSimulation<Pcg32> {
    /// Creates a game seeded from system entropy.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::from_entropy())
    }

    /// Creates a game whose food placement is reproducible from `seed`.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSimulation<R> {
    pub fn with_rng(config: Config, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = initial_state(&config, &mut rng);
        Ok(GameSimulation { config, state, pending: None, rng })
    }

    /// Starts from an arbitrary running state instead of the configured start position.
    pub fn with_state(config: Config, state: GameState, rng: R) -> Result<Self, StateError> {
        config.validate()?;
        state.check(config.grid_size)?;
        Ok(GameSimulation { config, state, pending: None, rng })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid_size(&self) -> i32 {
        self.config.grid_size
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state, for renderers that keep frames around.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Direction that the next step will apply, if one was accepted since the last step.
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Back to a single cell at the start position, heading in the start direction.
    pub fn reset(&mut self) {
        self.state = initial_state(&self.config, &mut self.rng);
        self.pending = None;
    }

    /// Swaps in a new configuration and resets. The old configuration stays on error.
    pub fn reconfigure(&mut self, config: Config) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Queues `direction` for the next step unless it would reverse the snake.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.is_game_over() {
            return;
        }

        if direction == self.state.direction.opposite() {
            trace!("ignoring reversal {:?} -> {:?}", self.state.direction, direction);
            return;
        }

        self.pending = Some(direction);
    }

    /// Advances the game by one cell. Does nothing once the game is over.
    pub fn step(&mut self) -> &GameState {
        if self.state.is_game_over() {
            return &self.state;
        }

        if let Some(direction) = self.pending.take() {
            self.state.direction = direction;
        }

        let grid_size = self.config.grid_size;
        let direction = self.state.direction;
        let Moved { new_head, old_tail } = self.state.snake.move_step(direction);
        trace!("head {:?} tail {:?} moving {:?}", new_head, old_tail, direction);

        if new_head == self.state.food {
            match self.eat(direction) {
                Ok(()) => {}
                Err(SimError::BoardFull) => {
                    self.state.status = Status::Won;
                    info!("board full, game won with score {}", self.state.score());
                    return &self.state;
                }
            }
        }

        let head = self.state.snake.head();
        if !head.is_inside(grid_size) || self.state.snake.bites_itself() {
            self.state.status = Status::Lost;
            info!("game over at {:?} with score {}", head, self.state.score());
        }

        &self.state
    }

    // Relocates the food, then grows by one wrapped cell ahead of the head.
    fn eat(&mut self, direction: Direction) -> Result<(), SimError> {
        let grid_size = self.config.grid_size;

        self.state.food = place_food(self.state.snake.body(), grid_size, &mut self.rng)?;
        let growth = self.state.snake.grow(direction, grid_size);
        debug!("grew to {} at {:?}, food at {:?}", self.state.snake.len(), growth, self.state.food);

        if growth == self.state.food {
            self.state.food = place_food(self.state.snake.body(), grid_size, &mut self.rng)?;
            debug!("growth covered the food, moved it to {:?}", self.state.food);
        }

        Ok(())
    }
}

fn initial_state<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> GameState {
    let snake = Snake::new(config.start);
    let mut state = GameState::new(snake, config.start, config.start_direction);

    match place_food(state.snake(), config.grid_size, rng) {
        Ok(food) => state.food = food,
        Err(SimError::BoardFull) => state.status = Status::Won,
    }

    info!("new game on a {0}x{0} board, food at {1:?}", config.grid_size, state.food);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction::*;

    fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
        raw.iter().map(|&c| Cell::from(c)).collect()
    }

    fn sim_with(snake: &[(i32, i32)], food: (i32, i32), direction: Direction) -> GameSimulation {
        let snake = Snake::from_cells(cells(snake)).unwrap();
        let state = GameState::new(snake, food.into(), direction);
        GameSimulation::with_state(Config::default(), state, Pcg32::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_reset_state() {
        let sim = GameSimulation::with_seed(Config::default(), 1).unwrap();
        let state = sim.state();

        assert_eq!(state.snake(), &[Cell::new(5, 5)]);
        assert_eq!(state.direction(), Right);
        assert_eq!(state.status(), Status::Running);
        assert_eq!(state.score(), 0);
        assert_ne!(state.food(), Cell::new(5, 5));
        assert!(state.food().is_inside(20));
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut sim = sim_with(&[(0, 5)], (10, 10), Left);
        sim.step();
        assert!(sim.is_game_over());

        sim.set_direction(Up);
        sim.reset();
        assert!(!sim.is_game_over());
        assert_eq!(sim.state().snake(), &[Cell::new(5, 5)]);
        assert_eq!(sim.state().direction(), Right);
        assert_eq!(sim.pending_direction(), None);
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameSimulation::with_seed(Config::default(), 42).unwrap();
        let b = GameSimulation::with_seed(Config::default(), 42).unwrap();
        assert_eq!(a.state().food(), b.state().food());
    }

    #[test]
    fn test_reversal_ignored() {
        let mut sim = sim_with(&[(5, 5), (4, 5)], (10, 10), Right);
        sim.set_direction(Left);
        assert_eq!(sim.pending_direction(), None);

        sim.step();
        assert_eq!(sim.state().head(), Cell::new(6, 5));
        assert!(!sim.is_game_over());
    }

    #[test]
    fn test_turn_applies_on_next_step() {
        let mut sim = sim_with(&[(5, 5), (4, 5)], (10, 10), Right);
        sim.set_direction(Down);
        assert_eq!(sim.state().direction(), Right);
        assert_eq!(sim.pending_direction(), Some(Down));

        sim.step();
        assert_eq!(sim.state().direction(), Down);
        assert_eq!(sim.state().snake(), &cells(&[(5, 6), (5, 5)])[..]);
        assert_eq!(sim.pending_direction(), None);
    }

    #[test]
    fn test_reversal_checked_against_heading() {
        // Up then Left while heading Right must not turn the snake back on itself.
        let mut sim = sim_with(&[(5, 5), (4, 5)], (10, 10), Right);
        sim.set_direction(Up);
        sim.set_direction(Left);
        assert_eq!(sim.pending_direction(), Some(Up));
    }

    #[test]
    fn test_eating_grows_by_wrapped_cell() {
        let mut sim = sim_with(&[(5, 5), (4, 5)], (6, 5), Right);
        let state = sim.step();

        assert_eq!(state.snake(), &cells(&[(7, 5), (6, 5), (5, 5)])[..]);
        assert_eq!(state.score(), 2);
        assert!(!state.is_game_over());
        assert!(!state.snake().contains(&state.food()));
    }

    #[test]
    fn test_growth_wraps_at_edge() {
        let mut sim = sim_with(&[(18, 5), (17, 5)], (19, 5), Right);
        let state = sim.step();

        assert_eq!(state.snake(), &cells(&[(0, 5), (19, 5), (18, 5)])[..]);
        assert_eq!(state.status(), Status::Running);
    }

    #[test]
    fn test_wall_collision() {
        let mut sim = sim_with(&[(19, 3)], (0, 0), Right);
        assert_eq!(sim.step().status(), Status::Lost);
        assert_eq!(sim.state().head(), Cell::new(20, 3));
    }

    #[test]
    fn test_self_collision() {
        let mut sim = sim_with(&[(5, 5), (5, 6), (6, 6), (6, 5), (7, 5)], (0, 0), Right);
        let state = sim.step();

        assert_eq!(state.head(), Cell::new(6, 5));
        assert_eq!(state.status(), Status::Lost);
    }

    #[test]
    fn test_step_after_game_over_is_noop() {
        let mut sim = sim_with(&[(0, 5)], (10, 10), Left);
        sim.step();
        let frozen = sim.snapshot();

        sim.set_direction(Down);
        sim.step();
        sim.step();
        assert_eq!(sim.snapshot(), frozen);
        assert_eq!(sim.pending_direction(), None);
    }

    // Always draws zero, so `place_food` picks the first free cell in x-then-y order.
    struct FirstFree;

    impl rand::RngCore for FirstFree {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.iter_mut().for_each(|b| *b = 0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_growth_onto_new_food_moves_food_again() {
        // Eating at (0,1) frees (0,3); the first free cell is (0,0), which the
        // upward growth then covers, so food has to move once more.
        let snake = Snake::from_cells(cells(&[(0, 2), (0, 3)])).unwrap();
        let state = GameState::new(snake, Cell::new(0, 1), Up);
        let mut sim = GameSimulation::with_state(Config::default(), state, FirstFree).unwrap();

        let state = sim.step();
        assert_eq!(state.snake(), &cells(&[(0, 0), (0, 1), (0, 2)])[..]);
        assert_eq!(state.food(), Cell::new(0, 3));
        assert_eq!(state.status(), Status::Running);
    }

    #[test]
    fn test_with_state_rejects_bad_states() {
        fn state(snake: &[(i32, i32)], food: (i32, i32)) -> GameState {
            GameState::new(Snake::from_cells(cells(snake)).unwrap(), food.into(), Right)
        }

        let config = Config::default();
        let rng = || Pcg32::seed_from_u64(1);

        let err = GameSimulation::with_state(config.clone(), state(&[(20, 5)], (1, 1)), rng());
        assert_eq!(err.err(), Some(StateError::SnakeOutsideGrid(Cell::new(20, 5))));

        let overlapping = state(&[(5, 5), (4, 5), (5, 5)], (1, 1));
        let err = GameSimulation::with_state(config.clone(), overlapping, rng());
        assert_eq!(err.err(), Some(StateError::SnakeOverlaps(Cell::new(5, 5))));

        let err = GameSimulation::with_state(config.clone(), state(&[(5, 5)], (-1, 1)), rng());
        assert_eq!(err.err(), Some(StateError::FoodOutsideGrid(Cell::new(-1, 1))));

        let covered = state(&[(5, 5), (4, 5)], (4, 5));
        let err = GameSimulation::with_state(config.clone(), covered, rng());
        assert_eq!(err.err(), Some(StateError::FoodOnSnake(Cell::new(4, 5))));

        let tiny = config.with_grid_size(1);
        let err = GameSimulation::with_state(tiny, state(&[(0, 0)], (0, 0)), rng());
        assert_eq!(err.err(), Some(StateError::Config(ConfigError::GridTooSmall(1))));
    }

    #[test]
    fn test_board_full_wins() {
        let config = Config { start: Cell::new(0, 0), ..Config::default() }.with_grid_size(3);
        let snake = Snake::from_cells(cells(&[
            (0, 1), (0, 0), (1, 0), (2, 0), (0, 2), (1, 2), (2, 2), (2, 1),
        ]))
        .unwrap();
        let state = GameState::new(snake, Cell::new(1, 1), Right);
        let mut sim = GameSimulation::with_state(config, state, Pcg32::seed_from_u64(3)).unwrap();

        let state = sim.step();
        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.snake().len(), 9);
        assert_eq!(state.score(), 8);

        let frozen = sim.snapshot();
        sim.step();
        assert_eq!(sim.snapshot(), frozen);
    }

    #[test]
    fn test_place_food_board_full() {
        let mut rng = Pcg32::seed_from_u64(0);
        let snake = cells(&[(0, 0), (0, 1), (1, 1), (1, 0)]);
        assert_eq!(place_food(&snake, 2, &mut rng), Err(SimError::BoardFull));
    }

    #[test]
    fn test_place_food_single_free_cell() {
        let mut rng = Pcg32::seed_from_u64(0);
        let snake = cells(&[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(place_food(&snake, 2, &mut rng), Ok(Cell::new(1, 0)));
    }

    #[test]
    fn test_reconfigure() {
        let mut sim = GameSimulation::with_seed(Config::default(), 9).unwrap();
        assert!(sim.reconfigure(Config::default().with_grid_size(3)).is_err());
        assert_eq!(sim.grid_size(), 20);

        sim.reconfigure(Config::default().with_grid_size(10)).unwrap();
        assert_eq!(sim.grid_size(), 10);
        assert!(sim.state().food().is_inside(10));
    }
}
