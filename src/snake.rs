use crate::grid::{Cell, Direction};

/// Outcome of a single forward move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Moved {
    pub new_head: Cell,
    pub old_tail: Cell,
}

/// Snake body, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        Snake { body: vec![head] }
    }

    /// Builds a snake from explicit cells, head first. Returns `None` for an empty body.
    pub fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Snake { body: cells })
        }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Moves one cell in `direction` without changing length. The new head is
    /// not wrapped and may lie off the board.
    pub fn move_step(&mut self, direction: Direction) -> Moved {
        let new_head = self.head().step(direction);
        self.body.insert(0, new_head);
        // Never empty: we just pushed a head.
        let old_tail = self.body.pop().unwrap_or(new_head);

        Moved { new_head, old_tail }
    }

    /// Prepends the cell one step ahead of the head, wrapped onto the board.
    /// Unlike `move_step`, this wraps around the edges.
    pub fn grow(&mut self, direction: Direction, grid_size: i32) -> Cell {
        let growth = self.head().step_wrapped(direction, grid_size);
        self.body.insert(0, growth);
        growth
    }

    pub fn bites_itself(&self) -> bool {
        self.body[1..].contains(&self.head())
    }
}
