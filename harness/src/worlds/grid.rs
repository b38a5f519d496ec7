//! `GridWorld`: 8-adjacent square grid with unit moves and removed cells.
//!
//! Cells are `(x, y)` with `0 <= x, y <= size`. Every move, straight or
//! diagonal, costs 1.
//!
//! With [`Heuristic::Chebyshev`] the world turns best-first search into A*
//! by reshaping weights: a move `u -> v` costs `1 + h(v) - h(u)` and the
//! start costs `h(start)`, where `h` is the Chebyshev distance to the goal.
//! `h` is consistent for unit 8-adjacent moves, so reshaped weights stay in
//! `0..=2` and the goal's final cost equals its true path length.

use std::collections::BTreeSet;
use std::convert::Infallible;

use frontier_search::{IterCursor, SearchProblem};

use crate::contract::WorldV1;

/// Grid coordinate `(x, y)`.
pub type Cell = (i32, i32);

/// Neighbor order before sorting by weight; ties keep this order.
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 1),
    (1, 0),
    (0, 1),
    (1, -1),
    (-1, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
];

/// Cost estimate folded into edge weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// No estimate: plain uniform-cost search.
    Zero,
    /// Chebyshev distance to the goal.
    Chebyshev,
}

impl Heuristic {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Chebyshev => "chebyshev",
        }
    }
}

/// Square 8-adjacent grid world from `(0, 0)` to `(size, size)`.
#[derive(Debug, Clone)]
pub struct GridWorld {
    id: String,
    size: i32,
    removed: BTreeSet<Cell>,
    goal: Cell,
    heuristic: Heuristic,
}

impl GridWorld {
    /// Grid with nothing removed.
    #[must_use]
    pub fn open(size: i32) -> Self {
        Self::with_removed(format!("grid_open_{size}"), size, BTreeSet::new())
    }

    /// Grid with an L-shaped wall near the goal corner: the column
    /// `x = size - 4` for `4 <= y < size - 3`, and the row `y = size - 4` for
    /// `6 <= x < size - 4`. The direct diagonal is blocked, so the shortest
    /// path has length `2 * size - 9` once `size >= 10`.
    #[must_use]
    pub fn walled(size: i32) -> Self {
        let column = (4..size - 3).map(|y| (size - 4, y));
        let row = (6..size - 4).map(|x| (x, size - 4));
        Self::with_removed(format!("grid_walled_{size}"), size, column.chain(row).collect())
    }

    /// Grid cut in two by removing the whole column `x = size / 2`. The goal
    /// is unreachable.
    #[must_use]
    pub fn cut(size: i32) -> Self {
        let column = (0..=size).map(|y| (size / 2, y)).collect();
        Self::with_removed(format!("grid_cut_{size}"), size, column)
    }

    fn with_removed(id: String, size: i32, removed: BTreeSet<Cell>) -> Self {
        Self {
            id,
            size,
            removed,
            goal: (size, size),
            heuristic: Heuristic::Zero,
        }
    }

    /// Fold `heuristic` into weights. The world id records the choice.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        if self.heuristic != heuristic {
            self.id = format!("{}_{}", self.id, heuristic.as_str());
        }
        self.heuristic = heuristic;
        self
    }

    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Whether `cell` is inside the grid and not removed.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        let (x, y) = cell;
        (0..=self.size).contains(&x) && (0..=self.size).contains(&y) && !self.removed.contains(&cell)
    }

    /// Estimated remaining cost from `cell`.
    #[must_use]
    pub fn estimate(&self, cell: Cell) -> u32 {
        match self.heuristic {
            Heuristic::Zero => 0,
            Heuristic::Chebyshev => {
                let dx = (self.goal.0 - cell.0).unsigned_abs();
                let dy = (self.goal.1 - cell.1).unsigned_abs();
                dx.max(dy)
            }
        }
    }

    /// Open neighbors of `cell` with their weights, ascending by weight.
    #[must_use]
    pub fn weighted_neighbors(&self, cell: Cell) -> Vec<(Cell, u32)> {
        if !self.is_open(cell) {
            return Vec::new();
        }
        let here = self.estimate(cell);
        let mut out: Vec<(Cell, u32)> = DIRECTIONS
            .iter()
            .map(|&(dx, dy)| (cell.0 + dx, cell.1 + dy))
            .filter(|&next| self.is_open(next))
            .map(|next| (next, (1 + self.estimate(next)).saturating_sub(here)))
            .collect();
        out.sort_by_key(|&(_, weight)| weight);
        out
    }

    /// ASCII picture, top row first: `#` removed, `*` on `path`, `.` open.
    #[must_use]
    pub fn render(&self, path: &[Cell]) -> String {
        let on_path: BTreeSet<Cell> = path.iter().copied().collect();
        let mut out = String::new();
        for y in (0..=self.size).rev() {
            for x in 0..=self.size {
                let cell = (x, y);
                out.push(if self.removed.contains(&cell) {
                    '#'
                } else if on_path.contains(&cell) {
                    '*'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}

impl SearchProblem for GridWorld {
    type Node = Cell;
    type Cost = u32;
    type Error = Infallible;
    type Cursor = IterCursor<std::vec::IntoIter<(Cell, u32)>>;

    fn neighbors(&self, cell: &Cell) -> Result<Self::Cursor, Infallible> {
        Ok(IterCursor::new(self.weighted_neighbors(*cell).into_iter()))
    }

    fn is_goal(&self, cell: &Cell) -> Result<bool, Infallible> {
        Ok(*cell == self.goal)
    }

    fn combine(&self, cost: &u32, weight: &u32) -> Result<u32, Infallible> {
        Ok(cost + weight)
    }
}

impl WorldV1 for GridWorld {
    fn world_id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> Cell {
        (0, 0)
    }

    fn initial_cost(&self) -> u32 {
        self.estimate((0, 0))
    }
}
