//! Conway's Game of Life transition (B3/S23):
//! - A live cell with fewer than two live neighbors dies.
//! - A live cell with two or three live neighbors lives on.
//! - A live cell with more than three live neighbors dies.
//! - A dead cell with exactly three live neighbors becomes alive.

use crate::simulation::cell::CellState;
use crate::simulation::grid::Grid;

/// Next state of one cell given its live neighbor count
pub fn next_state(current: CellState, live_neighbors: usize) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2..=3) => CellState::Alive, // Survives
        (CellState::Dead, 3) => CellState::Alive,      // Birth
        _ => CellState::Dead,
    }
}

/// Compute the next generation.
///
/// Every neighbor count is taken from `grid`, never from the grid being
/// built, so the whole generation advances from one snapshot.
pub fn step(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.cols(), grid.rows());

    for (x, y, state) in grid.cells() {
        let live_neighbors = grid.count_live_neighbors(x, y);
        next.set(x, y, next_state(state, live_neighbors));
    }

    next
}
