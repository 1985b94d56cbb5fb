use rand::Rng;

use crate::simulation::cell::CellState;

/// Offsets of the eight cells surrounding a cell
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Toroidal grid of cells, addressed as `(x, y)`.
///
/// Storage is column-major: `cells[x][y]`. Every column has exactly `rows`
/// entries and there are exactly `cols` columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<CellState>>,
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(cols: usize, rows: usize) -> Self {
        assert!(cols > 0 && rows > 0, "grid must be at least 1x1, got {}x{}", cols, rows);
        Self {
            cells: vec![vec![CellState::Dead; rows]; cols],
            cols,
            rows,
        }
    }

    /// Create a grid where each cell is alive with probability `p`.
    ///
    /// `p == 0.0` gives an all-dead grid. Panics if `p` is outside `[0, 1)`.
    pub fn create(cols: usize, rows: usize, p: f64) -> Self {
        Self::random_with(cols, rows, p, &mut rand::thread_rng())
    }

    /// Same as [`Grid::create`] with a caller-supplied random source
    pub fn random_with<R: Rng + ?Sized>(cols: usize, rows: usize, p: f64, rng: &mut R) -> Self {
        assert!(
            (0.0..1.0).contains(&p),
            "live probability must be in [0, 1), got {}",
            p
        );

        let mut grid = Self::new(cols, rows);
        if p == 0.0 {
            return grid;
        }

        for column in &mut grid.cells {
            for cell in column.iter_mut() {
                if rng.gen::<f64>() < p {
                    *cell = CellState::Alive;
                }
            }
        }
        grid
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether `(x, y)` addresses a cell of this grid
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    /// State at `(x, y)`. Panics when out of range.
    pub fn get(&self, x: usize, y: usize) -> CellState {
        self.cells[x][y]
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        self.cells[x][y] = state;
    }

    /// Flip the cell at `(x, y)` between alive and dead
    pub fn toggle(&mut self, x: usize, y: usize) {
        let cell = &mut self.cells[x][y];
        *cell = cell.toggled();
    }

    /// Count live cells among the 8 toroidally adjacent neighbors.
    ///
    /// On grids narrower than 3 cells the same neighbor can be reached
    /// through more than one offset; each visit is counted.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|(dx, dy)| {
                let nx = wrap(x as isize + dx, self.cols);
                let ny = wrap(y as isize + dy, self.rows);
                self.cells[nx][ny].is_alive()
            })
            .count()
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_alive())
            .count()
    }

    /// Iterate over `(x, y, state)` in column-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(y, &state)| (x, y, state))
        })
    }
}

/// Wrap `i` into `[0, n)`, mapping -1 to n - 1
pub fn wrap(i: isize, n: usize) -> usize {
    i.rem_euclid(n as isize) as usize
}

#[cfg(test)]
impl Grid {
    /// Build a grid with the listed cells alive
    pub fn with_live_cells(cols: usize, rows: usize, live: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(cols, rows);
        for &(x, y) in live {
            grid.set(x, y, CellState::Alive);
        }
        grid
    }

    /// Coordinates of all live cells, sorted
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|(_, _, state)| state.is_alive())
            .map(|(x, y, _)| (x, y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(25, 10);
        assert_eq!(grid.cols(), 25);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cells().count(), 250);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_grid_is_never_jagged() {
        let grid = Grid::create(7, 4, 0.5);
        assert_eq!(grid.cells.len(), 7);
        for column in &grid.cells {
            assert_eq!(column.len(), 4);
        }
    }

    #[test]
    fn test_zero_probability_is_all_dead() {
        let grid = Grid::create(30, 20, 0.0);
        assert!(grid.cells().all(|(_, _, state)| state == CellState::Dead));
    }

    #[test]
    fn test_random_population_tracks_probability() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random_with(100, 100, 0.3, &mut rng);
        let population = grid.population();
        assert!(
            (2000..4000).contains(&population),
            "expected roughly 3000 live cells, got {}",
            population
        );
    }

    #[test]
    fn test_seeded_grids_are_reproducible() {
        let a = Grid::random_with(16, 16, 0.5, &mut StdRng::seed_from_u64(42));
        let b = Grid::random_with(16, 16, 0.5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "live probability")]
    fn test_probability_of_one_panics() {
        Grid::create(5, 5, 1.0);
    }

    #[test]
    #[should_panic(expected = "live probability")]
    fn test_negative_probability_panics() {
        Grid::create(5, 5, -0.1);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_get_panics() {
        let grid = Grid::new(3, 3);
        grid.get(3, 0);
    }

    #[test]
    fn test_toggle_twice_restores_cell() {
        let mut grid = Grid::with_live_cells(4, 4, &[(1, 2)]);
        let before = grid.clone();

        grid.toggle(1, 2);
        assert_eq!(grid.get(1, 2), CellState::Dead);
        grid.toggle(1, 2);
        assert_eq!(grid, before);

        grid.toggle(3, 3);
        grid.toggle(3, 3);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_contains() {
        let grid = Grid::new(5, 3);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(4, 2));
        assert!(!grid.contains(5, 2));
        assert!(!grid.contains(4, 3));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(-1, 10), 9);
        assert_eq!(wrap(0, 10), 0);
        assert_eq!(wrap(10, 10), 0);
        assert_eq!(wrap(11, 10), 1);
        assert_eq!(wrap(-1, 1), 0);
    }

    #[test]
    fn test_neighbors_wrap_across_corner() {
        let grid = Grid::with_live_cells(3, 3, &[(0, 0)]);
        assert_eq!(grid.count_live_neighbors(2, 2), 1);
        assert_eq!(grid.count_live_neighbors(0, 0), 0);
    }

    #[test]
    fn test_neighbors_wrap_across_edges() {
        let grid = Grid::with_live_cells(10, 10, &[(0, 5)]);
        assert_eq!(grid.count_live_neighbors(9, 4), 1);
        assert_eq!(grid.count_live_neighbors(9, 5), 1);
        assert_eq!(grid.count_live_neighbors(9, 6), 1);
        assert_eq!(grid.count_live_neighbors(8, 5), 0);

        let grid = Grid::with_live_cells(10, 10, &[(4, 9)]);
        assert_eq!(grid.count_live_neighbors(4, 0), 1);
        assert_eq!(grid.count_live_neighbors(5, 0), 1);
        assert_eq!(grid.count_live_neighbors(4, 1), 0);
    }

    #[test]
    fn test_full_grid_has_eight_neighbors_everywhere() {
        let mut grid = Grid::new(6, 5);
        for x in 0..6 {
            for y in 0..5 {
                grid.set(x, y, CellState::Alive);
            }
        }
        for (x, y, _) in grid.cells() {
            assert_eq!(grid.count_live_neighbors(x, y), 8);
        }
    }

    #[test]
    fn test_neighbor_count_excludes_self() {
        let grid = Grid::with_live_cells(5, 5, &[(2, 2)]);
        assert_eq!(grid.count_live_neighbors(2, 2), 0);
        assert_eq!(grid.count_live_neighbors(1, 1), 1);
    }

    #[test]
    fn test_single_cell_grid_sees_itself() {
        let grid = Grid::with_live_cells(1, 1, &[(0, 0)]);
        assert_eq!(grid.count_live_neighbors(0, 0), 8);
    }

    #[test]
    fn test_cells_iterates_column_major() {
        let grid = Grid::new(2, 2);
        let coords: Vec<_> = grid.cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
