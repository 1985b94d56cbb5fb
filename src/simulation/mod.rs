mod cell;
mod grid;
mod rules;
mod session;

pub use cell::CellState;
pub use grid::Grid;
pub use session::{Session, SimulationState, TickOutcome};
