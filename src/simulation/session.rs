use crate::display::{DisplayDriver, InputEvent, Key};
use crate::simulation::grid::Grid;
use crate::simulation::rules;

/// Phase of the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    /// User edits the grid, nothing evolves
    Setup,
    /// One generation per tick, edits ignored
    Running,
}

/// What an input event asks the session to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Start,
    Toggle { x: usize, y: usize },
}

/// Result of a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// The grid and the state machine that decides what happens to it each tick
pub struct Session {
    grid: Grid,
    state: SimulationState,
    scale: u32,
    generation: u64,
}

impl Session {
    /// Start a session in `Setup` with the given grid and cell scale (pixels per cell)
    pub fn new(grid: Grid, scale: u32) -> Self {
        assert!(scale > 0, "cell scale must be positive");
        Self {
            grid,
            state: SimulationState::Setup,
            scale,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Generations computed since the simulation started
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run one tick: drain input, step if running, render and present.
    ///
    /// A quit command ends the tick before anything is stepped or drawn.
    pub fn tick<D: DisplayDriver>(&mut self, driver: &mut D) -> anyhow::Result<TickOutcome> {
        // Stepping starts on the tick after the start command
        let stepping = self.state == SimulationState::Running;

        for event in driver.poll_events() {
            if let Some(command) = self.command_for(event) {
                if self.apply(command) == TickOutcome::Quit {
                    return Ok(TickOutcome::Quit);
                }
            }
        }

        if stepping {
            self.grid = rules::step(&self.grid);
            self.generation += 1;
            log::trace!(
                "Generation {}: {} live cells",
                self.generation,
                self.grid.population()
            );
        }

        driver.render_grid(&self.grid, self.scale);
        driver.present()?;
        Ok(TickOutcome::Continue)
    }

    /// Translate an input event into a command, if it means anything
    pub fn command_for(&self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => Some(Command::Quit),
            InputEvent::KeyDown(Key::Enter) => Some(Command::Start),
            InputEvent::KeyDown(Key::Other) => None,
            InputEvent::PointerDown { x, y } => {
                pointer_to_cell(x, y, self.scale, &self.grid)
                    .map(|(x, y)| Command::Toggle { x, y })
            }
        }
    }

    fn apply(&mut self, command: Command) -> TickOutcome {
        match (self.state, command) {
            (_, Command::Quit) => {
                log::info!("Quit requested after {} generations", self.generation);
                return TickOutcome::Quit;
            }
            (SimulationState::Setup, Command::Toggle { x, y }) => {
                self.grid.toggle(x, y);
                log::debug!("Toggled ({}, {}) to {:?}", x, y, self.grid.get(x, y));
            }
            (SimulationState::Setup, Command::Start) => {
                self.state = SimulationState::Running;
                log::info!(
                    "Simulation started with {} live cells",
                    self.grid.population()
                );
            }
            (SimulationState::Running, Command::Toggle { .. } | Command::Start) => {}
        }
        TickOutcome::Continue
    }
}

/// Map a pointer position in pixels to the cell under it.
///
/// Returns `None` for positions left of or above the grid, or beyond its
/// last row or column.
pub fn pointer_to_cell(x: i32, y: i32, scale: u32, grid: &Grid) -> Option<(usize, usize)> {
    if x < 0 || y < 0 {
        return None;
    }
    let cell_x = x as usize / scale as usize;
    let cell_y = y as usize / scale as usize;
    grid.contains(cell_x, cell_y).then_some((cell_x, cell_y))
}
