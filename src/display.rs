use crate::simulation::Grid;

/// Keys the simulation distinguishes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

/// Input reported by a display driver, in window pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    PointerDown { x: i32, y: i32 },
}

/// Surface that shows the grid and reports user input.
///
/// The session calls `poll_events` once per tick, then `render_grid` and
/// `present` when the tick does not quit.
pub trait DisplayDriver {
    /// Drain every input event received since the previous call
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Draw one `scale`-pixel square per cell at `(x * scale, y * scale)`,
    /// filled when alive and outlined when dead
    fn render_grid(&mut self, grid: &Grid, scale: u32);

    /// Commit the rendered frame to the visible surface
    fn present(&mut self) -> anyhow::Result<()>;
}
