//! Conway's Game of Life on a torus.
//!
//! Click cells to seed the board, press Enter to start, Escape to quit.

mod app;
mod config;
mod display;
mod gpu;
mod simulation;
mod timer;

use winit::event_loop::EventLoop;

use crate::app::App;
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    config.validate()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    app.into_result()
}
