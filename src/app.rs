use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Fullscreen, Window, WindowId};

use crate::config::Config;
use crate::display::DisplayDriver;
use crate::gpu::GpuDriver;
use crate::simulation::{Grid, Session, SimulationState, TickOutcome};
use crate::timer::FrameTimer;

/// Application state: the run loop's explicit context
pub struct App {
    config: Config,
    session: Session,
    timer: FrameTimer,
    driver: Option<GpuDriver>,
    title: String,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (cols, rows) = config.grid_dimensions();
        log::info!(
            "Grid size: {}x{} ({}px cells, live probability {})",
            cols,
            rows,
            config.scale,
            config.live_probability
        );
        let grid = Grid::create(cols, rows, config.live_probability);
        let session = Session::new(grid, config.scale);
        let timer = FrameTimer::new(config.tick_interval, Instant::now());

        Self {
            config,
            session,
            timer,
            driver: None,
            title: String::new(),
            error: None,
        }
    }

    /// The fatal error that stopped the event loop, if any
    pub fn into_result(self) -> anyhow::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };

        match self.session.tick(driver) {
            Ok(TickOutcome::Continue) => self.update_title(),
            Ok(TickOutcome::Quit) => {
                log::info!("Exiting...");
                event_loop.exit();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn update_title(&mut self) {
        let title = match self.session.state() {
            SimulationState::Setup => {
                "Game of Life - Setup (click cells, Enter to start)".to_string()
            }
            SimulationState::Running => {
                format!("Game of Life - Generation {}", self.session.generation())
            }
        };

        if title != self.title {
            if let Some(driver) = &self.driver {
                driver.window().set_title(&title);
            }
            self.title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.driver.is_some() {
            return;
        }

        log::info!("Initializing Game of Life...");

        let mut window_attrs = Window::default_attributes()
            .with_title("Game of Life - Initializing...")
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ))
            .with_resizable(false);
        if self.config.fullscreen {
            window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, anyhow::anyhow!("create window: {}", e)),
        };

        let cell_count = self.session.grid().cols() * self.session.grid().rows();
        match GpuDriver::new(window, cell_count) {
            Ok(driver) => self.driver = Some(driver),
            Err(e) => return self.fail(event_loop, e),
        }

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Left click: Toggle cell (setup only)");
        log::info!("  Enter: Start simulation");
        log::info!("  Escape: Quit");

        // First frame right away instead of waiting a full interval
        self.tick(event_loop);
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.timer.next_deadline()));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };

        match event {
            WindowEvent::Resized(new_size) => {
                log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                driver.resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                driver.render_grid(self.session.grid(), self.session.scale());
                if let Err(e) = driver.present() {
                    self.fail(event_loop, e);
                }
            }
            other => driver.handle_window_event(&other),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.timer.advance(Instant::now()) {
            self.tick(event_loop);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.timer.next_deadline()));
    }
}
