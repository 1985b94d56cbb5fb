use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::bail;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::display::{DisplayDriver, InputEvent, Key};
use crate::gpu::buffers::{CellBuffers, CellInstance};
use crate::gpu::context::GpuContext;
use crate::gpu::render::{build_instances, Palette, RenderPipeline};
use crate::simulation::Grid;

/// Display driver backed by a winit window and wgpu.
///
/// Window events are translated and queued as they arrive; the session
/// drains the queue once per tick.
pub struct GpuDriver {
    window: Arc<Window>,
    gpu: GpuContext,
    buffers: CellBuffers,
    pipeline: RenderPipeline,
    palette: Palette,
    events: VecDeque<InputEvent>,
    cursor: Option<PhysicalPosition<f64>>,
    instances: Vec<CellInstance>,
}

impl GpuDriver {
    /// Set up the GPU for `window`, sized for `cell_count` cells
    pub fn new(window: Arc<Window>, cell_count: usize) -> anyhow::Result<Self> {
        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let buffers = CellBuffers::new(&gpu.device, cell_count);
        buffers.update_view(&gpu.queue, gpu.viewport());

        log::info!("Creating render pipeline...");
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let palette = Palette::for_format(gpu.format());

        Ok(Self {
            window,
            gpu,
            buffers,
            pipeline,
            palette,
            events: VecDeque::new(),
            cursor: None,
            instances: Vec::with_capacity(cell_count),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        self.buffers.update_view(&self.gpu.queue, self.gpu.viewport());
    }

    /// Translate a window event and queue it for the next tick
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.events.push_back(InputEvent::Quit),
            WindowEvent::CursorMoved { position, .. } => self.cursor = Some(*position),
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(position) = self.cursor {
                    self.events.push_back(pointer_event(position));
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    self.events
                        .push_back(InputEvent::KeyDown(translate_key(event.physical_key)));
                }
            }
            _ => {}
        }
    }
}

impl DisplayDriver for GpuDriver {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    fn render_grid(&mut self, grid: &Grid, scale: u32) {
        build_instances(grid, scale, &self.palette, &mut self.instances);
        self.buffers
            .upload(&self.gpu.device, &self.gpu.queue, &self.instances);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => bail!("GPU out of memory"),
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return Ok(());
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = self
            .pipeline
            .create_bind_group(&self.gpu.device, &self.buffers.view_buffer);
        self.pipeline.draw(
            &mut encoder,
            &view,
            &bind_group,
            &self.buffers,
            self.palette.background,
        );

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
        Ok(())
    }
}

/// Pointer press at a cursor position, floored to whole pixels
fn pointer_event(position: PhysicalPosition<f64>) -> InputEvent {
    InputEvent::PointerDown {
        x: position.x.floor() as i32,
        y: position.y.floor() as i32,
    }
}

fn translate_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => Key::Enter,
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_floors() {
        assert_eq!(
            pointer_event(PhysicalPosition::new(45.9, 25.1)),
            InputEvent::PointerDown { x: 45, y: 25 }
        );
        assert_eq!(
            pointer_event(PhysicalPosition::new(-0.5, 3.0)),
            InputEvent::PointerDown { x: -1, y: 3 }
        );
    }

    #[test]
    fn test_translate_key() {
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::Enter)), Key::Enter);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(translate_key(PhysicalKey::Code(KeyCode::Space)), Key::Other);
    }
}
