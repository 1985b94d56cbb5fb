use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, RenderPipeline as WgpuRenderPipeline,
    TextureFormat, TextureView,
};

use crate::config::{ALIVE_COLOR, BACKGROUND_COLOR, DEAD_OUTLINE_COLOR};
use crate::gpu::buffers::{CellBuffers, CellInstance, QUAD_VERTEX_COUNT};
use crate::simulation::{CellState, Grid};

/// Colors used to draw the grid, already in the surface's color space
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub background: wgpu::Color,
    pub alive: [f32; 4],
    pub dead: [f32; 4],
}

impl Palette {
    /// Palette for a surface format; sRGB surfaces expect linear values
    pub fn for_format(format: TextureFormat) -> Self {
        let convert = |rgb: [u8; 3]| -> [f32; 4] {
            let channel = |c: u8| {
                let c = c as f32 / 255.0;
                if format.is_srgb() {
                    srgb_to_linear(c)
                } else {
                    c
                }
            };
            [channel(rgb[0]), channel(rgb[1]), channel(rgb[2]), 1.0]
        };

        let background = convert(BACKGROUND_COLOR);
        Self {
            background: wgpu::Color {
                r: background[0] as f64,
                g: background[1] as f64,
                b: background[2] as f64,
                a: 1.0,
            },
            alive: convert(ALIVE_COLOR),
            dead: convert(DEAD_OUTLINE_COLOR),
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Fill `out` with one instance per cell: solid squares for live cells,
/// outlines for dead ones
pub fn build_instances(grid: &Grid, scale: u32, palette: &Palette, out: &mut Vec<CellInstance>) {
    out.clear();
    let size = scale as f32;

    for (x, y, state) in grid.cells() {
        let (outline, color) = match state {
            CellState::Alive => (0, palette.alive),
            CellState::Dead => (1, palette.dead),
        };
        out.push(CellInstance {
            origin: [x as f32 * size, y as f32 * size],
            size,
            outline,
            color,
        });
    }
}

/// Instanced quad pipeline that draws grid cells
pub struct RenderPipeline {
    pipeline: WgpuRenderPipeline,
    bind_group_layout: BindGroupLayout,
}

impl RenderPipeline {
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cells-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/cells.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cells-bind-group-layout"),
            entries: &[
                // View parameters (uniform)
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cells-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cells-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    // Unit quad corners
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        }],
                    },
                    // One instance per cell
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<CellInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &CellInstance::ATTRIBUTES,
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
        }
    }

    pub fn create_bind_group(&self, device: &Device, view_buffer: &Buffer) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cells-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
        })
    }

    /// Clear to the background color and draw every uploaded cell
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &TextureView,
        bind_group: &BindGroup,
        buffers: &CellBuffers,
        background: wgpu::Color,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cells-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(background),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let count = buffers.len() as u32;
        if count == 0 {
            return;
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.set_vertex_buffer(0, buffers.quad_buffer.slice(..));
        let instance_bytes = (buffers.len() * std::mem::size_of::<CellInstance>()) as u64;
        pass.set_vertex_buffer(1, buffers.instance_buffer.slice(0..instance_bytes));
        pass.draw(0..QUAD_VERTEX_COUNT, 0..count);
    }
}
