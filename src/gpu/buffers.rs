use wgpu::util::DeviceExt;
use wgpu::{Buffer, BufferUsages, Device, Queue};

/// Two triangles covering the unit square, scaled per instance
const UNIT_QUAD: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [0.0, 1.0],
    [1.0, 0.0],
    [1.0, 1.0],
];

pub const QUAD_VERTEX_COUNT: u32 = UNIT_QUAD.len() as u32;

/// One square on screen (32 bytes).
///
/// - origin: top-left corner in window pixels
/// - size: edge length in pixels
/// - outline: 0 = filled, 1 = 1px border only
/// - color: linear RGBA
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CellInstance {
    pub origin: [f32; 2],
    pub size: f32,
    pub outline: u32,
    pub color: [f32; 4],
}

impl CellInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32, 3 => Uint32, 4 => Float32x4];
}

/// Uniform with the surface size, for pixel -> clip space conversion (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewParams {
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

/// Vertex, instance and uniform buffers for drawing the grid
pub struct CellBuffers {
    pub quad_buffer: Buffer,
    pub instance_buffer: Buffer,
    pub view_buffer: Buffer,
    /// Instances the current instance buffer can hold
    capacity: usize,
    /// Instances written by the last upload
    len: usize,
}

impl CellBuffers {
    pub fn new(device: &Device, capacity: usize) -> Self {
        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("unit-quad-buffer"),
            contents: bytemuck::cast_slice(&UNIT_QUAD),
            usage: BufferUsages::VERTEX,
        });

        let capacity = capacity.max(1);
        let instance_buffer = create_instance_buffer(device, capacity);

        let view_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("view-params-buffer"),
            size: std::mem::size_of::<ViewParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            quad_buffer,
            instance_buffer,
            view_buffer,
            capacity,
            len: 0,
        }
    }

    /// Replace the instance data, growing the buffer if needed
    pub fn upload(&mut self, device: &Device, queue: &Queue, instances: &[CellInstance]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.capacity);
            log::debug!("Grew instance buffer to {} cells", self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
        self.len = instances.len();
    }

    /// Number of instances from the last upload
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn update_view(&self, queue: &Queue, viewport: [f32; 2]) {
        let params = ViewParams {
            viewport,
            _padding: [0.0, 0.0],
        };
        queue.write_buffer(&self.view_buffer, 0, bytemuck::bytes_of(&params));
    }
}

fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("cell-instance-buffer"),
        size: (capacity * std::mem::size_of::<CellInstance>()) as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
