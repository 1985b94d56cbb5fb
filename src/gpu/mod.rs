mod buffers;
mod context;
mod driver;
mod render;

pub use driver::GpuDriver;
