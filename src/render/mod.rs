//! wgpu binding of the graphics-context boundary.

pub mod context;

pub use context::WgpuContext;
