//! Graphics-context boundary.
//!
//! The core never talks to a concrete GPU API. Everything a node needs,
//! texture creation and upload, vertex/index buffer creation, frame clear
//! and draw submission, goes through the [`GraphicsContext`] capability
//! trait, passed explicitly into `init`/`render`. This keeps the scene
//! module free of ambient state: multiple independent registries (and
//! tests) can run against their own contexts.
//!
//! [`render::WgpuContext`](crate::render::WgpuContext) is the shipped
//! implementation; tests substitute a recording double.

use glam::Mat4;

use crate::errors::Result;

/// Opaque handle to a texture owned by a [`GraphicsContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Opaque handle to a vertex or index buffer owned by a [`GraphicsContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Allocation descriptor for a 2D RGBA8 texture.
#[derive(Debug, Clone, Copy)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub label: &'static str,
}

/// A single textured draw submitted by a node.
///
/// `element_count` is the number of vertices for a non-indexed draw, or the
/// number of indices when `indices` is set. The model matrix is composed
/// with the frame's view-projection by the context.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    /// Vertex positions, tightly packed `float32x3`.
    pub positions: BufferHandle,
    /// Texture coordinates, tightly packed `float32x2`.
    pub tex_coords: BufferHandle,
    /// Optional `u16` index buffer.
    pub indices: Option<BufferHandle>,
    pub texture: TextureHandle,
    pub element_count: u32,
    pub model: Mat4,
}

/// Capability object the scene renders through.
///
/// Creation and upload operations return `Result`; a failure during node
/// initialization makes the registry discard that node. Frame operations
/// (`begin_frame`, `clear`, `draw`, `end_frame`) are infallible recording
/// calls; a backend that loses its surface skips presentation rather than
/// surfacing an error into the frame loop.
pub trait GraphicsContext {
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle>;

    /// Uploads a full RGBA8 image into an existing texture. The pixel slice
    /// must match the texture's dimensions.
    fn write_texture(&mut self, texture: TextureHandle, pixels: &[u8]) -> Result<()>;

    fn create_vertex_buffer(&mut self, label: &'static str, data: &[u8]) -> Result<BufferHandle>;

    fn create_index_buffer(&mut self, label: &'static str, data: &[u8]) -> Result<BufferHandle>;

    /// Starts a frame with the view-projection transform used for every
    /// draw until `end_frame`.
    fn begin_frame(&mut self, view_proj: Mat4);

    /// Sets the clear color applied before this frame's draws.
    fn clear(&mut self, color: [f64; 4]);

    fn draw(&mut self, call: &DrawCall);

    /// Submits and presents the frame.
    fn end_frame(&mut self);
}

/// A live video source consumed by a video-surface node.
///
/// The node shares the source (it does not own it exclusively) and queries
/// a fresh frame every render. Implementations hand out RGBA8 pixels at a
/// fixed resolution.
pub trait VideoSource {
    /// Pixel dimensions of every frame this source produces.
    fn dimensions(&self) -> (u32, u32);

    /// Copies the most recent frame into `dst`, replacing its contents.
    /// The result is exactly `width * height * 4` bytes.
    fn copy_frame_into(&self, dst: &mut Vec<u8>);
}
