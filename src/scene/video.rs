//! Video-surface node.

use std::sync::Arc;

use log::error;

use crate::errors::{Result, ViewerError};
use crate::gfx::{BufferHandle, DrawCall, GraphicsContext, TextureDesc, TextureHandle, VideoSource};
use crate::scene::transform::Transform;

/// Clip-space quad spanning the full surface, drawn with [`QUAD_INDICES`].
const QUAD_POSITIONS: [f32; 12] = [
    -1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0, //
    1.0, 1.0, 0.0, //
    -1.0, 1.0, 0.0,
];

const QUAD_TEX_COORDS: [f32; 8] = [
    0.0, 0.0, //
    1.0, 0.0, //
    1.0, 1.0, //
    0.0, 1.0,
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// GPU-side state allocated by [`VideoSurfaceNode::init`].
struct VideoResources {
    texture: TextureHandle,
    positions: BufferHandle,
    tex_coords: BufferHandle,
    indices: BufferHandle,
}

/// A node that presents a live video source on a single full-surface quad.
///
/// The texture object is created once at initialization and refreshed from
/// the source before every draw, never recreated. The source itself is
/// shared; the node only reads frames from it.
pub struct VideoSurfaceNode {
    /// Local transform, mutable at any point in the lifecycle.
    pub transform: Transform,
    source: Arc<dyn VideoSource>,
    frame_scratch: Vec<u8>,
    resources: Option<VideoResources>,
}

impl VideoSurfaceNode {
    #[must_use]
    pub fn new(source: Arc<dyn VideoSource>) -> Self {
        Self {
            transform: Transform::new(),
            source,
            frame_scratch: Vec::new(),
            resources: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> &Arc<dyn VideoSource> {
        &self.source
    }

    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    pub(crate) fn init(&mut self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        if self.resources.is_some() {
            return Err(ViewerError::AlreadyInitialized);
        }

        let (width, height) = self.source.dimensions();
        let texture = ctx.create_texture(&TextureDesc {
            width,
            height,
            label: "video surface texture",
        })?;
        self.source.copy_frame_into(&mut self.frame_scratch);
        ctx.write_texture(texture, &self.frame_scratch)?;

        let positions =
            ctx.create_vertex_buffer("video surface positions", bytemuck::cast_slice(&QUAD_POSITIONS))?;
        let tex_coords = ctx.create_vertex_buffer(
            "video surface tex coords",
            bytemuck::cast_slice(&QUAD_TEX_COORDS),
        )?;
        let indices =
            ctx.create_index_buffer("video surface indices", bytemuck::cast_slice(&QUAD_INDICES))?;

        self.resources = Some(VideoResources {
            texture,
            positions,
            tex_coords,
            indices,
        });
        Ok(())
    }

    pub(crate) fn render(&mut self, ctx: &mut dyn GraphicsContext) {
        let Some(res) = &self.resources else { return };

        // Refresh the bound texture from the live source, reusing the
        // texture object. A failed refresh skips this node's draw for the
        // frame; it never aborts the frame loop.
        self.source.copy_frame_into(&mut self.frame_scratch);
        if let Err(err) = ctx.write_texture(res.texture, &self.frame_scratch) {
            error!("Failed to refresh video surface texture: {err}");
            return;
        }

        ctx.draw(&DrawCall {
            positions: res.positions,
            tex_coords: res.tex_coords,
            indices: Some(res.indices),
            texture: res.texture,
            element_count: QUAD_INDICES.len() as u32,
            model: self.transform.matrix(),
        });
    }
}
