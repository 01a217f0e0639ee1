//! Tiled-image node.

use crate::errors::{Result, ViewerError};
use crate::gfx::{BufferHandle, DrawCall, GraphicsContext, TextureDesc, TextureHandle};
use crate::resources::image::ImageData;
use crate::resources::mesh::{TileMesh, tile_grid};
use crate::scene::transform::Transform;

/// GPU-side state allocated by [`TiledImageNode::init`].
struct ImageResources {
    texture: TextureHandle,
    positions: BufferHandle,
    tex_coords: BufferHandle,
    vertex_count: u32,
}

/// A node that draws a source image as a grid of texture-mapped quads.
///
/// The divisor bounds the span of each tile so a single large image stays
/// within hardware texture limits per quad. The texture and both vertex
/// buffers are created once at initialization; rendering only replays the
/// already-uploaded mesh.
pub struct TiledImageNode {
    /// Local transform, mutable at any point in the lifecycle.
    pub transform: Transform,
    image: ImageData,
    divisor: u32,
    resources: Option<ImageResources>,
}

impl TiledImageNode {
    /// Creates a node over `image`, subdivided by `divisor`.
    ///
    /// The grid parameters are validated here so a bad divisor fails at the
    /// call site instead of during the promotion drain.
    pub fn new(image: ImageData, divisor: u32) -> Result<Self> {
        tile_grid(image.width(), image.height(), divisor)?;
        Ok(Self {
            transform: Transform::new(),
            image,
            divisor,
            resources: None,
        })
    }

    #[inline]
    #[must_use]
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    #[inline]
    #[must_use]
    pub fn divisor(&self) -> u32 {
        self.divisor
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

        let texture = ctx.create_texture(&TextureDesc {
            width: self.image.width(),
            height: self.image.height(),
            label: "tiled image texture",
        })?;
        ctx.write_texture(texture, self.image.pixels())?;

        let tiles = tile_grid(self.image.width(), self.image.height(), self.divisor)?;
        let mesh = TileMesh::build(&tiles);

        let positions =
            ctx.create_vertex_buffer("tiled image positions", bytemuck::cast_slice(&mesh.positions))?;
        let tex_coords = ctx.create_vertex_buffer(
            "tiled image tex coords",
            bytemuck::cast_slice(&mesh.tex_coords),
        )?;

        self.resources = Some(ImageResources {
            texture,
            positions,
            tex_coords,
            vertex_count: mesh.vertex_count,
        });
        Ok(())
    }

    pub(crate) fn render(&self, ctx: &mut dyn GraphicsContext) {
        // The registry only renders promoted nodes; an uninitialized node
        // here is a no-op rather than a panic.
        let Some(res) = &self.resources else { return };

        ctx.draw(&DrawCall {
            positions: res.positions,
            tex_coords: res.tex_coords,
            indices: None,
            texture: res.texture,
            element_count: res.vertex_count,
            model: self.transform.matrix(),
        });
    }
}
