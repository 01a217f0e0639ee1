//! Tile-mesh generation.
//!
//! [`tile_grid`] decomposes an image into a deterministic grid of
//! rectangular tiles sized by a divisor, so that a single large texture can
//! be drawn as many quads that each respect hardware texture limits.
//! [`TileMesh`] flattens a grid into the triangle-list vertex data a node
//! uploads once at initialization.

use crate::errors::{Result, ViewerError};

/// Vertices emitted per tile: two triangles, no shared-vertex indexing.
pub const VERTICES_PER_TILE: u32 = 6;

/// An axis-aligned rectangle in normalized [0,1] space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// One rectangular subdivision of a source image.
///
/// The texture rectangle is the tile's pixel extent normalized by the image
/// dimensions. The vertex rectangle is the same extent on a unit mesh
/// spanning [0,1]; the node's model transform places it in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDescriptor {
    pub tex_rect: TileRect,
    pub vertex_rect: TileRect,
}

/// Decomposes a `width` × `height` image into a grid of tiles.
///
/// The tile span is `ceil(width / divisor)` × `ceil(height / divisor)`;
/// the final row/column may be a partial tile, whose far edge clamps to
/// exactly 1.0. The returned tiles partition the image exactly once, in
/// column-major origin order.
pub fn tile_grid(width: u32, height: u32, divisor: u32) -> Result<Vec<TileDescriptor>> {
    if width == 0 || height == 0 || divisor == 0 {
        return Err(ViewerError::InvalidGeometry(format!(
            "tile grid needs positive dimensions and a divisor of at least 1, \
             got {width}x{height} with divisor {divisor}"
        )));
    }

    let tile_w = width.div_ceil(divisor);
    let tile_h = height.div_ceil(divisor);

    let tile_count = width.div_ceil(tile_w) as usize * height.div_ceil(tile_h) as usize;
    let mut tiles = Vec::with_capacity(tile_count);

    let mut x = 0;
    while x < width {
        let mut y = 0;
        while y < height {
            let rect = TileRect {
                left: x as f32 / width as f32,
                top: y as f32 / height as f32,
                right: (x + tile_w).min(width) as f32 / width as f32,
                bottom: (y + tile_h).min(height) as f32 / height as f32,
            };
            tiles.push(TileDescriptor {
                tex_rect: rect,
                vertex_rect: rect,
            });
            y += tile_h;
        }
        x += tile_w;
    }

    Ok(tiles)
}

/// Flattened triangle-list geometry for a tile grid.
///
/// Positions are `x, y, z` triples (z = 0) and texture coordinates `u, v`
/// pairs, six vertices per tile, in the same tile order as the input so
/// positions and coordinates stay aligned.
#[derive(Debug, Clone)]
pub struct TileMesh {
    pub positions: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub vertex_count: u32,
}

impl TileMesh {
    #[must_use]
    pub fn build(tiles: &[TileDescriptor]) -> Self {
        let mut positions = Vec::with_capacity(tiles.len() * VERTICES_PER_TILE as usize * 3);
        let mut tex_coords = Vec::with_capacity(tiles.len() * VERTICES_PER_TILE as usize * 2);

        for tile in tiles {
            for (x, y) in quad_corners(tile.vertex_rect) {
                positions.extend_from_slice(&[x, y, 0.0]);
            }
            for (u, v) in quad_corners(tile.tex_rect) {
                tex_coords.extend_from_slice(&[u, v]);
            }
        }

        Self {
            positions,
            tex_coords,
            vertex_count: tiles.len() as u32 * VERTICES_PER_TILE,
        }
    }
}

/// Corner sequence for one quad as two counter-clockwise triangles.
fn quad_corners(rect: TileRect) -> [(f32, f32); VERTICES_PER_TILE as usize] {
    let TileRect {
        left,
        top,
        right,
        bottom,
    } = rect;
    [
        (left, top),
        (right, top),
        (left, bottom),
        (right, top),
        (right, bottom),
        (left, bottom),
    ]
}
