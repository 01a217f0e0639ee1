//! CPU-side resources: source pixel buffers and tile-mesh generation.

pub mod image;
pub mod mesh;

pub use image::ImageData;
pub use mesh::{TileDescriptor, TileMesh, TileRect, tile_grid};
