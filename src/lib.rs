//! Tessera, a minimal real-time tiled-scene viewer.
//!
//! A host surface hosts a collection of drawable nodes (tiled images and
//! live video surfaces). Nodes are queued onto a [`Viewer`], initialized
//! against a graphics context on the next frame, and redrawn every frame
//! after that.
//!
//! The core of the crate is the scene module: the node lifecycle
//! (queued → initialized → rendered), the double-buffered node registry
//! that lets nodes be added safely while a frame is in flight, and the
//! tile-mesh generator that decomposes an arbitrarily large image into a
//! grid of texture-mapped quads without re-uploading texture data per
//! frame.
//!
//! The GPU is reached exclusively through the [`gfx::GraphicsContext`]
//! boundary; [`render::WgpuContext`] is the shipped wgpu binding and
//! [`app::App`] the winit shell that drives the frame clock.

pub mod app;
pub mod errors;
pub mod gfx;
pub mod render;
pub mod resources;
pub mod scene;
pub mod viewer;

pub use app::App;
pub use errors::{Result, ViewerError};
pub use gfx::{BufferHandle, DrawCall, GraphicsContext, TextureDesc, TextureHandle, VideoSource};
pub use render::WgpuContext;
pub use resources::{ImageData, TileDescriptor, TileMesh, TileRect, tile_grid};
pub use scene::{Axes, Node, NodeVisitor, SceneRegistry, TiledImageNode, Transform, VideoSurfaceNode};
pub use viewer::{FIRST_FRAME_DELTA, Viewer};
