//! Scene graph module
//!
//! Manages the drawable node set and its per-frame lifecycle:
//! - `Node`: closed set of drawable variants (tiled image, video surface)
//! - `Transform`: local transform component shared by every variant
//! - `NodeVisitor`: double dispatch over the variant set
//! - `SceneRegistry`: pending/active collections and the promotion step

pub mod node;
pub mod registry;
pub mod tiled_image;
pub mod transform;
pub mod video;
pub mod visitor;

pub use node::Node;
pub use registry::SceneRegistry;
pub use tiled_image::TiledImageNode;
pub use transform::{Axes, Transform};
pub use video::VideoSurfaceNode;
pub use visitor::NodeVisitor;
