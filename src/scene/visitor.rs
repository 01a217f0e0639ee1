//! Double dispatch over the node variant set.

use crate::scene::tiled_image::TiledImageNode;
use crate::scene::video::VideoSurfaceNode;

/// Visitor over the closed set of node variants.
///
/// External passes (picking, statistics, serialization) implement one
/// method per variant and receive the concrete node through
/// [`Node::accept`](crate::scene::Node::accept), without the scene exposing
/// any runtime type inspection.
pub trait NodeVisitor {
    fn visit_tiled_image(&mut self, node: &TiledImageNode);

    fn visit_video_surface(&mut self, node: &VideoSurfaceNode);
}
