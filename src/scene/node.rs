//! The drawable node: a closed set of variants behind one capability
//! surface.
//!
//! # Lifecycle
//!
//! A node starts uninitialized, holding only its construction-time data and
//! transform. [`Node::init`] allocates all graphics resources exactly once;
//! a second call is rejected with
//! [`AlreadyInitialized`](crate::ViewerError::AlreadyInitialized).
//! [`Node::render`] draws with the already-allocated resources and is a
//! no-op before initialization (the registry never lets that happen).
//!
//! Transform operations are legal at any time, before or after
//! initialization, and compose by post-multiplication in call order.

use glam::Vec3;

use crate::errors::Result;
use crate::gfx::GraphicsContext;
use crate::scene::tiled_image::TiledImageNode;
use crate::scene::transform::{Axes, Transform};
use crate::scene::video::VideoSurfaceNode;
use crate::scene::visitor::NodeVisitor;

/// A drawable unit owning a transform and, once initialized, its graphics
/// resources.
pub enum Node {
    TiledImage(TiledImageNode),
    VideoSurface(VideoSurfaceNode),
}

impl Node {
    #[inline]
    #[must_use]
    pub fn transform(&self) -> &Transform {
        match self {
            Node::TiledImage(n) => &n.transform,
            Node::VideoSurface(n) => &n.transform,
        }
    }

    #[inline]
    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            Node::TiledImage(n) => &mut n.transform,
            Node::VideoSurface(n) => &mut n.transform,
        }
    }

    /// Appends a translation to the local transform.
    pub fn translate(&mut self, offset: Vec3) {
        self.transform_mut().translate(offset);
    }

    /// Appends a uniform scale to the local transform.
    pub fn scale(&mut self, factor: f32) {
        self.transform_mut().scale(factor);
    }

    /// Appends a rotation around the masked axes to the local transform.
    pub fn rotate(&mut self, radians: f32, axes: Axes) {
        self.transform_mut().rotate(radians, axes);
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        match self {
            Node::TiledImage(n) => n.is_initialized(),
            Node::VideoSurface(n) => n.is_initialized(),
        }
    }

    /// Allocates this node's graphics resources and uploads initial data.
    ///
    /// Must succeed exactly once before the node can be rendered. Calling
    /// it on an initialized node fails with `AlreadyInitialized`.
    pub fn init(&mut self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        match self {
            Node::TiledImage(n) => n.init(ctx),
            Node::VideoSurface(n) => n.init(ctx),
        }
    }

    /// Draws the node with its already-allocated resources.
    pub fn render(&mut self, ctx: &mut dyn GraphicsContext) {
        match self {
            Node::TiledImage(n) => n.render(ctx),
            Node::VideoSurface(n) => n.render(ctx),
        }
    }

    /// Calls the visitor method matching this node's concrete variant.
    pub fn accept(&self, visitor: &mut dyn NodeVisitor) {
        match self {
            Node::TiledImage(n) => visitor.visit_tiled_image(n),
            Node::VideoSurface(n) => visitor.visit_video_surface(n),
        }
    }
}

impl From<TiledImageNode> for Node {
    fn from(node: TiledImageNode) -> Self {
        Node::TiledImage(node)
    }
}

impl From<VideoSurfaceNode> for Node {
    fn from(node: VideoSurfaceNode) -> Self {
        Node::VideoSurface(node)
    }
}
