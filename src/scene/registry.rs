//! Node registry and per-frame promotion.

use log::error;

use crate::gfx::GraphicsContext;
use crate::scene::node::Node;
use crate::scene::visitor::NodeVisitor;

/// Clear color issued at the top of every frame.
const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

/// Owns the pending and active node collections and performs the per-frame
/// promotion step.
///
/// Nodes may be enqueued at any time, including from code running inside a
/// frame. Promotion (draining the pending queue and initializing each node)
/// and rendering are strictly sequential within one frame and never
/// interleave, so a node enqueued during the render phase only becomes
/// active at the start of the next frame.
///
/// Every node is in exactly one of {pending, active}, or has been discarded
/// after a failed initialization. The active list is kept in promotion
/// order, which is also render order.
#[derive(Default)]
pub struct SceneRegistry {
    /// Nodes queued to be initialized, drained first-in first-out.
    pending: Vec<Node>,
    /// Nodes actively being rendered, in promotion order.
    active: Vec<Node>,
}

impl SceneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Queues a node for promotion at the start of the next frame.
    pub fn enqueue(&mut self, node: impl Into<Node>) {
        self.pending.push(node.into());
    }

    /// Number of nodes awaiting promotion.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of initialized nodes in the render list.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// The initialized nodes, in render order.
    #[must_use]
    pub fn active(&self) -> &[Node] {
        &self.active
    }

    /// Mutable access to the initialized nodes, e.g. for per-frame
    /// transform updates from the host.
    pub fn active_mut(&mut self) -> &mut [Node] {
        &mut self.active
    }

    /// Runs a visitor over every active node, in render order.
    pub fn visit_active(&self, visitor: &mut dyn NodeVisitor) {
        for node in &self.active {
            node.accept(visitor);
        }
    }

    /// Drains the entire pending queue, initializing each node against the
    /// graphics context.
    ///
    /// A node whose initialization fails is logged and discarded; the
    /// remaining queue still gets processed; one broken asset never stalls
    /// the frame loop.
    pub fn promote(&mut self, ctx: &mut dyn GraphicsContext) {
        for mut node in self.pending.drain(..) {
            match node.init(ctx) {
                Ok(()) => self.active.push(node),
                Err(err) => error!("Failed to initialize a node, discarding it: {err}"),
            }
        }
    }

    /// Clears the frame buffer and renders every active node in promotion
    /// order.
    pub fn render(&mut self, ctx: &mut dyn GraphicsContext) {
        ctx.clear(CLEAR_COLOR);
        for node in &mut self.active {
            node.render(ctx);
        }
    }

    /// One frame's worth of registry work: the promotion drain, then
    /// clear + render.
    pub fn promote_and_render(&mut self, ctx: &mut dyn GraphicsContext) {
        self.promote(ctx);
        self.render(ctx);
    }
}
