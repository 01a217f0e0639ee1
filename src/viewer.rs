//! The frame driver.

use glam::Mat4;

use crate::gfx::GraphicsContext;
use crate::scene::{Node, SceneRegistry};

/// Delta-time reported on the first frame, before any timestamp history
/// exists.
pub const FIRST_FRAME_DELTA: f32 = 0.1;

/// Owns the projection/view transforms and ticks the scene registry once
/// per host-scheduled frame.
///
/// The host run loop calls [`Viewer::tick`] with a monotonically increasing
/// timestamp in milliseconds; the viewer converts it to seconds, promotes
/// pending nodes, clears and renders, then records the timestamp. It never
/// schedules frames or spins a loop itself; driving the clock is the
/// host's job, which also makes the viewer trivially testable with
/// synthetic timestamps.
pub struct Viewer {
    registry: SceneRegistry,
    projection_matrix: Mat4,
    view_matrix: Mat4,
    /// Timestamp of the previous frame, in seconds. Absent before the
    /// first frame.
    last_update: Option<f64>,
}

impl Viewer {
    /// Creates a viewer with the fixed orthographic projection
    /// (left −1, right 1, bottom −1, top 1, near 0.1, far 1.0) and an
    /// identity view matrix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: SceneRegistry::new(),
            projection_matrix: Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, 0.1, 1.0),
            view_matrix: Mat4::IDENTITY,
            last_update: None,
        }
    }

    /// Queues a node to be promoted on the next frame.
    pub fn enqueue(&mut self, node: impl Into<Node>) {
        self.registry.enqueue(node);
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    #[inline]
    pub fn registry_mut(&mut self) -> &mut SceneRegistry {
        &mut self.registry
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Combined view-projection transform uploaded for every draw.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Advances one frame.
    ///
    /// `timestamp_ms` comes from the host frame scheduler and must increase
    /// monotonically. Returns the delta-time in seconds:
    /// [`FIRST_FRAME_DELTA`] when no previous frame exists, the exact
    /// timestamp difference afterwards.
    pub fn tick(&mut self, ctx: &mut dyn GraphicsContext, timestamp_ms: f64) -> f32 {
        // Millis to seconds.
        let timestamp = timestamp_ms * 1e-3;
        let delta = match self.last_update {
            Some(previous) => (timestamp - previous) as f32,
            None => FIRST_FRAME_DELTA,
        };

        ctx.begin_frame(self.view_projection());
        self.registry.promote_and_render(ctx);
        ctx.end_frame();

        self.last_update = Some(timestamp);
        delta
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}
