//! Frame driver tests
//!
//! Tests for:
//! - First-frame delta fallback and exact subsequent deltas
//! - Millisecond-to-second conversion
//! - Fixed orthographic projection and identity view
//! - Frame sequencing: begin, clear, draws, end
//! - Enqueue-before-tick vs. enqueue-between-ticks visibility

mod common;

use common::{GfxOp, RecordingContext};
use glam::Mat4;
use tessera::{FIRST_FRAME_DELTA, ImageData, TiledImageNode, Viewer};

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn tiled(width: u32, height: u32, divisor: u32) -> TiledImageNode {
    let pixels = vec![0u8; (width * height * 4) as usize];
    TiledImageNode::new(ImageData::new(width, height, pixels).unwrap(), divisor).unwrap()
}

// ============================================================================
// Delta Time
// ============================================================================

#[test]
fn first_frame_delta_is_fallback() {
    let mut ctx = RecordingContext::new();
    let mut viewer = Viewer::new();

    let delta = viewer.tick(&mut ctx, 1234.0);
    assert!(approx_eq(delta, FIRST_FRAME_DELTA));
}

#[test]
fn subsequent_deltas_are_exact_differences() {
    let mut ctx = RecordingContext::new();
    let mut viewer = Viewer::new();

    viewer.tick(&mut ctx, 1000.0);
    let delta = viewer.tick(&mut ctx, 1250.0);
    assert!(approx_eq(delta, 0.25));

    let delta = viewer.tick(&mut ctx, 1366.0);
    assert!(approx_eq(delta, 0.116));
}

#[test]
fn timestamps_convert_milliseconds_to_seconds() {
    let mut ctx = RecordingContext::new();
    let mut viewer = Viewer::new();

    viewer.tick(&mut ctx, 0.0);
    let delta = viewer.tick(&mut ctx, 16.0);
    assert!(approx_eq(delta, 0.016));
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn projection_is_fixed_orthographic() {
    let viewer = Viewer::new();
    let expected = Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, 0.1, 1.0);
    assert_eq!(viewer.projection_matrix(), expected);
}

#[test]
fn view_starts_as_identity() {
    let viewer = Viewer::new();
    assert_eq!(viewer.view_matrix(), Mat4::IDENTITY);
    assert_eq!(viewer.view_projection(), viewer.projection_matrix());
}

// ============================================================================
// Frame Sequencing
// ============================================================================

#[test]
fn tick_brackets_frame_with_begin_and_end() {
    let mut ctx = RecordingContext::new();
    let mut viewer = Viewer::new();

    viewer.enqueue(tiled(4, 4, 1));
    viewer.tick(&mut ctx, 0.0);

    assert_eq!(ctx.ops.first(), Some(&GfxOp::BeginFrame));
    assert_eq!(ctx.ops.last(), Some(&GfxOp::EndFrame));

    let clear_at = ctx
        .ops
        .iter()
        .position(|op| matches!(op, GfxOp::Clear(_)))
        .unwrap();
    let draw_at = ctx
        .ops
        .iter()
        .position(|op| matches!(op, GfxOp::Draw { .. }))
        .unwrap();
    assert!(clear_at < draw_at);
}

#[test]
fn node_enqueued_before_tick_renders_that_frame() {
    let mut ctx = RecordingContext::new();
    let mut viewer = Viewer::new();

    viewer.enqueue(tiled(4, 4, 1));
    viewer.tick(&mut ctx, 0.0);

    assert_eq!(ctx.draw_count(), 1);
    assert_eq!(viewer.registry().active_len(), 1);
}

#[test]
fn node_enqueued_between_ticks_renders_next_frame() {
    let mut ctx = RecordingContext::new();
    let mut viewer = Viewer::new();

    viewer.enqueue(tiled(4, 4, 1));
    viewer.tick(&mut ctx, 0.0);
    assert_eq!(ctx.draw_count(), 1);

    viewer.enqueue(tiled(2, 2, 1));
    viewer.tick(&mut ctx, 16.0);
    // Frame 2 draws both nodes.
    assert_eq!(ctx.draw_count(), 1 + 2);
}

#[test]
fn empty_viewer_still_clears_every_frame() {
    let mut ctx = RecordingContext::new();
    let mut viewer = Viewer::new();

    viewer.tick(&mut ctx, 0.0);
    viewer.tick(&mut ctx, 16.0);

    let clears = ctx
        .ops
        .iter()
        .filter(|op| matches!(op, GfxOp::Clear(_)))
        .count();
    assert_eq!(clears, 2);
    assert_eq!(ctx.draw_count(), 0);
}
