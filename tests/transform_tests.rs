//! Transform tests
//!
//! Tests for:
//! - Identity default
//! - Post-multiplication composition and call-order sensitivity
//! - Axis-mask rotation
//! - Node-level transform dispatch

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3, Vec4};
use tessera::{Axes, ImageData, Node, TiledImageNode, Transform};

const EPSILON: f32 = 1e-5;

fn mat4_approx(a: Mat4, b: Mat4) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

fn test_image() -> ImageData {
    ImageData::new(2, 2, vec![0u8; 16]).unwrap()
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.matrix(), Mat4::IDENTITY);
}

#[test]
fn transform_translate_matches_reference() {
    let mut t = Transform::new();
    t.translate(Vec3::new(1.0, 2.0, 3.0));
    assert!(mat4_approx(
        t.matrix(),
        Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
    ));
}

#[test]
fn transform_scale_is_uniform() {
    let mut t = Transform::new();
    t.scale(2.5);
    assert!(mat4_approx(t.matrix(), Mat4::from_scale(Vec3::splat(2.5))));
}

// ============================================================================
// Composition Order
// ============================================================================

#[test]
fn transform_translate_then_scale_differs_from_scale_then_translate() {
    let v = Vec3::new(1.0, 0.0, 0.0);
    let s = 2.0;

    let mut a = Transform::new();
    a.translate(v);
    a.scale(s);

    let mut b = Transform::new();
    b.scale(s);
    b.translate(v);

    assert!(!mat4_approx(a.matrix(), b.matrix()));
}

#[test]
fn transform_composition_is_post_multiplication() {
    let mut t = Transform::new();
    t.translate(Vec3::new(1.0, 2.0, 3.0));
    t.scale(0.5);
    t.rotate(FRAC_PI_2, Axes::Z);

    let reference = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
        * Mat4::from_scale(Vec3::splat(0.5))
        * Mat4::from_axis_angle(Vec3::Z, FRAC_PI_2);
    assert!(mat4_approx(t.matrix(), reference));
}

#[test]
fn transform_translate_then_scale_scales_after_moving() {
    // M = T * S maps the unit-square corner (1,1) to s*(1,1) + v.
    let mut t = Transform::new();
    t.translate(Vec3::new(10.0, 0.0, 0.0));
    t.scale(2.0);

    let corner = t.matrix() * Vec4::new(1.0, 1.0, 0.0, 1.0);
    assert!((corner.x - 12.0).abs() < EPSILON);
    assert!((corner.y - 2.0).abs() < EPSILON);
}

// ============================================================================
// Rotation Axis Mask
// ============================================================================

#[test]
fn transform_rotate_z_quarter_turn() {
    let mut t = Transform::new();
    t.rotate(FRAC_PI_2, Axes::Z);

    let rotated = t.matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
    assert!((rotated.x).abs() < EPSILON);
    assert!((rotated.y - 1.0).abs() < EPSILON);
}

#[test]
fn transform_rotate_empty_mask_is_noop() {
    let mut t = Transform::new();
    t.rotate(FRAC_PI_2, Axes::empty());
    assert_eq!(t.matrix(), Mat4::IDENTITY);
}

#[test]
fn transform_rotate_multi_axis_normalizes() {
    let mut t = Transform::new();
    t.rotate(1.0, Axes::X | Axes::Y | Axes::Z);

    let reference = Mat4::from_axis_angle(Vec3::ONE.normalize(), 1.0);
    assert!(mat4_approx(t.matrix(), reference));
}

#[test]
fn axes_axis_is_unit_length() {
    for mask in [Axes::X, Axes::Y | Axes::Z, Axes::all()] {
        let axis = mask.axis().unwrap();
        assert!((axis.length() - 1.0).abs() < EPSILON);
    }
    assert!(Axes::empty().axis().is_none());
}

// ============================================================================
// Node Dispatch
// ============================================================================

#[test]
fn node_transform_ops_compose_in_call_order() {
    let mut node = Node::from(TiledImageNode::new(test_image(), 1).unwrap());
    node.translate(Vec3::new(1.0, 0.0, 0.0));
    node.scale(3.0);
    node.rotate(FRAC_PI_2, Axes::Y);

    let reference = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
        * Mat4::from_scale(Vec3::splat(3.0))
        * Mat4::from_axis_angle(Vec3::Y, FRAC_PI_2);
    assert!(mat4_approx(node.transform().matrix(), reference));
}
