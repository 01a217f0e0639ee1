//! Local transform component.
//!
//! Every node composes a [`Transform`] rather than inheriting one: the
//! shared matrix logic lives here and the variants embed the struct.

use bitflags::bitflags;
use glam::{Mat4, Vec3};

bitflags! {
    /// Axis mask for [`Transform::rotate`].
    ///
    /// The rotation axis is the unit-length diagonal of the selected axes,
    /// so `Axes::X | Axes::Y` rotates around the normalized (1, 1, 0).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Axes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
    }
}

impl Axes {
    /// Unit-length rotation axis for this mask, or `None` when empty.
    #[must_use]
    pub fn axis(self) -> Option<Vec3> {
        if self.is_empty() {
            return None;
        }
        let v = Vec3::new(
            if self.contains(Axes::X) { 1.0 } else { 0.0 },
            if self.contains(Axes::Y) { 1.0 } else { 0.0 },
            if self.contains(Axes::Z) { 1.0 } else { 0.0 },
        );
        Some(v.normalize())
    }
}

/// A 4×4 column-major local transform.
///
/// Each operation post-multiplies into the accumulated matrix, so the order
/// of calls is observable: translate-then-scale differs from
/// scale-then-translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    /// Appends a translation.
    pub fn translate(&mut self, offset: Vec3) {
        self.matrix *= Mat4::from_translation(offset);
    }

    /// Appends a uniform scale.
    pub fn scale(&mut self, factor: f32) {
        self.matrix *= Mat4::from_scale(Vec3::splat(factor));
    }

    /// Appends a rotation of `radians` around the axis selected by `axes`.
    /// An empty mask leaves the transform untouched.
    pub fn rotate(&mut self, radians: f32, axes: Axes) {
        if let Some(axis) = axes.axis() {
            self.matrix *= Mat4::from_axis_angle(axis, radians);
        }
    }

    /// The accumulated local matrix, uploaded as the model transform.
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
