//! Object transform as the host stores it: location, XYZ Euler rotation, scale.
//!
//! Baked objects have no parent, so their local transform is their world
//! transform. Writing a world matrix onto an object decomposes it into these
//! three channels, which are then keyframed independently.

use std::f32::consts::TAU;

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Location / rotation / scale of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub location: Vec3,
    /// Euler angles in radians, XYZ order.
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        location: Vec3::ZERO,
        rotation_euler: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn from_location(location: Vec3) -> Self {
        Self {
            location,
            ..Self::IDENTITY
        }
    }

    /// Decomposes a world matrix.
    ///
    /// Shear cannot be represented and is lost.
    #[must_use]
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (scale, rotation, location) = matrix.to_scale_rotation_translation();
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            location,
            rotation_euler: Vec3::new(x, y, z),
            scale,
        }
    }

    /// Replaces the transform with the decomposition of `matrix`, keeping the
    /// Euler angles continuous with the current rotation.
    pub fn apply_matrix(&mut self, matrix: &Mat4) {
        let decomposed = Self::from_matrix(matrix);
        self.location = decomposed.location;
        self.scale = decomposed.scale;
        self.rotation_euler = compatible_euler(decomposed.rotation_euler, self.rotation_euler);
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        let r = self.rotation_euler;
        Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }

    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.location)
    }
}

/// Shifts each angle of `euler` by whole turns so that it lies as close as
/// possible to the matching angle of `reference`.
///
/// The represented rotation is unchanged; only the keyframed values are kept
/// free of 2π jumps between consecutive frames.
#[must_use]
pub fn compatible_euler(euler: Vec3, reference: Vec3) -> Vec3 {
    let wrap = |angle: f32, target: f32| angle + ((target - angle) / TAU).round() * TAU;
    Vec3::new(
        wrap(euler.x, reference.x),
        wrap(euler.y, reference.y),
        wrap(euler.z, reference.z),
    )
}
