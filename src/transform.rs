//! Placement of a model in the world.
//!
//! Provides a [`Transform`] struct with a fluent API for managing translation,
//! rotation (Euler angles) and a uniform scale.

use crate::math::{Mat4, Vec3};
use crate::transformations::{world_transform, yaw_pitch_roll};

/// Translation, Euler rotation and uniform scale of a model.
///
/// Setting the scale also recomputes [`delta`](Transform::delta), the step used
/// for incremental scaling from user input.
///
/// ```ignore
/// transform
///     .set_translation_xyz(0.0, 1.0, 0.0)
///     .rotate_yaw(0.1)
///     .set_scale(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    translation: Vec3,
    rotation: Vec3, // Euler angles in radians: x=pitch, y=yaw, z=roll
    scale: f32,
    delta: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            delta: 0.1,
        }
    }
}

impl Transform {
    /// Identity placement (translation=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Translation ============

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) -> &mut Self {
        self.translation = translation;
        self
    }

    pub fn set_translation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.translation = Vec3::new(x, y, z);
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.translation = self.translation + delta;
        self
    }

    // ============ Rotation ============

    /// Euler angles in radians: x=pitch, y=yaw, z=roll.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn rotate_pitch(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotate_yaw(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotate_roll(&mut self, angle: f32) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Step size for incremental scaling, always `scale / 10`.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self.delta = scale / 10.0;
        self
    }

    /// Grows the scale by one `delta` step.
    pub fn scale_up(&mut self) -> &mut Self {
        self.set_scale(self.scale + self.delta)
    }

    /// Shrinks the scale by one `delta` step.
    pub fn scale_down(&mut self) -> &mut Self {
        self.set_scale(self.scale - self.delta)
    }

    // ============ Matrix Generation ============

    pub fn rotation_matrix(&self) -> Mat4 {
        yaw_pitch_roll(self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// World matrix: `translation * rotation * scale`.
    pub fn to_matrix(&self) -> Mat4 {
        world_transform(self.scale, self.rotation_matrix(), self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.translation(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), 1.0);
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_translation_xyz(1.0, 2.0, 3.0)
            .rotate_yaw(0.5)
            .set_scale(2.0);

        assert_eq!(t.translation(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.5);
        assert_eq!(t.scale(), 2.0);
    }

    #[test]
    fn test_scale_sets_delta() {
        let mut t = Transform::new();
        t.set_scale(4.0);
        assert_relative_eq!(t.delta(), 0.4);
        t.scale_up();
        assert_relative_eq!(t.scale(), 4.4);
        assert_relative_eq!(t.delta(), 0.44);
        t.scale_down();
        assert_relative_eq!(t.scale(), 3.96, epsilon = 1e-6);
    }

    #[test]
    fn test_to_matrix_identity() {
        let t = Transform::default();
        assert_eq!(t.to_matrix(), Mat4::identity());
    }
}
