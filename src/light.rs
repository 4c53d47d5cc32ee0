//! Directional light used for flat Lambert shading.

use crate::math::Vec3;

/// A light whose rays are all parallel to `direction`.
///
/// `direction` is the way the light travels (not where it comes from) and is
/// stored as given; shading normalizes it on use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(-Vec3::new(1.0, 1.0, 2.0))
    }
}

impl DirectionalLight {
    pub fn new(direction: Vec3) -> Self {
        Self { direction }
    }

    /// Lambert intensity in `[0, 1]` for a unit surface normal.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        let toward_light = -self.direction.normalize();
        normal.dot(toward_light).max(0.0)
    }
}
