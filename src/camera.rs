//! Orbital camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer
//!
//! # Orbit
//!
//! The eye sits on a sphere of `radius` around `target`:
//!
//! ```text
//! eye = target + radius * (cos(phi) * sin(zeta), cos(zeta), sin(phi) * sin(zeta))
//! ```
//!
//! - **zeta**: polar angle measured from +Y, in `(0, π)`; at either pole the
//!   view axis is parallel to `up` and the view matrix degenerates
//! - **phi**: azimuth in the XZ plane, in `[0, 2π]`
//!
//! The camera stores these values as given. Keeping them in range, and keeping
//! `radius` inside `[z_near, z_far]`, is the job of whoever mutates them;
//! [`OrbitController`] does that for interactive input.

use std::f32::consts::{PI, TAU};

use crate::light::DirectionalLight;
use crate::math::{Mat4, Vec3};
use crate::transformations;

/// Camera orbiting a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Width divided by height.
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub radius: f32,
    pub zeta: f32,
    pub phi: f32,
    /// Light used by the rasterized renderer.
    pub light: DirectionalLight,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let mut camera = Self {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::UNIT_Y,
            fov: PI / 2.0,
            aspect: 16.0 / 9.0,
            z_near: 0.01,
            z_far: 100.0,
            radius: 5.0,
            zeta: PI / 2.3,
            phi: PI / 2.0,
            light: DirectionalLight::default(),
        };
        camera.change_eye();
        camera
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes `eye` from `(radius, zeta, phi)`. Call once per frame.
    pub fn change_eye(&mut self) {
        let (sin_zeta, cos_zeta) = self.zeta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        self.eye = self.target
            + Vec3::new(cos_phi * sin_zeta, cos_zeta, sin_phi * sin_zeta) * self.radius;
    }

    pub fn view_matrix(&self) -> Mat4 {
        transformations::view_matrix(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        transformations::perspective_projection(self.fov, self.aspect, self.z_near, self.z_far)
    }

    /// True when `w` lies strictly inside the near/far range, i.e. when a
    /// projected vertex is safe to perspective-divide.
    #[inline]
    pub fn w_in_range(&self, w: f32) -> bool {
        w > self.z_near && w < self.z_far
    }

    /// True when a screen-space depth lies inside `[z_near, z_far]`.
    #[inline]
    pub fn depth_in_range(&self, z: f32) -> bool {
        z >= self.z_near && z <= self.z_far
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Closest the polar angle may get to either pole.
pub const ZETA_MARGIN: f32 = 1e-4;

/// Clamps a polar angle to `[ZETA_MARGIN, π - ZETA_MARGIN]`.
#[inline]
pub fn clamp_zeta(zeta: f32) -> f32 {
    zeta.clamp(ZETA_MARGIN, PI - ZETA_MARGIN)
}

/// Applies interactive orbit and zoom input to an [`OrbitCamera`].
#[derive(Debug, Clone)]
pub struct OrbitController {
    /// Radians of orbit per unit of pointer movement.
    pub orbit_sensitivity: f32,
    /// Radius change per unit of wheel movement.
    pub zoom_sensitivity: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.01,
            zoom_sensitivity: 0.001,
        }
    }
}

impl OrbitController {
    pub fn new(orbit_sensitivity: f32, zoom_sensitivity: f32) -> Self {
        Self {
            orbit_sensitivity,
            zoom_sensitivity,
        }
    }

    /// Moves the eye along the sphere. Zeta is kept just short of the poles
    /// (see [`clamp_zeta`]) and phi wrapped into `[0, 2π)`.
    pub fn orbit(&self, camera: &mut OrbitCamera, dx: f32, dy: f32) {
        camera.phi = (camera.phi + dx * self.orbit_sensitivity).rem_euclid(TAU);
        camera.zeta = clamp_zeta(camera.zeta - dy * self.orbit_sensitivity);
    }

    /// Moves the eye toward (positive `delta`) or away from the target,
    /// keeping the radius inside `[z_near, z_far]`.
    pub fn zoom(&self, camera: &mut OrbitCamera, delta: f32) {
        camera.radius = (camera.radius - delta * self.zoom_sensitivity)
            .clamp(camera.z_near, camera.z_far);
    }
}

// =============================================================================
// Tests
// =============================================================================
