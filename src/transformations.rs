//! Matrix builders for the model → world → view → projection → viewport chain.
//!
//! All matrices follow the row-vector convention of [`Mat4`]: a vertex is
//! transformed as `v * world * view * projection * viewport`.

use crate::math::{Mat4, Vec3};

/// Builds a right-handed look-at matrix.
///
/// `up` must not be parallel to `eye - target`; the x axis is undefined in
/// that case and the result contains NaN.
pub fn view_matrix(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z_axis = (eye - target).normalize();
    let x_axis = up.cross(z_axis).normalize();
    let y_axis = z_axis.cross(x_axis);

    Mat4::new([
        [x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(eye)],
        [y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(eye)],
        [z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ])
    .transpose()
}

/// Builds a right-handed perspective projection.
///
/// The resulting `w` equals the view-space distance in front of the camera
/// (`-z_view`), ready for the perspective divide. Depth maps to `[0, 1]`
/// between the near and far planes.
pub fn perspective_projection(fov: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
    let tan_half_fov = (fov / 2.0).tan();
    let m00 = 1.0 / (aspect * tan_half_fov);
    let m11 = 1.0 / tan_half_fov;
    let m22 = z_far / (z_near - z_far);
    let m32 = z_near * z_far / (z_near - z_far);

    Mat4::new([
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, m32],
        [0.0, 0.0, -1.0, 0.0],
    ])
    .transpose()
}

/// Maps normalized device coordinates onto a pixel grid with Y growing down.
pub fn viewport_matrix(width: f32, height: f32, x_min: f32, y_min: f32) -> Mat4 {
    Mat4::new([
        [width / 2.0, 0.0, 0.0, x_min + width / 2.0],
        [0.0, -height / 2.0, 0.0, y_min + height / 2.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
    .transpose()
}

/// Composes `translation * rotation * scale` in that multiplication order.
pub fn world_transform(scale: f32, rotation: Mat4, translation: Vec3) -> Mat4 {
    Mat4::translation(translation.x, translation.y, translation.z)
        * rotation
        * Mat4::scaling(scale)
}

/// Rotation applying roll (Z) first, then pitch (X), then yaw (Y).
pub fn yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Mat4 {
    Mat4::rotation_z(roll) * Mat4::rotation_x(pitch) * Mat4::rotation_y(yaw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn upper_rows(m: &Mat4) -> [Vec3; 3] {
        [0, 1, 2].map(|r| Vec3::new(m.get(r, 0), m.get(r, 1), m.get(r, 2)))
    }

    #[test]
    fn view_matrix_rotation_block_is_orthonormal() {
        let eyes = [
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(3.0, 2.0, -4.0),
            Vec3::new(-1.0, 7.5, 0.3),
        ];
        for eye in eyes {
            let view = view_matrix(eye, Vec3::new(0.5, -0.2, 0.1), Vec3::UNIT_Y);
            let rows = upper_rows(&view);
            for (i, a) in rows.iter().enumerate() {
                assert_relative_eq!(a.magnitude(), 1.0, epsilon = 1e-5);
                for b in rows.iter().skip(i + 1) {
                    assert_relative_eq!(a.dot(*b), 0.0, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn view_matrix_puts_target_in_front_of_camera() {
        let view = view_matrix(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UNIT_Y);
        let target = Vec4::point(0.0, 0.0, 0.0) * view;
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(target.z, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn projection_w_is_negated_view_depth() {
        let proj = perspective_projection(FRAC_PI_2, 16.0 / 9.0, 0.01, 100.0);
        let clip = Vec4::point(0.3, -0.2, -7.0) * proj;
        assert_relative_eq!(clip.w, 7.0, epsilon = 1e-6);
    }

    #[test]
    fn projection_maps_near_and_far_to_unit_depth_range() {
        let proj = perspective_projection(FRAC_PI_2, 1.0, 0.5, 50.0);
        let near = (Vec4::point(0.0, 0.0, -0.5) * proj).perspective_divide();
        let far = (Vec4::point(0.0, 0.0, -50.0) * proj).perspective_divide();
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn viewport_flips_y() {
        let vp = viewport_matrix(800.0, 600.0, 0.0, 0.0);
        let top_left = Vec4::point(-1.0, 1.0, 0.0) * vp;
        let bottom_right = Vec4::point(1.0, -1.0, 0.0) * vp;
        assert_eq!((top_left.x, top_left.y), (0.0, 0.0));
        assert_eq!((bottom_right.x, bottom_right.y), (800.0, 600.0));
    }

    #[test]
    fn identity_world_transform() {
        let world = world_transform(1.0, Mat4::identity(), Vec3::ZERO);
        assert_eq!(world, Mat4::identity());
    }

    #[test]
    fn world_transform_translates_before_scaling() {
        let world = world_transform(2.0, Mat4::identity(), Vec3::new(1.0, 0.0, 0.0));
        let p = Vec4::point(0.0, 0.0, 0.0) * world;
        assert_eq!(p, Vec4::point(2.0, 0.0, 0.0));
    }

    #[test]
    fn yaw_pitch_roll_zero_is_identity() {
        assert_eq!(yaw_pitch_roll(0.0, 0.0, 0.0), Mat4::identity());
    }

    #[test]
    fn yaw_turns_x_axis_toward_negative_z() {
        let p = Vec4::point(1.0, 0.0, 0.0) * yaw_pitch_roll(FRAC_PI_2, 0.0, 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }
}
