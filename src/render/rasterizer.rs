//! Depth-buffered triangle rasterization with flat Lambert shading.
//!
//! A frame is produced in two passes:
//!
//! 1. **Setup**, parallel over faces: fan-triangulate, cull back faces in
//!    world space and shade each surviving triangle with one color.
//! 2. **Fill**, parallel over bands of rows: every band walks the whole
//!    triangle list in submission order and fills the part of each triangle
//!    that falls in its rows.
//!
//! Bands never share pixels, so the depth test's read-then-write needs no
//! synchronization and the output does not depend on thread scheduling.
//!
//! # Barycentric Coordinates
//!
//! For a pixel P and screen-space triangle (v0, v1, v2):
//!
//! ```text
//! denom = (v1.y - v2.y)(v0.x - v2.x) + (v2.x - v1.x)(v0.y - v2.y)
//! alpha = ((v1.y - v2.y)(P.x - v2.x) + (v2.x - v1.x)(P.y - v2.y)) / denom
//! beta  = ((v2.y - v0.y)(P.x - v2.x) + (v0.x - v2.x)(P.y - v2.y)) / denom
//! gamma = 1 - alpha - beta
//! ```
//!
//! P is inside when all three are non-negative, edges included.

use log::debug;
use rayon::prelude::*;

use super::framebuffer::{FrameBuffer, RenderTarget};
use super::Renderer;
use crate::camera::OrbitCamera;
use crate::colors;
use crate::math::Vec3;
use crate::model::Model;
use crate::scene::Scene;

/// A shaded triangle in screen space. `z` holds each vertex's depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    pub points: [Vec3; 3],
    pub color: u32,
}

impl ScreenTriangle {
    pub fn new(points: [Vec3; 3], color: u32) -> Self {
        Self { points, color }
    }

    /// Rows this triangle's bounding box touches, as `(min_y, max_y)`.
    fn row_span(&self) -> (i64, i64) {
        let [v0, v1, v2] = self.points;
        (
            v0.y.min(v1.y).min(v2.y).floor() as i64,
            v0.y.max(v1.y).max(v2.y).ceil() as i64,
        )
    }
}

/// Fan-triangulates, culls and shades every face of `model`.
///
/// Triangles referencing a vertex outside the model are skipped. The result
/// keeps face order, then fan order within each face.
pub fn model_triangles(model: &Model, camera: &OrbitCamera, base_color: u32) -> Vec<ScreenTriangle> {
    let world = model.world_matrix();
    let source = model.source_vertices();
    let screen = model.transformed_vertices();
    let count = source.len().min(screen.len());

    model
        .faces()
        .par_iter()
        .flat_map_iter(|face| {
            face.fan().filter_map(move |corners| {
                let indices = [
                    face.resolve(corners[0], count)?,
                    face.resolve(corners[1], count)?,
                    face.resolve(corners[2], count)?,
                ];

                let [w0, w1, w2] = indices.map(|i| (source[i] * world).to_vec3());
                let normal = (w1 - w0).cross(w2 - w0).normalize();
                // Zero-area triangles normalize to NaN.
                if !normal.x.is_finite() || is_back_facing(normal, w0, camera.eye) {
                    return None;
                }

                let intensity = camera.light.intensity(normal);
                let points = indices.map(|i| screen[i].to_vec3());
                Some(ScreenTriangle::new(points, colors::modulate(base_color, intensity)))
            })
        })
        .collect()
}

/// True when the surface faces away from `eye`.
#[inline]
pub fn is_back_facing(normal: Vec3, world_v0: Vec3, eye: Vec3) -> bool {
    normal.dot(world_v0 - eye) > 0.0
}

/// Fills the part of `triangle` covered by `buffer`, writing pixels nearer
/// than the stored depth.
///
/// Pixels are sampled at integer coordinates. Triangles with near-zero area
/// produce nothing.
pub fn fill_triangle(buffer: &mut FrameBuffer, triangle: &ScreenTriangle) {
    let [v0, v1, v2] = triangle.points;

    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if denom.abs() < f32::EPSILON {
        return;
    }

    let rows = buffer.rows();
    let (min_y, max_y) = triangle.row_span();
    let min_y = min_y.max(rows.start);
    let max_y = max_y.min(rows.end - 1);
    let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i64).max(0);
    let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i64).min(buffer.width() as i64 - 1);
    if min_x > max_x || min_y > max_y {
        return;
    }

    for y in min_y..=max_y {
        let py = y as f32;
        for x in min_x..=max_x {
            let px = x as f32;
            let alpha = ((v1.y - v2.y) * (px - v2.x) + (v2.x - v1.x) * (py - v2.y)) / denom;
            let beta = ((v2.y - v0.y) * (px - v2.x) + (v0.x - v2.x) * (py - v2.y)) / denom;
            let gamma = 1.0 - alpha - beta;
            if alpha < 0.0 || beta < 0.0 || gamma < 0.0 {
                continue;
            }

            let depth = alpha * v0.z + beta * v1.z + gamma * v2.z;
            buffer.set_pixel_with_depth(x, y, depth, triangle.color);
        }
    }
}

/// Fills `triangles` in order, each band of rows on its own worker.
pub fn draw_triangles(target: &mut RenderTarget, triangles: &[ScreenTriangle]) {
    target.par_bands().for_each(|mut band| {
        let rows = band.rows();
        for triangle in triangles {
            let (min_y, max_y) = triangle.row_span();
            if max_y < rows.start || min_y >= rows.end {
                continue;
            }
            fill_triangle(&mut band, triangle);
        }
    });
}

/// Filled, flat-shaded rendering with back-face culling and a depth buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterizedRenderer;

impl RasterizedRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for RasterizedRenderer {
    fn draw(&self, scene: &Scene, target: &mut RenderTarget, color: u32) {
        target.clear_depth(scene.camera.z_far);

        let triangles: Vec<ScreenTriangle> = scene
            .models()
            .iter()
            .flat_map(|model| model_triangles(model, &scene.camera, color))
            .collect();

        debug!("rasterized: {} front-facing triangles", triangles.len());
        draw_triangles(target, &triangles);
    }
}
