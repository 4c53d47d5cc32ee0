//! Edge-list wireframe rendering and the selection bounding box.

use log::debug;
use rayon::prelude::*;

use super::framebuffer::RenderTarget;
use super::line::draw_line;
use super::Renderer;
use crate::camera::OrbitCamera;
use crate::math::Vec4;
use crate::model::Model;
use crate::scene::Scene;

/// Corner pairs of the 12 bounding box edges; see [`BoundingBox::corners`](crate::model::BoundingBox::corners).
const BOX_EDGES: [(usize, usize); 12] = [
    // z = min face
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    // z = max face
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    // connecting edges
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// A line ready to rasterize, in integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Segment {
    /// Rounds two screen-space vertices to pixels and applies the cheap
    /// rejection tests: both ends past the same canvas edge, or either depth
    /// outside the camera's clip range.
    pub fn between(a: Vec4, b: Vec4, width: u32, height: u32, camera: &OrbitCamera) -> Option<Self> {
        let (w, h) = (width as i32, height as i32);
        let segment = Self {
            x0: a.x.round_ties_even() as i32,
            y0: a.y.round_ties_even() as i32,
            x1: b.x.round_ties_even() as i32,
            y1: b.y.round_ties_even() as i32,
        };

        let off_screen = (segment.x0 >= w && segment.x1 >= w)
            || (segment.x0 <= 0 && segment.x1 <= 0)
            || (segment.y0 >= h && segment.y1 >= h)
            || (segment.y0 <= 0 && segment.y1 <= 0);
        let clipped = !camera.depth_in_range(a.z) || !camera.depth_in_range(b.z);

        (!off_screen && !clipped).then_some(segment)
    }
}

/// Collects the visible edges of every face of `model`, faces in parallel.
///
/// Each face contributes its closing edge too. Edges referencing a vertex
/// outside the model are skipped.
pub fn model_segments(model: &Model, width: u32, height: u32, camera: &OrbitCamera) -> Vec<Segment> {
    let vertices = model.transformed_vertices();
    let count = vertices.len();

    model
        .faces()
        .par_iter()
        .flat_map_iter(|face| {
            face.edges().filter_map(move |(a, b)| {
                let i0 = face.resolve(a, count)?;
                let i1 = face.resolve(b, count)?;
                Segment::between(vertices[i0], vertices[i1], width, height, camera)
            })
        })
        .collect()
}

/// Projects the 8 corners of `model`'s bounding box with the same chain as
/// its vertices and returns the visible box edges.
pub fn selection_segments(scene: &Scene, model: &Model) -> Vec<Segment> {
    let camera = &scene.camera;
    let final_transform = scene.final_transform(model);

    let corners = model.bounds().corners().map(|corner| {
        let v = corner * final_transform;
        if camera.w_in_range(v.w) {
            v.perspective_divide()
        } else {
            v
        }
    });

    BOX_EDGES
        .iter()
        .filter_map(|&(a, b)| {
            Segment::between(
                corners[a],
                corners[b],
                scene.canvas_width(),
                scene.canvas_height(),
                camera,
            )
        })
        .collect()
}

/// Draws `segments` in one color, each band of rows on its own worker.
pub fn draw_segments(target: &mut RenderTarget, segments: &[Segment], color: u32) {
    target.par_bands().for_each(|mut band| {
        for s in segments {
            draw_line(&mut band, s.x0, s.y0, s.x1, s.y1, color);
        }
    });
}

/// Draws the outline of every face in a single color.
#[derive(Debug, Default, Clone, Copy)]
pub struct WireframeRenderer;

impl WireframeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for WireframeRenderer {
    fn draw(&self, scene: &Scene, target: &mut RenderTarget, color: u32) {
        let (width, height) = (target.width(), target.height());
        let segments: Vec<Segment> = scene
            .models()
            .iter()
            .flat_map(|model| model_segments(model, width, height, &scene.camera))
            .collect();

        debug!("wireframe: {} edges", segments.len());
        draw_segments(target, &segments, color);
    }
}

/// Outlines the bounding box of the selected model, if any.
pub fn draw_selection_highlight(scene: &Scene, target: &mut RenderTarget, color: u32) {
    if let Some(model) = scene.selected_model() {
        let segments = selection_segments(scene, model);
        draw_segments(target, &segments, color);
    }
}
