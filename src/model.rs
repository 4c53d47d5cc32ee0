//! In-memory mesh model.
//!
//! A [`Model`] owns the vertices and faces parsed from one mesh file, the
//! per-frame screen-space copy of its vertices, and its placement in the world.

use rayon::prelude::*;

use crate::camera::OrbitCamera;
use crate::math::{Mat4, Vec3, Vec4};
use crate::transform::Transform;

/// Polygon referencing model vertices by their 1-based source index.
///
/// Indices are kept as written in the file. Resolving them against the
/// vertex count happens at draw time, so an out-of-range reference only
/// drops the edge or triangle that uses it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub vertices: Vec<i32>,
}

impl Face {
    pub fn new(vertices: Vec<i32>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Resolves the `i`-th reference to a 0-based index below `vertex_count`.
    #[inline]
    pub fn resolve(&self, i: usize, vertex_count: usize) -> Option<usize> {
        let one_based = *self.vertices.get(i)?;
        let index = usize::try_from(one_based.checked_sub(1)?).ok()?;
        (index < vertex_count).then_some(index)
    }

    /// Edges of the closed polygon as positions into `vertices`, including the
    /// wrap-around edge. Empty for faces with fewer than two references.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (i, (i + 1) % n))
    }

    /// Fan triangulation `(0, i, i + 1)`. Empty for faces with fewer than three
    /// references.
    pub fn fan(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (1..self.len().saturating_sub(1)).map(|i| [0, i, i + 1])
    }
}

/// Axis-aligned bounding box accumulated point by point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// A box containing nothing; the first [`include`](Self::include) sets it
    /// to that point.
    pub const fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Extent along each axis; zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.max - self.min).abs()
        }
    }

    /// Scale that maps the longest axis onto a span of 2 world units.
    ///
    /// A box with zero extent (single point or no points) is treated as if
    /// its longest axis were 1.
    pub fn normalization_scale(&self) -> f32 {
        let max_diff = self.size().max_element();
        let max_diff = if max_diff == 0.0 { 1.0 } else { max_diff };
        2.0 / max_diff
    }

    /// The 8 corners. Bit 0 of the index selects max x, bit 1 max y, bit 2 max z.
    pub fn corners(&self) -> [Vec4; 8] {
        let (lo, hi) = (self.min, self.max);
        std::array::from_fn(|i| {
            Vec4::point(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        })
    }
}

/// A parsed mesh with its placement and per-frame screen-space vertices.
#[derive(Clone, Debug)]
pub struct Model {
    name: String,
    source_vertices: Vec<Vec4>,
    transformed_vertices: Vec<Vec4>,
    faces: Vec<Face>,
    bounds: BoundingBox,
    transform: Transform,
}

impl Model {
    /// Builds a model from already computed bounds. The scale is set so the
    /// longest axis spans 2 world units.
    pub fn new(
        name: impl Into<String>,
        source_vertices: Vec<Vec4>,
        faces: Vec<Face>,
        bounds: BoundingBox,
    ) -> Self {
        let mut transform = Transform::default();
        transform.set_scale(bounds.normalization_scale());

        Self {
            name: name.into(),
            transformed_vertices: vec![Vec4::ZERO; source_vertices.len()],
            source_vertices,
            faces,
            bounds,
            transform,
        }
    }

    /// Builds a model, computing bounds from `source_vertices`.
    pub fn from_vertices(
        name: impl Into<String>,
        source_vertices: Vec<Vec4>,
        faces: Vec<Face>,
    ) -> Self {
        let mut bounds = BoundingBox::empty();
        for v in &source_vertices {
            bounds.include(v.to_vec3());
        }
        Self::new(name, source_vertices, faces, bounds)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_vertices(&self) -> &[Vec4] {
        &self.source_vertices
    }

    /// Screen-space vertices from the last [`apply_final_transformation`](Self::apply_final_transformation).
    pub fn transformed_vertices(&self) -> &[Vec4] {
        &self.transformed_vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn bounding_min(&self) -> Vec3 {
        self.bounds.min
    }

    pub fn bounding_max(&self) -> Vec3 {
        self.bounds.max
    }

    // ============ Placement ============

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale()
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.set_scale(scale);
    }

    pub fn delta(&self) -> f32 {
        self.transform.delta()
    }

    pub fn translation(&self) -> Vec3 {
        self.transform.translation()
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.transform.set_translation(translation);
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation()
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.set_rotation(rotation);
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Per-axis translation step: a fiftieth of the bounding box extent.
    pub fn optimal_translation_step(&self) -> Vec3 {
        self.bounds.size() / 50.0
    }

    // ============ Per-frame transform ============

    /// Transforms every source vertex by `final_transform` into
    /// `transformed_vertices`.
    ///
    /// A vertex is perspective-divided only when its `w` lies strictly between
    /// the camera's near and far distances. Anything else is stored undivided
    /// and left for the renderers' depth checks to reject.
    pub fn apply_final_transformation(&mut self, final_transform: Mat4, camera: &OrbitCamera) {
        self.transformed_vertices
            .resize(self.source_vertices.len(), Vec4::ZERO);

        self.transformed_vertices
            .par_iter_mut()
            .zip(self.source_vertices.par_iter())
            .for_each(|(out, &source)| {
                let v = source * final_transform;
                *out = if camera.w_in_range(v.w) {
                    v.perspective_divide()
                } else {
                    v
                };
            });
    }
}
