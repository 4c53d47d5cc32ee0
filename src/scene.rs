//! Scene graph: a camera, the loaded models and the current selection.

use log::debug;

use crate::camera::OrbitCamera;
use crate::math::Mat4;
use crate::model::Model;
use crate::transformations;

pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Owns every model and the camera looking at them.
///
/// The selection is an index into `models`; it identifies which model user
/// edits target and never affects ownership.
#[derive(Debug, Clone)]
pub struct Scene {
    canvas_width: u32,
    canvas_height: u32,
    pub camera: OrbitCamera,
    models: Vec<Model>,
    selected: Option<usize>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl Scene {
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            camera: OrbitCamera::default(),
            models: Vec::new(),
            selected: None,
        }
    }

    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    // ============ Models ============

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut [Model] {
        &mut self.models
    }

    /// Appends a model, selects it and returns its index.
    pub fn add_model(&mut self, model: Model) -> usize {
        self.models.push(model);
        let index = self.models.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Removes and returns the model at `index`, keeping the selection
    /// pointing at the same model when it survives.
    pub fn remove_model(&mut self, index: usize) -> Option<Model> {
        if index >= self.models.len() {
            return None;
        }
        let removed = self.models.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        Some(removed)
    }

    /// Selects the model at `index`, or clears the selection with `None`.
    /// Returns false and leaves the selection unchanged for an invalid index.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.models.len() => false,
            _ => {
                self.selected = index;
                true
            }
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_model(&self) -> Option<&Model> {
        self.selected.and_then(|i| self.models.get(i))
    }

    pub fn selected_model_mut(&mut self) -> Option<&mut Model> {
        self.selected.and_then(|i| self.models.get_mut(i))
    }

    /// Drops every model, clears the selection and resets the camera.
    pub fn clear(&mut self) {
        self.models.clear();
        self.selected = None;
        self.camera = OrbitCamera::default();
    }

    // ============ Per-frame transform ============

    pub fn viewport_matrix(&self) -> Mat4 {
        transformations::viewport_matrix(
            self.canvas_width as f32,
            self.canvas_height as f32,
            0.0,
            0.0,
        )
    }

    /// `view * projection * viewport` for the current camera and canvas.
    pub fn view_projection_viewport(&self) -> Mat4 {
        self.camera.view_matrix() * self.camera.projection_matrix() * self.viewport_matrix()
    }

    /// `world * view * projection * viewport` for one model.
    pub fn final_transform(&self, model: &Model) -> Mat4 {
        model.world_matrix() * self.view_projection_viewport()
    }

    /// Refreshes every model's screen-space vertices. Must run once per frame
    /// before rendering, after any camera or model change.
    pub fn update_all_models(&mut self) {
        let shared = self.view_projection_viewport();
        let camera = &self.camera;
        for model in &mut self.models {
            let final_transform = model.world_matrix() * shared;
            model.apply_final_transformation(final_transform, camera);
        }
        debug!("transformed {} models", self.models.len());
    }
}
