//! Core rendering engine.
//!
//! The [`Engine`] is the main entry point for applications. It owns the
//! scene, the render target and the drawing settings, and turns them into
//! one finished frame per [`frame`](Engine::frame) call.

use std::path::Path;

use log::{info, warn};

use crate::camera::OrbitController;
use crate::colors;
use crate::parser::{self, LoadError};
use crate::render::{self, RenderMode, RenderTarget};
use crate::scene::Scene;

pub struct Engine {
    scene: Scene,
    target: RenderTarget,
    controller: OrbitController,
    render_mode: RenderMode,
    foreground: u32,
    background: u32,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        let mut scene = Scene::new(width, height);
        scene.camera.aspect = aspect_ratio(width, height);

        Self {
            scene,
            target: RenderTarget::new(width, height),
            controller: OrbitController::default(),
            render_mode: RenderMode::default(),
            foreground: colors::FOREGROUND,
            background: colors::BACKGROUND,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_colors(&mut self, foreground: u32, background: u32) {
        self.foreground = foreground;
        self.background = background;
    }

    pub fn colors(&self) -> (u32, u32) {
        (self.foreground, self.background)
    }

    pub fn controller_mut(&mut self) -> &mut OrbitController {
        &mut self.controller
    }

    /// Loads a mesh file and adds it to the scene as the selected model.
    ///
    /// On failure the scene is left exactly as it was.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        match parser::parse_model(path) {
            Ok(model) => Ok(self.scene.add_model(model)),
            Err(e) => {
                warn!("could not load {}: {e}", path.display());
                Err(e)
            }
        }
    }

    /// Removes every model and resets the camera to its defaults.
    pub fn clear_scene(&mut self) {
        self.scene.clear();
        self.scene.camera.aspect = aspect_ratio(self.target.width(), self.target.height());
    }

    /// Changes the canvas size. The aspect ratio follows.
    pub fn resize(&mut self, width: u32, height: u32) {
        info!("resizing canvas to {width}x{height}");
        self.scene.set_canvas_size(width, height);
        self.scene.camera.aspect = aspect_ratio(width, height);
        self.target.resize(width, height);
    }

    /// Orbits the camera by a pointer movement.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.controller.orbit(&mut self.scene.camera, dx, dy);
    }

    /// Moves the camera toward or away from its target.
    pub fn zoom(&mut self, delta: f32) {
        self.controller.zoom(&mut self.scene.camera, delta);
    }

    /// Renders one frame and returns it.
    pub fn frame(&mut self) -> &RenderTarget {
        render::render(
            &mut self.scene,
            &mut self.target,
            self.foreground,
            self.background,
            self.render_mode,
        );
        &self.target
    }

    /// Renders one frame and returns it as BGRA bytes.
    pub fn frame_bytes(&mut self) -> Vec<u8> {
        self.frame().to_bgra_bytes()
    }

    /// The last rendered frame.
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}
