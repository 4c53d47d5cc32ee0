//! Software rendering of a [`Scene`] into a [`RenderTarget`].
//!
//! Two renderers share one entry point, [`render`]:
//! - [`WireframeRenderer`]: face edges drawn with Bresenham lines
//! - [`RasterizedRenderer`]: filled, flat-shaded triangles with a depth buffer

pub mod framebuffer;
pub mod line;
pub mod rasterizer;
pub mod wireframe;

pub use framebuffer::{FrameBuffer, RenderTarget, TILE_ROWS};
pub use rasterizer::{RasterizedRenderer, ScreenTriangle};
pub use wireframe::{Segment, WireframeRenderer};

use log::trace;

use crate::colors;
use crate::scene::Scene;

/// Draws every model of a scene into a target.
///
/// Implementors assume the models' screen-space vertices are current for the
/// scene's camera and canvas.
pub trait Renderer {
    fn draw(&self, scene: &Scene, target: &mut RenderTarget, color: u32);
}

/// How a frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Face outlines in the foreground color.
    #[default]
    Wireframe,
    /// Filled triangles shaded from the foreground color.
    Rasterized,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Wireframe => write!(f, "wireframe"),
            RenderMode::Rasterized => write!(f, "rasterized"),
        }
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wireframe" => Ok(RenderMode::Wireframe),
            "rasterized" => Ok(RenderMode::Rasterized),
            other => Err(format!("unknown render mode: {other}")),
        }
    }
}

/// Holds both renderers and forwards to the one matching the active mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct RendererDispatcher {
    wireframe: WireframeRenderer,
    rasterized: RasterizedRenderer,
    active: RenderMode,
}

impl RendererDispatcher {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            wireframe: WireframeRenderer::new(),
            rasterized: RasterizedRenderer::new(),
            active: mode,
        }
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.active = mode;
    }

    pub fn mode(&self) -> RenderMode {
        self.active
    }
}

impl Renderer for RendererDispatcher {
    #[inline]
    fn draw(&self, scene: &Scene, target: &mut RenderTarget, color: u32) {
        match self.active {
            RenderMode::Wireframe => self.wireframe.draw(scene, target, color),
            RenderMode::Rasterized => self.rasterized.draw(scene, target, color),
        }
    }
}

/// Renders one complete frame.
///
/// Resizes `target` to the scene's canvas if needed, fills it with
/// `background`, refreshes the camera eye and every model's screen-space
/// vertices, then draws in `mode` with `foreground`. The selected model's
/// bounding box is outlined last in [`colors::HIGHLIGHT`].
pub fn render(
    scene: &mut Scene,
    target: &mut RenderTarget,
    foreground: u32,
    background: u32,
    mode: RenderMode,
) {
    let (width, height) = (scene.canvas_width(), scene.canvas_height());
    if target.width() != width || target.height() != height {
        target.resize(width, height);
    }
    target.clear(background);

    scene.camera.change_eye();
    scene.update_all_models();

    RendererDispatcher::new(mode).draw(scene, target, foreground);
    wireframe::draw_selection_highlight(scene, target, colors::HIGHLIGHT);

    trace!("rendered {width}x{height} frame in {mode} mode");
}
