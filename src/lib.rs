//! A CPU-based software renderer for polygon meshes.
//!
//! Meshes are read from Wavefront-style text, placed in a [`Scene`] viewed by
//! an orbiting camera, and drawn into a packed BGRA pixel buffer as a
//! wireframe or as filled, flat-shaded triangles.
//!
//! # Quick Start
//!
//! ```no_run
//! use rasterkit::prelude::*;
//!
//! let mut engine = Engine::new(800, 600);
//! engine.load_model("teapot.obj")?;
//! engine.set_render_mode(RenderMode::Rasterized);
//! engine.frame().to_image().save("teapot.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod camera;
pub mod colors;
pub mod engine;
pub mod light;
pub mod math;
pub mod model;
pub mod parser;
pub mod render;
pub mod scene;
pub mod transform;
pub mod transformations;

pub use engine::Engine;
pub use model::Model;
pub use parser::LoadError;
pub use render::{render, RenderMode, RenderTarget};
pub use scene::Scene;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rasterkit::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{OrbitCamera, OrbitController};
    pub use crate::light::DirectionalLight;

    // Engine
    pub use crate::engine::Engine;

    // Model
    pub use crate::model::{BoundingBox, Face, Model};
    pub use crate::parser::{parse_model, parse_str, LoadError};

    // Scene
    pub use crate::scene::Scene;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::{Mat4, Vec3, Vec4};

    // Rendering
    pub use crate::render::{render, RenderMode, RenderTarget};
}
