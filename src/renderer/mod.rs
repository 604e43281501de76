//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into colored triangles in field
//! coordinates; the pipeline maps them to the canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, field_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
