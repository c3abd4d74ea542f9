//! WebGPU rendering module
//!
//! Tessellates the snapshot on the CPU into one vertex-colored triangle
//! list per frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, canvas_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
