//! WebGPU rendering: flat-colored triangles, retessellated per frame

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
