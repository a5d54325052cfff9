//! wgpu render backend for the lit scene.
//!
//! A frame is first flattened on the CPU into a [`litscene_render::FrameBatch`]
//! and then uploaded and drawn here with three pipelines: lines, unlit
//! triangles and lit triangles.
//!
//! # Invariants
//! - The backend never mutates scene state.
//! - Vertex buffers are rebuilt each frame; only the uniform buffer and depth
//!   texture persist.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
