//! Scene drawing over an immediate-mode backend.
//!
//! The centrepiece is [`SphereMesh`], a cached unit-sphere tessellation that
//! is emitted as one triangle strip per stack. [`SceneRenderer`] owns it and
//! draws the rest of the demo (grid, axes, lines, light marker, object)
//! through any [`DrawBackend`].
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - The sphere cache holds unit-radius geometry; radius is applied on emit.
//! - Backends: [`FrameBatch`] flattens a frame for GPU upload,
//!   [`RecordingBackend`] records calls for inspection and tests.

mod backend;
mod batch;
mod mesh;
mod recording;
mod renderer;

pub use backend::{DrawBackend, Primitive};
pub use batch::{ColorVertex, FrameBatch, LitVertex};
pub use mesh::{MAX_SUBDIVISIONS, MeshError, SphereMesh};
pub use recording::{DrawCommand, RecordingBackend};
pub use renderer::{
    DEFAULT_AXIS_LENGTH, DEFAULT_GRID_DIVISIONS, DEFAULT_GRID_SIZE, SceneRenderer,
};

pub fn crate_info() -> &'static str {
    "litscene-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
