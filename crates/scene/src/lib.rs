//! Scene state: one camera, one movable object, one point light.
//!
//! # Invariants
//! - Scene state is plain data; nothing here talks to a window or a GPU.
//! - Positions change only through explicit setters and translations.

mod camera;
mod config;
mod light;
mod object;

pub use camera::Camera;
pub use config::{Scene, SceneConfig};
pub use light::{Attenuation, Light};
pub use object::SceneObject;

pub fn crate_info() -> &'static str {
    "litscene-scene v0.1.0"
}
