//! Keyboard input mapped to camera and object displacements.
//!
//! # Invariants
//! - Event handling and per-frame polling are decoupled: the window layer
//!   feeds press/release events into a [`KeyboardState`], and each frame takes
//!   an immutable [`InputSnapshot`] from it.
//! - Movement logic only ever sees snapshots, never raw window events.

pub mod action;
mod keyboard;
mod movement;

pub use action::Action;
pub use keyboard::{InputSnapshot, Key, KeyboardState};
pub use movement::{FrameMovement, MovementController};

pub fn crate_info() -> &'static str {
    "litscene-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
