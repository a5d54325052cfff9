//! Shared value types for the lit scene.
//!
//! Colours and surface materials are plain `Copy` data so that scene state,
//! draw backends and GPU uploads can pass them around by value.

mod types;

pub use types::{Material, Rgba};
