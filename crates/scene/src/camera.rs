use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Translating camera with perspective projection parameters.
///
/// The camera never rotates: its view transform is a pure translation by
/// `-position`, so it always looks down -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Displacement applied per frame while a movement key is held.
    pub speed: f32,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 6.0),
            speed: 0.1,
            fov_degrees: 45.0,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            speed,
            ..Self::default()
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Update the aspect ratio from a framebuffer size. Zero heights are clamped.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
