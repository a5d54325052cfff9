use glam::{Mat4, Vec3};
use litscene_common::{Material, Rgba};
use serde::{Deserialize, Serialize};

/// The movable lit sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub position: Vec3,
    /// Euler angles in degrees, applied about X, then Y, then Z.
    pub rotation_degrees: Vec3,
    pub radius: f32,
    /// Displacement applied per frame while a movement key is held.
    pub speed: f32,
    pub material: Material,
    pub slices: u32,
    pub stacks: u32,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            position: Vec3::new(-2.0, 1.0, 0.0),
            rotation_degrees: Vec3::ZERO,
            radius: 0.8,
            speed: 0.1,
            material: Material::default(),
            slices: 32,
            stacks: 32,
        }
    }
}

impl SceneObject {
    pub fn new(position: Vec3, radius: f32, speed: f32) -> Self {
        Self {
            position,
            radius,
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

    pub fn set_rotation(&mut self, degrees: Vec3) {
        self.rotation_degrees = degrees;
    }

    pub fn rotate(&mut self, degrees: Vec3) {
        self.rotation_degrees += degrees;
    }

    pub fn set_ambient(&mut self, color: Rgba) {
        self.material.ambient = color;
    }

    pub fn set_diffuse(&mut self, color: Rgba) {
        self.material.diffuse = color;
    }

    pub fn set_specular(&mut self, color: Rgba) {
        self.material.specular = color;
    }

    pub fn set_shininess(&mut self, shininess: f32) {
        self.material.shininess = shininess;
    }

    /// Translation followed by the X, Y, Z rotations, in that order.
    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation_degrees;
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(r.x.to_radians())
            * Mat4::from_rotation_y(r.y.to_radians())
            * Mat4::from_rotation_z(r.z.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_accumulates() {
        let mut obj = SceneObject::new(Vec3::new(-2.0, 1.0, 1.0), 1.0, 0.1);
        obj.translate(Vec3::new(0.1, 0.0, 0.0));
        obj.translate(Vec3::new(0.1, 0.0, -0.1));
        assert!((obj.position - Vec3::new(-1.8, 1.0, 0.9)).length() < 1e-5);
    }

    #[test]
    fn material_setters() {
        let mut obj = SceneObject::default();
        obj.set_diffuse(Rgba::RED);
        obj.set_shininess(10.0);
        assert_eq!(obj.material.diffuse, Rgba::RED);
        assert_eq!(obj.material.shininess, 10.0);
    }

    #[test]
    fn model_matrix_translates_origin() {
        let obj = SceneObject::new(Vec3::new(1.0, 2.0, 3.0), 1.0, 0.1);
        let p = obj.model_matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn rotation_about_y() {
        let mut obj = SceneObject::new(Vec3::ZERO, 1.0, 0.1);
        obj.set_rotation(Vec3::new(0.0, 90.0, 0.0));
        obj.rotate(Vec3::ZERO);
        let p = obj.model_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }
}
