use glam::Vec3;
use litscene_common::Rgba;
use serde::{Deserialize, Serialize};

/// Distance falloff coefficients: `1 / (constant + linear*d + quadratic*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 0.5,
            linear: 0.02,
            quadratic: 0.005,
        }
    }
}

impl Attenuation {
    /// Intensity factor at `distance`. A zero denominator yields full intensity.
    pub fn factor(&self, distance: f32) -> f32 {
        let denom = self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denom > f32::EPSILON { 1.0 / denom } else { 1.0 }
    }
}

/// Positional point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub specular: Rgba,
    pub attenuation: Attenuation,
    /// Scene-wide ambient term added regardless of distance.
    pub global_ambient: Rgba,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 8.0, 0.0),
            ambient: Rgba::rgb(0.2, 0.2, 0.2),
            // Warm white.
            diffuse: Rgba::rgb(1.0, 0.97, 0.85),
            specular: Rgba::WHITE,
            attenuation: Attenuation::default(),
            global_ambient: Rgba::rgb(0.2, 0.2, 0.2),
        }
    }
}

impl Light {
    /// Radius of the marker sphere drawn at the light position.
    pub const MARKER_RADIUS: f32 = 0.2;
    pub const MARKER_SLICES: u32 = 16;
    pub const MARKER_STACKS: u32 = 16;
    pub const MARKER_COLOR: Rgba = Rgba::YELLOW;

    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_ambient(&mut self, color: Rgba) {
        self.ambient = color;
    }

    pub fn set_diffuse(&mut self, color: Rgba) {
        self.diffuse = color;
    }

    pub fn set_specular(&mut self, color: Rgba) {
        self.specular = color;
    }

    pub fn set_attenuation(&mut self, constant: f32, linear: f32, quadratic: f32) {
        self.attenuation = Attenuation {
            constant,
            linear,
            quadratic,
        };
    }

    /// Attenuation factor for a point at `point`.
    pub fn attenuation_at(&self, point: Vec3) -> f32 {
        self.attenuation.factor(self.position.distance(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_above_origin() {
        let light = Light::default();
        assert_eq!(light.position, Vec3::new(0.0, 8.0, 0.0));
        assert_eq!(light.specular, Rgba::WHITE);
    }

    #[test]
    fn attenuation_at_source_is_inverse_constant() {
        let light = Light::default();
        assert!((light.attenuation_at(light.position) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn attenuation_falls_off_with_distance() {
        let light = Light::default();
        let near = light.attenuation_at(Vec3::new(0.0, 7.0, 0.0));
        let far = light.attenuation_at(Vec3::new(0.0, -10.0, 0.0));
        assert!(near > far);
    }

    #[test]
    fn zero_attenuation_is_full_intensity() {
        let mut light = Light::default();
        light.set_attenuation(0.0, 0.0, 0.0);
        assert_eq!(light.attenuation_at(Vec3::ZERO), 1.0);
    }
}
