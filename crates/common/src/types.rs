use serde::{Deserialize, Serialize};

/// Linear RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Self = Self([0.0, 0.0, 1.0, 1.0]);
    pub const YELLOW: Self = Self([1.0, 1.0, 0.0, 1.0]);
    pub const GREY: Self = Self([0.5, 0.5, 0.5, 1.0]);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    /// Opaque colour from three components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b, 1.0])
    }

    pub fn r(&self) -> f32 {
        self.0[0]
    }

    pub fn g(&self) -> f32 {
        self.0[1]
    }

    pub fn b(&self) -> f32 {
        self.0[2]
    }

    pub fn a(&self) -> f32 {
        self.0[3]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(value: [f32; 4]) -> Self {
        Self(value)
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(value: Rgba) -> Self {
        value.0
    }
}

/// Surface reflectance used by lit geometry.
///
/// Mirrors the classic fixed-function material: separate ambient, diffuse and
/// specular reflectance plus a specular exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub specular: Rgba,
    /// Specular exponent, `0..=128` in the fixed-function convention.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        // Deep green body with slightly green-tinted highlights.
        Self {
            ambient: Rgba::new(0.05, 0.15, 0.05, 1.0),
            diffuse: Rgba::new(0.1, 0.6, 0.1, 1.0),
            specular: Rgba::new(0.9, 1.0, 0.9, 1.0),
            shininess: 75.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        let c = Rgba::rgb(0.2, 0.3, 0.4);
        assert_eq!(c.a(), 1.0);
        assert_eq!(c.g(), 0.3);
    }

    #[test]
    fn array_conversions() {
        let c: Rgba = [0.1, 0.2, 0.3, 0.4].into();
        let back: [f32; 4] = c.into();
        assert_eq!(back, [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn default_material_is_green() {
        let m = Material::default();
        assert!(m.diffuse.g() > m.diffuse.r());
        assert!(m.diffuse.g() > m.diffuse.b());
        assert_eq!(m.shininess, 75.0);
    }
}
