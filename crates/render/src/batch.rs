use glam::{Mat4, Vec3};
use litscene_common::{Material, Rgba};
use litscene_scene::Light;

use crate::backend::{DrawBackend, Primitive};

/// Unlit vertex: world-space position and flat colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Lit vertex: world-space position and normal plus the material in effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub material: Material,
}

/// A [`DrawBackend`] that flattens one frame into world-space vertex lists.
///
/// Strips are expanded to independent triangles with alternating winding so
/// the whole frame draws with three list topologies: lines, unlit triangles
/// and lit triangles.
#[derive(Debug)]
pub struct FrameBatch {
    pub clear_color: Rgba,
    pub view_projection: Mat4,
    pub eye: Vec3,
    pub light: Light,
    pub lines: Vec<ColorVertex>,
    pub unlit_triangles: Vec<ColorVertex>,
    pub lit_triangles: Vec<LitVertex>,
    /// Last requested line width. GPU line lists are always one pixel wide.
    pub line_width: f32,

    model_stack: Vec<Mat4>,
    model: Mat4,
    lighting: bool,
    material: Material,
    color: Rgba,
    normal: Vec3,
    open: Option<Primitive>,
    pending: Vec<(Vec3, Vec3)>,
}

impl Default for FrameBatch {
    fn default() -> Self {
        Self {
            clear_color: Rgba::rgb(0.0, 0.0, 0.0),
            view_projection: Mat4::IDENTITY,
            eye: Vec3::ZERO,
            light: Light::default(),
            lines: Vec::new(),
            unlit_triangles: Vec::new(),
            lit_triangles: Vec::new(),
            line_width: 1.0,
            model_stack: Vec::new(),
            model: Mat4::IDENTITY,
            lighting: false,
            material: Material::default(),
            color: Rgba::WHITE,
            normal: Vec3::Z,
            open: None,
            pending: Vec::new(),
        }
    }
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.unlit_triangles.is_empty() && self.lit_triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        (self.unlit_triangles.len() + self.lit_triangles.len()) / 3
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    fn push_triangle(&mut self, a: (Vec3, Vec3), b: (Vec3, Vec3), c: (Vec3, Vec3)) {
        if self.lighting {
            for (position, normal) in [a, b, c] {
                self.lit_triangles.push(LitVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    material: self.material,
                });
            }
        } else {
            for (position, _) in [a, b, c] {
                self.unlit_triangles.push(ColorVertex {
                    position: position.to_array(),
                    color: self.color.0,
                });
            }
        }
    }

    fn flush(&mut self, primitive: Primitive) {
        let vertices = std::mem::take(&mut self.pending);
        match primitive {
            Primitive::Lines => {
                for pair in vertices.chunks_exact(2) {
                    for (position, _) in pair {
                        self.lines.push(ColorVertex {
                            position: position.to_array(),
                            color: self.color.0,
                        });
                    }
                }
            }
            Primitive::Triangles => {
                for tri in vertices.chunks_exact(3) {
                    self.push_triangle(tri[0], tri[1], tri[2]);
                }
            }
            Primitive::TriangleStrip => {
                for k in 0..vertices.len().saturating_sub(2) {
                    if k % 2 == 0 {
                        self.push_triangle(vertices[k], vertices[k + 1], vertices[k + 2]);
                    } else {
                        self.push_triangle(vertices[k + 1], vertices[k], vertices[k + 2]);
                    }
                }
            }
        }
        self.pending = vertices;
        self.pending.clear();
    }
}

impl DrawBackend for FrameBatch {
    fn clear(&mut self, color: Rgba) {
        self.clear_color = color;
        self.lines.clear();
        self.unlit_triangles.clear();
        self.lit_triangles.clear();
    }

    fn set_view_projection(&mut self, view_projection: Mat4) {
        self.view_projection = view_projection;
    }

    fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    fn push_transform(&mut self, transform: Mat4) {
        self.model_stack.push(self.model);
        self.model *= transform;
    }

    fn pop_transform(&mut self) {
        match self.model_stack.pop() {
            Some(model) => self.model = model,
            None => tracing::warn!("pop_transform without matching push_transform"),
        }
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.lighting = enabled;
    }

    fn lighting_enabled(&self) -> bool {
        self.lighting
    }

    fn set_light(&mut self, light: &Light) {
        self.light = *light;
    }

    fn set_material(&mut self, material: &Material) {
        self.material = *material;
    }

    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn begin_primitive(&mut self, primitive: Primitive) {
        if let Some(open) = self.open {
            tracing::warn!(?open, ?primitive, "begin_primitive inside an open primitive; discarding it");
            self.pending.clear();
        }
        self.open = Some(primitive);
    }

    fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal;
    }

    fn emit_vertex(&mut self, position: Vec3) {
        if self.open.is_none() {
            tracing::warn!(?position, "emit_vertex outside a primitive; ignored");
            return;
        }
        let world = self.model.transform_point3(position);
        let normal = self.model.transform_vector3(self.normal).normalize_or_zero();
        self.pending.push((world, normal));
    }

    fn end_primitive(&mut self) {
        match self.open.take() {
            Some(primitive) => self.flush(primitive),
            None => tracing::warn!("end_primitive without begin_primitive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(batch: &mut FrameBatch, points: &[Vec3]) {
        batch.begin_primitive(Primitive::TriangleStrip);
        for p in points {
            batch.emit_vertex(*p);
        }
        batch.end_primitive();
    }

    #[test]
    fn strip_expands_with_alternating_winding() {
        let mut batch = FrameBatch::new();
        let pts = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE, Vec3::Z];
        strip(&mut batch, &pts);

        assert_eq!(batch.triangle_count(), 3);
        let pos: Vec<[f32; 3]> = batch.unlit_triangles.iter().map(|v| v.position).collect();
        let p = |i: usize| pts[i].to_array();
        assert_eq!(&pos[0..3], &[p(0), p(1), p(2)]);
        assert_eq!(&pos[3..6], &[p(2), p(1), p(3)]);
        assert_eq!(&pos[6..9], &[p(2), p(3), p(4)]);
    }

    #[test]
    fn short_strip_produces_nothing() {
        let mut batch = FrameBatch::new();
        strip(&mut batch, &[Vec3::ZERO, Vec3::X]);
        assert!(batch.is_empty());
    }

    #[test]
    fn lines_drop_trailing_vertex() {
        let mut batch = FrameBatch::new();
        batch.set_color(Rgba::RED);
        batch.begin_primitive(Primitive::Lines);
        batch.emit_vertex(Vec3::ZERO);
        batch.emit_vertex(Vec3::X);
        batch.emit_vertex(Vec3::Y);
        batch.end_primitive();
        assert_eq!(batch.line_count(), 1);
        assert!(batch.lines.iter().all(|v| v.color == Rgba::RED.0));
    }

    #[test]
    fn lighting_routes_triangles() {
        let mut batch = FrameBatch::new();
        batch.set_lighting(true);
        batch.set_material(&Material {
            shininess: 10.0,
            ..Material::default()
        });
        batch.begin_primitive(Primitive::Triangles);
        batch.set_normal(Vec3::Y);
        for p in [Vec3::ZERO, Vec3::X, Vec3::Z] {
            batch.emit_vertex(p);
        }
        batch.end_primitive();

        assert_eq!(batch.lit_triangles.len(), 3);
        assert!(batch.unlit_triangles.is_empty());
        assert_eq!(batch.lit_triangles[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(batch.lit_triangles[0].material.shininess, 10.0);
    }

    #[test]
    fn transform_stack_applies_and_restores() {
        let mut batch = FrameBatch::new();
        batch.push_transform(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        batch.push_transform(Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2));
        batch.begin_primitive(Primitive::Lines);
        batch.emit_vertex(Vec3::ZERO);
        batch.emit_vertex(Vec3::X);
        batch.end_primitive();
        batch.pop_transform();
        batch.pop_transform();
        batch.begin_primitive(Primitive::Lines);
        batch.emit_vertex(Vec3::ZERO);
        batch.emit_vertex(Vec3::X);
        batch.end_primitive();

        let a = Vec3::from(batch.lines[1].position);
        assert!((a - Vec3::new(1.0, 2.0, 2.0)).length() < 1e-5);
        assert_eq!(batch.lines[2].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn normals_follow_rotation_not_translation() {
        let mut batch = FrameBatch::new();
        batch.set_lighting(true);
        batch.push_transform(
            Mat4::from_translation(Vec3::splat(5.0)) * Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2),
        );
        batch.begin_primitive(Primitive::Triangles);
        batch.set_normal(Vec3::X);
        for p in [Vec3::ZERO, Vec3::X, Vec3::Y] {
            batch.emit_vertex(p);
        }
        batch.end_primitive();
        let n = Vec3::from(batch.lit_triangles[0].normal);
        assert!((n - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn misuse_is_ignored() {
        let mut batch = FrameBatch::new();
        batch.emit_vertex(Vec3::X);
        batch.end_primitive();
        batch.pop_transform();
        assert!(batch.is_empty());

        batch.begin_primitive(Primitive::Lines);
        batch.emit_vertex(Vec3::X);
        batch.begin_primitive(Primitive::Lines);
        batch.emit_vertex(Vec3::ZERO);
        batch.emit_vertex(Vec3::Y);
        batch.end_primitive();
        assert_eq!(batch.line_count(), 1);
        assert_eq!(batch.lines[0].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn clear_resets_geometry() {
        let mut batch = FrameBatch::new();
        strip(&mut batch, &[Vec3::ZERO, Vec3::X, Vec3::Y]);
        batch.clear(Rgba::BLUE);
        assert!(batch.is_empty());
        assert_eq!(batch.clear_color, Rgba::BLUE);
    }
}
