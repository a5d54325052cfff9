use glam::{Mat4, Vec3};
use litscene_common::{Material, Rgba};
use litscene_scene::Light;

use crate::backend::{DrawBackend, Primitive};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    SetViewProjection(Mat4),
    SetEye(Vec3),
    PushTransform(Mat4),
    PopTransform,
    SetLighting(bool),
    SetLight(Light),
    SetMaterial(Material),
    SetColor(Rgba),
    SetLineWidth(f32),
    Begin(Primitive),
    Normal(Vec3),
    Vertex(Vec3),
    End,
}

/// Debug backend that records every call instead of drawing.
///
/// Useful for tests, CLI output and checking what a renderer submits without
/// a GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    lighting: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// `(position, normal)` pairs of every triangle strip, in submission
    /// order. Each vertex carries the normal most recently set before it.
    pub fn strips(&self) -> Vec<Vec<(Vec3, Vec3)>> {
        let mut strips = Vec::new();
        let mut current: Option<Vec<(Vec3, Vec3)>> = None;
        let mut normal = Vec3::Z;

        for command in &self.commands {
            match command {
                DrawCommand::Begin(Primitive::TriangleStrip) => current = Some(Vec::new()),
                DrawCommand::Begin(_) => current = None,
                DrawCommand::Normal(n) => normal = *n,
                DrawCommand::Vertex(p) => {
                    if let Some(strip) = current.as_mut() {
                        strip.push((*p, normal));
                    }
                }
                DrawCommand::End => {
                    if let Some(strip) = current.take() {
                        strips.push(strip);
                    }
                }
                _ => {}
            }
        }
        strips
    }

    /// Number of primitives of the given kind that were opened.
    pub fn primitive_count(&self, primitive: Primitive) -> usize {
        self.commands
            .iter()
            .filter(|c| **c == DrawCommand::Begin(primitive))
            .count()
    }

    pub fn vertex_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Vertex(_)))
            .count()
    }

    /// Human-readable frame summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Recorded frame ({} commands) ===\n", self.commands.len()));
        out.push_str(&format!(
            "Primitives: lines={} triangles={} strips={}\n",
            self.primitive_count(Primitive::Lines),
            self.primitive_count(Primitive::Triangles),
            self.primitive_count(Primitive::TriangleStrip)
        ));
        out.push_str(&format!("Vertices: {}\n", self.vertex_count()));

        for command in &self.commands {
            match command {
                DrawCommand::Clear(c) => out.push_str(&format!(
                    "  clear ({:.2}, {:.2}, {:.2})\n",
                    c.r(),
                    c.g(),
                    c.b()
                )),
                DrawCommand::SetEye(e) => {
                    out.push_str(&format!("  eye ({:.2}, {:.2}, {:.2})\n", e.x, e.y, e.z))
                }
                DrawCommand::SetLight(l) => out.push_str(&format!(
                    "  light at ({:.2}, {:.2}, {:.2})\n",
                    l.position.x, l.position.y, l.position.z
                )),
                DrawCommand::SetMaterial(m) => {
                    out.push_str(&format!("  material shininess={:.0}\n", m.shininess))
                }
                DrawCommand::SetLighting(on) => out.push_str(&format!("  lighting {on}\n")),
                _ => {}
            }
        }
        out
    }
}

impl DrawBackend for RecordingBackend {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_view_projection(&mut self, view_projection: Mat4) {
        self.commands.push(DrawCommand::SetViewProjection(view_projection));
    }

    fn set_eye(&mut self, eye: Vec3) {
        self.commands.push(DrawCommand::SetEye(eye));
    }

    fn push_transform(&mut self, transform: Mat4) {
        self.commands.push(DrawCommand::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.lighting = enabled;
        self.commands.push(DrawCommand::SetLighting(enabled));
    }

    fn lighting_enabled(&self) -> bool {
        self.lighting
    }

    fn set_light(&mut self, light: &Light) {
        self.commands.push(DrawCommand::SetLight(*light));
    }

    fn set_material(&mut self, material: &Material) {
        self.commands.push(DrawCommand::SetMaterial(*material));
    }

    fn set_color(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn begin_primitive(&mut self, primitive: Primitive) {
        self.commands.push(DrawCommand::Begin(primitive));
    }

    fn set_normal(&mut self, normal: Vec3) {
        self.commands.push(DrawCommand::Normal(normal));
    }

    fn emit_vertex(&mut self, position: Vec3) {
        self.commands.push(DrawCommand::Vertex(position));
    }

    fn end_primitive(&mut self) {
        self.commands.push(DrawCommand::End);
    }
}
