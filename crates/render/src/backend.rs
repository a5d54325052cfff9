use glam::{Mat4, Vec3};
use litscene_common::{Material, Rgba};
use litscene_scene::Light;

/// Primitive topologies understood by a [`DrawBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Independent segments: vertices `(0,1)`, `(2,3)`, ...
    Lines,
    /// Independent triangles: vertices `(0,1,2)`, `(3,4,5)`, ...
    Triangles,
    /// Connected triangles sharing the previous two vertices.
    TriangleStrip,
}

/// Immediate-mode draw sink.
///
/// Callers open a primitive, stream `set_normal`/`emit_vertex` calls and close
/// it again. Everything else is sticky state that applies to subsequent
/// vertices: colour, lighting, material, the model transform stack. The
/// backend owns transformation and rasterisation.
pub trait DrawBackend {
    /// Start a new frame with the given background colour.
    fn clear(&mut self, color: Rgba);

    fn set_view_projection(&mut self, view_projection: Mat4);

    /// World-space eye position, used for specular highlights.
    fn set_eye(&mut self, eye: Vec3);

    /// Multiply `transform` onto the current model matrix, saving the old one.
    fn push_transform(&mut self, transform: Mat4);

    /// Restore the model matrix saved by the matching `push_transform`.
    fn pop_transform(&mut self);

    fn set_lighting(&mut self, enabled: bool);

    fn lighting_enabled(&self) -> bool;

    fn set_light(&mut self, light: &Light);

    fn set_material(&mut self, material: &Material);

    /// Colour for unlit geometry.
    fn set_color(&mut self, color: Rgba);

    fn set_line_width(&mut self, width: f32);

    fn begin_primitive(&mut self, primitive: Primitive);

    /// Normal attached to the next emitted vertex.
    fn set_normal(&mut self, normal: Vec3);

    fn emit_vertex(&mut self, position: Vec3);

    fn end_primitive(&mut self);
}
