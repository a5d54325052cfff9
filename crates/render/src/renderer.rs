use glam::{Mat4, Vec3};
use litscene_common::Rgba;
use litscene_scene::{Light, Scene, SceneObject};

use crate::backend::{DrawBackend, Primitive};
use crate::mesh::{MeshError, SphereMesh};

pub const DEFAULT_GRID_SIZE: f32 = 10.0;
pub const DEFAULT_GRID_DIVISIONS: u32 = 20;
pub const DEFAULT_AXIS_LENGTH: f32 = 10.0;

const AXIS_LINE_WIDTH: f32 = 2.0;
const LABEL_OFFSET: f32 = 0.2;

/// Draws the demo scene through a [`DrawBackend`].
///
/// Owns the sphere tessellation cache, so one renderer should live as long as
/// the window it draws into. Pass it by `&mut` to whatever draws spheres.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    sphere: SphereMesh,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sphere_mesh(&self) -> &SphereMesh {
        &self.sphere
    }

    /// Grey line grid in the y = 0 plane spanning `±grid_size`.
    ///
    /// The centre lines are skipped; the axes are drawn over them.
    pub fn draw_ground_grid(&self, backend: &mut dyn DrawBackend, grid_size: f32, divisions: u32) {
        backend.set_lighting(false);
        if divisions == 0 {
            return;
        }

        let half = (divisions / 2) as i32;
        let step = 2.0 * grid_size / divisions as f32;

        backend.set_color(Rgba::GREY);
        backend.begin_primitive(Primitive::Lines);
        for i in (-half..=half).filter(|i| *i != 0) {
            let offset = i as f32 * step;
            backend.emit_vertex(Vec3::new(offset, 0.0, -grid_size));
            backend.emit_vertex(Vec3::new(offset, 0.0, grid_size));
        }
        for i in (-half..=half).filter(|i| *i != 0) {
            let offset = i as f32 * step;
            backend.emit_vertex(Vec3::new(-grid_size, 0.0, offset));
            backend.emit_vertex(Vec3::new(grid_size, 0.0, offset));
        }
        backend.end_primitive();
    }

    /// X (red), Y (green) and Z (blue) axes with arrow heads and letter glyphs.
    pub fn draw_axes(&self, backend: &mut dyn DrawBackend, length: f32) {
        backend.set_lighting(false);
        backend.set_line_width(AXIS_LINE_WIDTH);

        // (direction, colour, arrow head relative to the tip, glyph segments)
        #[rustfmt::skip]
        let axes: [(Vec3, Rgba, [Vec3; 2], &[[f32; 3]]); 3] = [
            (
                Vec3::X,
                Rgba::RED,
                [Vec3::new(-0.2, 0.1, 0.0), Vec3::new(-0.2, -0.1, 0.0)],
                &[
                    [-0.2, -0.2, 0.0], [0.2, 0.2, 0.0],
                    [-0.2, 0.2, 0.0], [0.2, -0.2, 0.0],
                ],
            ),
            (
                Vec3::Y,
                Rgba::GREEN,
                [Vec3::new(0.1, -0.2, 0.0), Vec3::new(-0.1, -0.2, 0.0)],
                &[
                    [-0.2, 0.2, 0.0], [0.0, 0.0, 0.0],
                    [0.2, 0.2, 0.0], [0.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0], [0.0, -0.2, 0.0],
                ],
            ),
            (
                Vec3::Z,
                Rgba::BLUE,
                [Vec3::new(0.1, 0.1, -0.2), Vec3::new(-0.1, 0.1, -0.2)],
                &[
                    [-0.2, 0.2, 0.0], [0.2, 0.2, 0.0],
                    [0.2, 0.2, 0.0], [-0.2, -0.2, 0.0],
                    [-0.2, -0.2, 0.0], [0.2, -0.2, 0.0],
                ],
            ),
        ];

        for (direction, color, head, glyph) in axes {
            let tip = direction * length;
            backend.set_color(color);

            backend.begin_primitive(Primitive::Lines);
            backend.emit_vertex(Vec3::ZERO);
            backend.emit_vertex(tip);
            backend.end_primitive();

            backend.push_transform(Mat4::from_translation(tip));
            backend.begin_primitive(Primitive::Triangles);
            backend.emit_vertex(Vec3::ZERO);
            backend.emit_vertex(head[0]);
            backend.emit_vertex(head[1]);
            backend.end_primitive();
            backend.pop_transform();

            backend.push_transform(Mat4::from_translation(direction * (length + LABEL_OFFSET)));
            backend.begin_primitive(Primitive::Lines);
            for point in glyph {
                backend.emit_vertex(Vec3::from_array(*point));
            }
            backend.end_primitive();
            backend.pop_transform();
        }

        backend.set_line_width(1.0);
    }

    /// Sphere centred on the current model origin.
    pub fn draw_sphere(
        &mut self,
        backend: &mut dyn DrawBackend,
        radius: f32,
        slices: u32,
        stacks: u32,
    ) -> Result<(), MeshError> {
        self.sphere.emit(backend, radius, slices, stacks)
    }

    /// Single unlit segment. The caller's lighting state is restored afterwards.
    pub fn draw_line(&self, backend: &mut dyn DrawBackend, from: Vec3, to: Vec3, color: Rgba) {
        let lighting = backend.lighting_enabled();
        if lighting {
            backend.set_lighting(false);
        }

        backend.set_color(color);
        backend.begin_primitive(Primitive::Lines);
        backend.emit_vertex(from);
        backend.emit_vertex(to);
        backend.end_primitive();

        if lighting {
            backend.set_lighting(true);
        }
    }

    /// Enable lighting and submit the light's parameters.
    pub fn apply_light(&self, backend: &mut dyn DrawBackend, light: &Light) {
        backend.set_lighting(true);
        backend.set_light(light);
    }

    /// Small unlit sphere at the light position. Leaves lighting enabled.
    pub fn draw_light_marker(
        &mut self,
        backend: &mut dyn DrawBackend,
        light: &Light,
    ) -> Result<(), MeshError> {
        backend.push_transform(Mat4::from_translation(light.position));
        backend.set_lighting(false);
        backend.set_color(Light::MARKER_COLOR);
        let result = self.sphere.emit(
            backend,
            Light::MARKER_RADIUS,
            Light::MARKER_SLICES,
            Light::MARKER_STACKS,
        );
        backend.set_lighting(true);
        backend.pop_transform();
        result
    }

    /// The object's sphere with its material, position and rotation.
    pub fn draw_object(
        &mut self,
        backend: &mut dyn DrawBackend,
        object: &SceneObject,
    ) -> Result<(), MeshError> {
        backend.push_transform(object.model_matrix());
        backend.set_material(&object.material);
        let result = self
            .sphere
            .emit(backend, object.radius, object.slices, object.stacks);
        backend.pop_transform();
        result
    }

    /// Full frame: clear, grid, axes, camera-to-object line, light, object.
    pub fn render_frame(
        &mut self,
        backend: &mut dyn DrawBackend,
        scene: &Scene,
    ) -> Result<(), MeshError> {
        let _span = tracing::info_span!("render_frame").entered();

        backend.clear(scene.clear_color);
        backend.set_view_projection(scene.camera.view_projection());
        backend.set_eye(scene.camera.position);

        backend.set_lighting(false);
        self.draw_ground_grid(backend, DEFAULT_GRID_SIZE, DEFAULT_GRID_DIVISIONS);
        self.draw_axes(backend, DEFAULT_AXIS_LENGTH);
        self.draw_line(
            backend,
            scene.camera.position,
            scene.object.position,
            Rgba::RED,
        );

        self.apply_light(backend, &scene.light);
        self.draw_light_marker(backend, &scene.light)?;
        self.draw_object(backend, &scene.object)?;
        Ok(())
    }
}
