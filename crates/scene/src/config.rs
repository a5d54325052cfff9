use glam::Vec3;
use litscene_common::Rgba;
use serde::{Deserialize, Serialize};

use crate::{Camera, Light, SceneObject};

/// Initial values for the demo scene and its window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
    pub camera_position: Vec3,
    pub object_position: Vec3,
    pub object_radius: f32,
    pub light_position: Vec3,
    /// Per-frame displacement for both camera and object.
    pub move_speed: f32,
    pub clear_color: Rgba,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            window_title: "litscene".into(),
            camera_position: Vec3::new(0.0, 2.0, 6.0),
            object_position: Vec3::new(-2.0, 1.0, 1.0),
            object_radius: 1.0,
            light_position: Vec3::new(0.0, 8.0, 0.0),
            move_speed: 0.1,
            clear_color: Rgba::rgb(0.05, 0.05, 0.05),
        }
    }
}

/// Everything drawn in one frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub object: SceneObject,
    pub light: Light,
    pub clear_color: Rgba,
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut camera = Camera::new(config.camera_position, config.move_speed);
        camera.set_aspect(config.window_width, config.window_height);
        let scene = Self {
            camera,
            object: SceneObject::new(config.object_position, config.object_radius, config.move_speed),
            light: Light::new(config.light_position),
            clear_color: config.clear_color,
        };
        tracing::debug!(
            camera = ?scene.camera.position,
            object = ?scene.object.position,
            light = ?scene.light.position,
            "scene created"
        );
        scene
    }

    /// One-line position report for camera, object and light.
    pub fn describe_positions(&self) -> String {
        let c = self.camera.position;
        let o = self.object.position;
        let l = self.light.position;
        format!(
            "camera=({:.2}, {:.2}, {:.2}) object=({:.2}, {:.2}, {:.2}) light=({:.2}, {:.2}, {:.2})",
            c.x, c.y, c.z, o.x, o.y, o.z, l.x, l.y, l.z
        )
    }
}
