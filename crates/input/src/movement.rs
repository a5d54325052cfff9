use glam::Vec3;

use crate::{Action, InputSnapshot, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Camera,
    Object,
}

struct Binding {
    key: Key,
    target: Target,
    direction: Vec3,
    label: &'static str,
}

// Evaluated in order; the last held binding names the frame's key.
#[rustfmt::skip]
const BINDINGS: [Binding; 10] = [
    Binding { key: Key::A, target: Target::Camera, direction: Vec3::NEG_X, label: "A (-X, left)" },
    Binding { key: Key::D, target: Target::Camera, direction: Vec3::X, label: "D (+X, right)" },
    Binding { key: Key::W, target: Target::Camera, direction: Vec3::NEG_Z, label: "W (-Z, forward)" },
    Binding { key: Key::S, target: Target::Camera, direction: Vec3::Z, label: "S (+Z, backward)" },
    Binding { key: Key::Space, target: Target::Camera, direction: Vec3::Y, label: "Space (+Y, up)" },
    Binding { key: Key::LeftShift, target: Target::Camera, direction: Vec3::NEG_Y, label: "Shift (-Y, down)" },
    Binding { key: Key::J, target: Target::Object, direction: Vec3::NEG_X, label: "J (-X, object left)" },
    Binding { key: Key::L, target: Target::Object, direction: Vec3::X, label: "L (+X, object right)" },
    Binding { key: Key::I, target: Target::Object, direction: Vec3::NEG_Z, label: "I (-Z, object forward)" },
    Binding { key: Key::K, target: Target::Object, direction: Vec3::Z, label: "K (+Z, object backward)" },
];

/// Displacements computed for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameMovement {
    pub camera: Vec3,
    pub object: Vec3,
    /// True when any movement key was held, even if opposite keys cancelled.
    pub moved: bool,
}

impl FrameMovement {
    /// Non-zero displacements as actions, camera first.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.camera != Vec3::ZERO {
            actions.push(Action::MoveCamera(self.camera));
        }
        if self.object != Vec3::ZERO {
            actions.push(Action::MoveObject(self.object));
        }
        if actions.is_empty() && self.moved {
            actions.push(Action::Noop);
        }
        actions
    }
}

/// Turns held keys into per-frame camera and object displacements.
#[derive(Debug)]
pub struct MovementController {
    last_key: &'static str,
}

impl Default for MovementController {
    fn default() -> Self {
        Self { last_key: "None" }
    }
}

impl MovementController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label of the most recently applied binding; `"None"` until a key is held.
    pub fn last_key(&self) -> &'static str {
        self.last_key
    }

    pub fn update(
        &mut self,
        snapshot: &InputSnapshot,
        camera_speed: f32,
        object_speed: f32,
    ) -> FrameMovement {
        let mut movement = FrameMovement::default();

        for binding in BINDINGS.iter().filter(|b| snapshot.is_held(b.key)) {
            match binding.target {
                Target::Camera => movement.camera += binding.direction * camera_speed,
                Target::Object => movement.object += binding.direction * object_speed,
            }
            self.last_key = binding.label;
            movement.moved = true;
        }

        if movement.moved {
            tracing::debug!(
                key = self.last_key,
                camera = ?movement.camera,
                object = ?movement.object,
                "movement"
            );
        }
        movement
    }
}
