use glam::Vec3;

/// A high-level action produced from keyboard input.
///
/// The application applies actions to scene state; it never inspects raw keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Translate the camera by a delta.
    MoveCamera(Vec3),
    /// Translate the object by a delta.
    MoveObject(Vec3),
    /// Close the window and leave the event loop.
    Quit,
    /// Movement keys were pressed this frame but opposite keys cancelled out.
    Noop,
}
