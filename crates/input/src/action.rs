/// A driving control that can be held down.
///
/// Keyboard keys and on-screen touch buttons both map onto these, so every
/// input source drives the vehicle the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveAction {
    Throttle,
    Reverse,
    SteerLeft,
    SteerRight,
}

impl DriveAction {
    /// Binding for a DOM-style key name (`"w"`, `"ArrowUp"`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" | "ArrowUp" => Some(Self::Throttle),
            "s" | "S" | "ArrowDown" => Some(Self::Reverse),
            "a" | "A" | "ArrowLeft" => Some(Self::SteerLeft),
            "d" | "D" | "ArrowRight" => Some(Self::SteerRight),
            _ => None,
        }
    }
}

/// Snapshot of held controls for one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveInput {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
}

impl DriveInput {
    /// +1 steering left, -1 right, 0 for neither or both.
    pub fn steer(&self) -> f32 {
        (self.left as i8 - self.right as i8) as f32
    }
}

/// Held-control state updated from press/release events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: DriveInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: DriveAction, pressed: bool) {
        let slot = match action {
            DriveAction::Throttle => &mut self.held.forward,
            DriveAction::Reverse => &mut self.held.reverse,
            DriveAction::SteerLeft => &mut self.held.left,
            DriveAction::SteerRight => &mut self.held.right,
        };
        *slot = pressed;
    }

    /// Apply a key event; unbound keys are ignored. Returns whether the key
    /// was bound.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match DriveAction::from_key(key) {
            Some(action) => {
                self.set(action, pressed);
                true
            }
            None => {
                tracing::trace!(key, "unbound key");
                false
            }
        }
    }

    pub fn release_all(&mut self) {
        self.held = DriveInput::default();
    }

    pub fn current(&self) -> DriveInput {
        self.held
    }
}
