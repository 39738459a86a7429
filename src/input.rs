use std::collections::HashSet;

use winit::keyboard::KeyCode;

/// Named controls the simulation reads each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Forward,
        Action::Backward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::TurnLeft,
        Action::TurnRight,
    ];

    pub fn key(self) -> KeyCode {
        match self {
            Action::Forward => KeyCode::KeyW,
            Action::Backward => KeyCode::KeyS,
            Action::StrafeLeft => KeyCode::KeyA,
            Action::StrafeRight => KeyCode::KeyD,
            Action::TurnLeft => KeyCode::ArrowLeft,
            Action::TurnRight => KeyCode::ArrowRight,
        }
    }
}

/// "Is this control held right now?"
pub trait InputState {
    fn is_held(&self, action: Action) -> bool;
}

/// Held-key table, written by the window between frames.
#[derive(Debug, Default, Clone)]
pub struct KeyTable {
    down: HashSet<KeyCode>,
}

impl KeyTable {
    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    /// Drops every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }
}

impl InputState for KeyTable {
    fn is_held(&self, action: Action) -> bool {
        self.is_down(action.key())
    }
}

/// Fixed set of held actions, handy for scripted input.
impl InputState for HashSet<Action> {
    fn is_held(&self, action: Action) -> bool {
        self.contains(&action)
    }
}
