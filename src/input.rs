//! Input adapter
//!
//! Host event handlers write here whenever the browser delivers an event;
//! the engine reads a `TickInput` snapshot once at the start of each tick.
//! Direction is continuous (held keys or held touch buttons), jump is a
//! queued one-shot that the snapshot consumes.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;
use crate::sim::TickInput;

/// Keys that move left
pub const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "a"];
/// Keys that move right
pub const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "d"];
/// Keys whose key-down triggers a jump
pub const JUMP_KEYS: [&str; 3] = [" ", "w", "ArrowUp"];

pub fn is_jump_key(key: &str) -> bool {
    JUMP_KEYS.contains(&key)
}

/// Touch gesture from the on-screen controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileAction {
    LeftStart,
    LeftEnd,
    RightStart,
    RightEnd,
    Jump,
}

impl MobileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MobileAction::LeftStart => "left-start",
            MobileAction::LeftEnd => "left-end",
            MobileAction::RightStart => "right-start",
            MobileAction::RightEnd => "right-end",
            MobileAction::Jump => "jump",
        }
    }
}

impl FromStr for MobileAction {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left-start" => Ok(MobileAction::LeftStart),
            "left-end" => Ok(MobileAction::LeftEnd),
            "right-start" => Ok(MobileAction::RightStart),
            "right-end" => Ok(MobileAction::RightEnd),
            "jump" => Ok(MobileAction::Jump),
            other => Err(InputError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for MobileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw input as delivered by the host
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held_keys: HashSet<String>,
    mobile_left: bool,
    mobile_right: bool,
    jump_queued: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held_keys.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held_keys.remove(key);
    }

    /// Update held touch buttons. `Jump` is not a held state and is ignored
    /// here; route it through `queue_jump`.
    pub fn apply_mobile(&mut self, action: MobileAction) {
        match action {
            MobileAction::LeftStart => self.mobile_left = true,
            MobileAction::LeftEnd => self.mobile_left = false,
            MobileAction::RightStart => self.mobile_right = true,
            MobileAction::RightEnd => self.mobile_right = false,
            MobileAction::Jump => {}
        }
    }

    pub fn queue_jump(&mut self) {
        self.jump_queued = true;
    }

    pub fn left_held(&self) -> bool {
        self.mobile_left || LEFT_KEYS.iter().any(|k| self.held_keys.contains(*k))
    }

    pub fn right_held(&self) -> bool {
        self.mobile_right || RIGHT_KEYS.iter().any(|k| self.held_keys.contains(*k))
    }

    /// Capture the input for one tick, consuming any queued jump
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            left: self.left_held(),
            right: self.right_held(),
            jump: std::mem::take(&mut self.jump_queued),
        }
    }

    /// Forget everything (held keys, touch buttons, queued jump)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mobile_actions() {
        for action in [
            MobileAction::LeftStart,
            MobileAction::LeftEnd,
            MobileAction::RightStart,
            MobileAction::RightEnd,
            MobileAction::Jump,
        ] {
            assert_eq!(action.as_str().parse::<MobileAction>(), Ok(action));
        }
        assert_eq!(
            "up-start".parse::<MobileAction>(),
            Err(InputError::UnknownAction("up-start".to_string()))
        );
    }

    #[test]
    fn test_keyboard_direction() {
        let mut input = InputState::new();
        assert_eq!(input.snapshot(), TickInput::default());

        input.key_down("a");
        input.key_down("ArrowRight");
        let snap = input.snapshot();
        assert!(snap.left && snap.right);

        input.key_up("a");
        let snap = input.snapshot();
        assert!(!snap.left && snap.right);

        // Uppercase is a different key
        input.key_down("D");
        input.key_up("ArrowRight");
        assert!(!input.snapshot().right);
    }

    #[test]
    fn test_mobile_direction() {
        let mut input = InputState::new();
        input.apply_mobile(MobileAction::LeftStart);
        assert!(input.snapshot().left);
        input.apply_mobile(MobileAction::LeftEnd);
        input.apply_mobile(MobileAction::RightStart);
        let snap = input.snapshot();
        assert!(!snap.left && snap.right);
        input.apply_mobile(MobileAction::RightEnd);
        assert!(!input.snapshot().right);
    }

    #[test]
    fn test_jump_is_one_shot() {
        let mut input = InputState::new();
        input.queue_jump();
        input.queue_jump();
        assert!(input.snapshot().jump);
        assert!(!input.snapshot().jump);
    }

    #[test]
    fn test_jump_keys() {
        assert!(is_jump_key(" "));
        assert!(is_jump_key("w"));
        assert!(is_jump_key("ArrowUp"));
        assert!(!is_jump_key("s"));
    }
}
