//! Keyboard input handling

use crate::sim::TickInput;

/// Which arrow keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Update from a browser `KeyboardEvent.key` value.
    /// Returns true if the key is one we track.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowLeft" | "Left" => self.left = pressed,
            "ArrowRight" | "Right" => self.right = pressed,
            _ => return false,
        }
        true
    }

    /// Drop all held keys (focus lost, keyup never arrives)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next simulation tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        let mut keys = KeyState::default();
        assert!(keys.handle_key("ArrowLeft", true));
        assert!(keys.left);
        assert!(keys.handle_key("ArrowRight", true));
        assert_eq!(keys.tick_input(), TickInput { left: true, right: true });

        assert!(keys.handle_key("ArrowLeft", false));
        assert_eq!(keys.tick_input(), TickInput { left: false, right: true });
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut keys = KeyState::default();
        assert!(!keys.handle_key("ArrowUp", true));
        assert!(!keys.handle_key(" ", true));
        assert_eq!(keys, KeyState::default());
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyState {
            left: true,
            right: true,
        };
        keys.release_all();
        assert_eq!(keys.tick_input(), TickInput::default());
    }
}
