//! Pointer and keyboard events fed into a session.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are in board coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        position: Point,
        /// Whether any button is held during the move.
        #[serde(default)]
        buttons_held: bool,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => *position,
        }
    }
}

/// Keyboard event type. Keys use DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    /// True for a press of Delete or Backspace.
    pub fn is_delete(&self) -> bool {
        matches!(self, KeyEvent::Pressed(key) if key == "Delete" || key == "Backspace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_keys() {
        assert!(KeyEvent::Pressed("Delete".to_string()).is_delete());
        assert!(KeyEvent::Pressed("Backspace".to_string()).is_delete());
        assert!(!KeyEvent::Released("Delete".to_string()).is_delete());
        assert!(!KeyEvent::Pressed("d".to_string()).is_delete());
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"kind":"move","position":{"x":1,"y":2},"buttons_held":true}"#)
                .unwrap();
        assert_eq!(
            event,
            PointerEvent::Move {
                position: Point::new(1.0, 2.0),
                buttons_held: true
            }
        );
        assert_eq!(event.position(), Point::new(1.0, 2.0));

        let down: PointerEvent =
            serde_json::from_str(r#"{"kind":"down","position":{"x":0,"y":0}}"#).unwrap();
        assert!(matches!(down, PointerEvent::Down { button: MouseButton::Left, .. }));
    }
}
