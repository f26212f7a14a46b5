//! Input events delivered to the canvas, in device space.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Input the scene reacts to. Positions are in device (canvas) space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Mouse button pressed.
    PointerDown {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    /// Mouse button released.
    PointerUp {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    /// Mouse moved.
    PointerMove { position: Point },
    /// Pointer left the canvas.
    PointerLeave,
    /// Keyboard key pressed while the canvas has focus.
    KeyDown { key: Key },
    /// The canvas was resized.
    Resize { size: Size },
    /// Animation frame callback.
    FrameTick,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keyboard keys (simplified set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
}
