//! Core types shared by every widget: identity, geometry, input messages
//! and the semantic actions input is translated into.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::scan_codes::ScanCode;

/// Caller-assigned widget identifier.
///
/// Uniqueness is the caller's responsibility; the list only logs duplicates.
pub type WidgetId = u16;

// ============================================================================
// Geometry
// ============================================================================

/// Widget bounds as inclusive screen coordinates.
///
/// Callers must keep `left < right` and `top < bottom`; this is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Hit test used for pointer messages. Points on the border are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.left < x && x < self.right && self.top < y && y < self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    /// Shrink on all four sides; collapses to the center instead of inverting.
    pub fn inset(&self, amount: i32) -> Self {
        let amount = amount
            .min((self.right - self.left) / 2)
            .min((self.bottom - self.top) / 2)
            .max(0);
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::with_corners(
            Point::new(self.left, self.top),
            Point::new(self.right, self.bottom),
        )
    }
}

impl From<Rectangle> for BoundingBox {
    fn from(rect: Rectangle) -> Self {
        let bottom_right = rect.bottom_right().unwrap_or(rect.top_left);
        Self::new(
            rect.top_left.x,
            rect.top_left.y,
            bottom_right.x,
            bottom_right.y,
        )
    }
}

// ============================================================================
// Input messages
// ============================================================================

/// Phase of a pointer/touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Press,
    Release,
    StillPress,
    Move,
}

/// Whether a key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Pressed,
    Released,
}

/// Keyboard payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Raw scan code with its phase
    Scan { code: ScanCode, phase: KeyPhase },
    /// A printable character already decoded by the input subsystem
    Char(char),
}

impl KeyEvent {
    /// Decode an AT set-1 byte, where bit 7 marks a release.
    pub fn from_raw(raw: u8) -> Self {
        let phase = if raw & 0x80 != 0 {
            KeyPhase::Released
        } else {
            KeyPhase::Pressed
        };
        Self::Scan {
            code: ScanCode(raw & 0x7F),
            phase,
        }
    }

    pub fn pressed(code: ScanCode) -> Self {
        Self::Scan {
            code,
            phase: KeyPhase::Pressed,
        }
    }

    pub fn released(code: ScanCode) -> Self {
        Self::Scan {
            code,
            phase: KeyPhase::Released,
        }
    }

    /// The phase of a space or enter key (either enter code), if this is one.
    pub(crate) fn activation(&self) -> Option<KeyPhase> {
        match *self {
            Self::Scan { code, phase }
                if matches!(code, ScanCode::SPACE | ScanCode::ENTER | ScanCode::ENTER_ALT) =>
            {
                Some(phase)
            }
            _ => None,
        }
    }
}

/// A raw input message as produced by the input subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Pointer { x: i32, y: i32, phase: TouchPhase },
    Key { target: WidgetId, event: KeyEvent },
}

impl Message {
    pub fn press(x: i32, y: i32) -> Self {
        Self::Pointer {
            x,
            y,
            phase: TouchPhase::Press,
        }
    }

    pub fn release(x: i32, y: i32) -> Self {
        Self::Pointer {
            x,
            y,
            phase: TouchPhase::Release,
        }
    }

    pub fn key(target: WidgetId, event: KeyEvent) -> Self {
        Self::Key { target, event }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer { .. })
    }
}

// ============================================================================
// Actions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Pressed,
    /// Pointer held down on an already pressed button
    StillPressed,
    Released,
    /// Pointer dragged off a pressed button
    CancelPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioAction {
    Checked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMove {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Touchscreen,
    Move(ListMove),
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    Touchscreen,
    AddChar(char),
    DelChar,
}

/// Semantic, widget-specific interpretation of a raw message.
///
/// Translation returns `Option<Action>`; `None` is the "invalid" outcome
/// and callers take no action for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Button(ButtonAction),
    Radio(RadioAction),
    List(ListAction),
    Text(TextAction),
}

/// Widget variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Button,
    RadioButton,
    ListBox,
    TextEntry,
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::RadioButton => "radio button",
            Self::ListBox => "list box",
            Self::TextEntry => "text entry",
        }
    }
}
