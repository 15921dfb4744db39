//! AT set-1 keyboard scan codes understood by the widgets.
//!
//! A release is the press code with bit 7 set; [`KeyEvent::from_raw`]
//! splits the two apart so widgets only compare the key itself.
//!
//! [`KeyEvent::from_raw`]: super::core::KeyEvent::from_raw

/// Seven-bit key code with the phase bit stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanCode(pub u8);

impl ScanCode {
    pub const ENTER: Self = Self(0x1C);
    /// Carriage return on the alternate keypad
    pub const ENTER_ALT: Self = Self(0x2C);
    pub const DELETE: Self = Self(0x53);
    pub const BACKSPACE: Self = Self(0x0E);
    pub const TAB: Self = Self(0x0F);
    pub const HOME: Self = Self(0x47);
    pub const END: Self = Self(0x4F);
    pub const PAGE_UP: Self = Self(0x49);
    pub const PAGE_DOWN: Self = Self(0x51);
    pub const UP: Self = Self(0x48);
    pub const DOWN: Self = Self(0x50);
    pub const LEFT: Self = Self(0x4B);
    pub const RIGHT: Self = Self(0x4D);
    pub const SPACE: Self = Self(0x39);

    /// Raw byte sent when the key goes down
    pub const fn pressed(self) -> u8 {
        self.0
    }

    /// Raw byte sent when the key comes up
    pub const fn released(self) -> u8 {
        self.0 | 0x80
    }
}
