//! Widget state, split into persistent properties and transient draw requests.

/// Logical state that persists across frames.
///
/// Not every flag is meaningful for every variant: `pressed` doubles as
/// "checked" on radio buttons, `toggle` only applies to buttons, and so on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Properties {
    pub focused: bool,
    pub disabled: bool,
    /// Pressed for buttons, checked for radio buttons
    pub pressed: bool,
    pub toggle: bool,
    pub group_leader: bool,
    pub single_select: bool,
    pub caret_always_on: bool,
    pub no_panel: bool,
    pub two_tone: bool,
}

/// Pending redraw work.
///
/// A draw pass takes the pending set when it starts, so requests raised
/// while it is suspended wait for the next pass. `hide` wins over
/// everything else; draw routines test it first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawRequests {
    pub full: bool,
    pub focus: bool,
    pub items: bool,
    pub caret: bool,
    pub check: bool,
    pub hide: bool,
}

impl DrawRequests {
    /// Everything a freshly created widget needs
    pub const FULL: Self = Self {
        full: true,
        focus: false,
        items: false,
        caret: false,
        check: false,
        hide: false,
    };

    pub fn any(&self) -> bool {
        self.full || self.focus || self.items || self.caret || self.check || self.hide
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Add every flag set in `other`.
    pub fn merge(&mut self, other: DrawRequests) {
        self.full |= other.full;
        self.focus |= other.focus;
        self.items |= other.items;
        self.caret |= other.caret;
        self.check |= other.check;
        self.hide |= other.hide;
    }
}
