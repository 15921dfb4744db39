//! Widget variants and the uniform contract they share.
//!
//! Every variant carries a [`Header`] and implements [`Control`]:
//!
//! - `translate` maps a raw [`Message`] to a semantic [`Action`] without
//!   touching state. Disabled widgets always yield `None`.
//! - `apply` performs the state change for an action and records which
//!   parts of the widget need redrawing.
//! - `draw` is a resumable state machine. Each stage first asks the
//!   driver whether it is [`Gfx::ready`]; if not, it returns
//!   [`DrawStatus::Incomplete`] and resumes at the same stage next time.
//!   The start stage takes the pending [`DrawRequests`]; anything requested
//!   after that is left for the next pass.
//! - `free` releases auxiliary storage (list items, text buffers).
//!
//! [`Widget`] wraps the variants in an enum so heterogeneous widgets can be
//! stored in one list; `Control::draw` is generic over the driver and would
//! not be object safe behind `dyn`.

mod button;
mod list_box;
mod radio_button;
mod text_entry;

use alloc::rc::Rc;

pub use button::Button;
pub use list_box::{ItemHandle, ItemStatus, ListBox, ListItem};
pub use radio_button::RadioButton;
pub use text_entry::TextEntry;

use crate::gfx::{DrawStatus, Gfx, LineStyle};
use crate::ui::core::{Action, BoundingBox, Message, WidgetId, WidgetKind};
use crate::ui::state::{DrawRequests, Properties};
use crate::ui::styling::StyleScheme;

/// Maximum label length for buttons and radio buttons, in bytes
pub const LABEL_CAPACITY: usize = 32;

/// Fixed-capacity label text
pub type Label = heapless::String<LABEL_CAPACITY>;

/// Copy `text` into a [`Label`], cutting at the last character that fits.
pub(crate) fn make_label(text: &str) -> Label {
    let mut label = Label::new();
    for ch in text.chars() {
        if label.push(ch).is_err() {
            log::debug!("Label truncated to {} bytes", label.len());
            break;
        }
    }
    label
}

// ============================================================================
// Header
// ============================================================================

/// Fields common to every widget
#[derive(Clone)]
pub struct Header {
    pub id: WidgetId,
    pub bounds: BoundingBox,
    pub properties: Properties,
    pub requests: DrawRequests,
    pub scheme: Rc<StyleScheme>,
    /// Requests taken by the draw pass in progress
    pass: Option<DrawRequests>,
}

impl Header {
    /// New header with a full redraw pending
    pub fn new(id: WidgetId, bounds: BoundingBox, scheme: Rc<StyleScheme>) -> Self {
        Self {
            id,
            bounds,
            properties: Properties::default(),
            requests: DrawRequests::FULL,
            scheme,
            pass: None,
        }
    }

    /// Move the pending requests into the pass that is starting.
    ///
    /// A pass restarted after a driver error keeps what it had already taken.
    pub(crate) fn begin_pass(&mut self) -> DrawRequests {
        let mut requests = self.pass.unwrap_or_default();
        requests.merge(core::mem::take(&mut self.requests));
        self.pass = Some(requests);
        requests
    }

    /// Requests the pass in progress started with
    pub(crate) fn pass_requests(&self) -> DrawRequests {
        self.pass.unwrap_or_default()
    }

    pub(crate) fn end_pass(&mut self) -> DrawStatus {
        self.pass = None;
        DrawStatus::Complete
    }

    /// Whether a draw pass has started and not yet completed
    pub fn is_drawing(&self) -> bool {
        self.pass.is_some()
    }
}

/// Fill the widget's bounds with the scheme background.
pub(crate) fn erase<G: Gfx>(gfx: &mut G, header: &Header) -> Result<(), G::Error> {
    gfx.set_line_style(LineStyle::Solid);
    gfx.set_color(header.scheme.common_background_color);
    gfx.fill_rectangle(header.bounds.to_rectangle())
}

// ============================================================================
// Control contract
// ============================================================================

/// Operations every widget variant provides
pub trait Control {
    fn header(&self) -> &Header;
    fn header_mut(&mut self) -> &mut Header;

    /// Map `message` to an action. Must not mutate state.
    fn translate(&self, message: &Message) -> Option<Action>;

    /// Perform the state change for `action`.
    fn apply(&mut self, action: Action, message: &Message);

    /// Advance the draw state machine as far as the driver allows.
    fn draw<G: Gfx>(&mut self, gfx: &mut G) -> Result<DrawStatus, G::Error>;

    /// Release auxiliary storage ahead of removal.
    fn free(&mut self) {}

    /// Whether the widget may currently hold keyboard focus
    fn can_focus(&self) -> bool {
        !self.header().properties.disabled
    }

    fn id(&self) -> WidgetId {
        self.header().id
    }

    fn bounds(&self) -> BoundingBox {
        self.header().bounds
    }

    fn properties(&self) -> &Properties {
        &self.header().properties
    }

    fn requests(&self) -> &DrawRequests {
        &self.header().requests
    }

    /// Whether [`draw`](Self::draw) has work to do: pending requests or a
    /// suspended pass.
    fn needs_draw(&self) -> bool {
        let header = self.header();
        header.requests.any() || header.is_drawing()
    }
}

// ============================================================================
// Widget enum
// ============================================================================

/// Any widget the list can hold
pub enum Widget {
    Button(Button),
    RadioButton(RadioButton),
    ListBox(ListBox),
    TextEntry(TextEntry),
}

macro_rules! dispatch {
    ($self:expr, $w:ident => $body:expr) => {
        match $self {
            Widget::Button($w) => $body,
            Widget::RadioButton($w) => $body,
            Widget::ListBox($w) => $body,
            Widget::TextEntry($w) => $body,
        }
    };
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Button(_) => WidgetKind::Button,
            Self::RadioButton(_) => WidgetKind::RadioButton,
            Self::ListBox(_) => WidgetKind::ListBox,
            Self::TextEntry(_) => WidgetKind::TextEntry,
        }
    }
}

impl Control for Widget {
    fn header(&self) -> &Header {
        dispatch!(self, w => w.header())
    }

    fn header_mut(&mut self) -> &mut Header {
        dispatch!(self, w => w.header_mut())
    }

    fn translate(&self, message: &Message) -> Option<Action> {
        dispatch!(self, w => w.translate(message))
    }

    fn apply(&mut self, action: Action, message: &Message) {
        dispatch!(self, w => w.apply(action, message))
    }

    fn draw<G: Gfx>(&mut self, gfx: &mut G) -> Result<DrawStatus, G::Error> {
        dispatch!(self, w => w.draw(gfx))
    }

    fn free(&mut self) {
        dispatch!(self, w => w.free())
    }

    fn can_focus(&self) -> bool {
        dispatch!(self, w => w.can_focus())
    }
}

impl From<Button> for Widget {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<RadioButton> for Widget {
    fn from(radio: RadioButton) -> Self {
        Self::RadioButton(radio)
    }
}

impl From<ListBox> for Widget {
    fn from(list: ListBox) -> Self {
        Self::ListBox(list)
    }
}

impl From<TextEntry> for Widget {
    fn from(entry: TextEntry) -> Self {
        Self::TextEntry(entry)
    }
}
