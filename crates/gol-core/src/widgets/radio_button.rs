//! Radio button, a member of a mutually exclusive group.
//!
//! Group membership is stored as two handles: the group head (the leader)
//! and the next member. Both are maintained by [`WidgetList`], which is
//! also where check-by-id and the "only one checked" walk live, since they
//! need access to the other members.
//!
//! [`WidgetList`]: crate::list::WidgetList

use alloc::rc::Rc;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use super::{Control, Header, Label, erase, make_label};
use crate::gfx::{DrawStatus, Gfx, LineStyle, TextAlignment};
use crate::list::WidgetHandle;
use crate::ui::core::{Action, BoundingBox, KeyPhase, Message, RadioAction, TouchPhase, WidgetId};
use crate::ui::styling::{FillStyle, StyleScheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Panel,
    Dot,
    Text,
    Check,
    Focus,
}

/// Dot geometry derived from the bounding box
struct Dot {
    center: Point,
    radius: u32,
}

pub struct RadioButton {
    header: Header,
    text: Option<Label>,
    text_height: i32,
    pub(crate) group_head: Option<WidgetHandle>,
    pub(crate) next_in_group: Option<WidgetHandle>,
    stage: Stage,
}

impl RadioButton {
    pub fn new(id: WidgetId, bounds: BoundingBox, scheme: Rc<StyleScheme>) -> Self {
        let text_height = scheme.text_height();
        Self {
            header: Header::new(id, bounds, scheme),
            text: None,
            text_height,
            group_head: None,
            next_in_group: None,
            stage: Stage::Start,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(Some(text));
        self
    }

    /// Start a new group with this button as its head
    pub fn group_leader(mut self) -> Self {
        self.header.properties.group_leader = true;
        self
    }

    pub fn checked(mut self) -> Self {
        self.header.properties.pressed = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.header.properties.disabled = true;
        self
    }

    pub fn focused(mut self) -> Self {
        self.header.properties.focused = true;
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<&str>) {
        self.text = text.map(make_label);
        self.text_height = self.header.scheme.text_height();
        self.header.requests.full = true;
    }

    pub fn text_height(&self) -> i32 {
        self.text_height
    }

    pub fn is_checked(&self) -> bool {
        self.header.properties.pressed
    }

    pub fn is_group_leader(&self) -> bool {
        self.header.properties.group_leader
    }

    /// Head of the group this button belongs to
    pub fn group_head(&self) -> Option<WidgetHandle> {
        self.group_head
    }

    pub fn next_in_group(&self) -> Option<WidgetHandle> {
        self.next_in_group
    }

    /// Set or clear the checked state, requesting a check-mark redraw.
    pub(crate) fn set_checked(&mut self, checked: bool) {
        self.header.properties.pressed = checked;
        self.header.requests.check = true;
    }

    fn dot(&self) -> Dot {
        let b = self.header.bounds;
        let h = b.bottom - b.top;
        Dot {
            center: Point::new(b.left + h / 2 + 2, (b.top + b.bottom) / 2),
            radius: (h / 2 - 2).max(1) as u32,
        }
    }

    fn face_color(&self) -> Rgb565 {
        let scheme = &self.header.scheme;
        if self.header.properties.disabled {
            scheme.color_disabled
        } else {
            scheme.color0
        }
    }
}

impl Control for RadioButton {
    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    fn translate(&self, message: &Message) -> Option<Action> {
        let props = &self.header.properties;
        // A checked member only unchecks when another member becomes checked
        if props.disabled || props.pressed {
            return None;
        }

        let checked = match *message {
            Message::Pointer {
                x,
                y,
                phase: TouchPhase::Press,
            } => self.header.bounds.contains(x, y),
            Message::Key { target, event } => {
                target == self.header.id && event.activation() == Some(KeyPhase::Pressed)
            }
            Message::Pointer { .. } => false,
        };

        checked.then_some(Action::Radio(RadioAction::Checked))
    }

    /// Marks only this member; the list clears the rest of the group first.
    fn apply(&mut self, action: Action, _message: &Message) {
        if action == Action::Radio(RadioAction::Checked) {
            debug!("Radio button {} checked", self.header.id);
            self.set_checked(true);
        }
    }

    fn draw<G: Gfx>(&mut self, gfx: &mut G) -> Result<DrawStatus, G::Error> {
        loop {
            if !gfx.ready() {
                return Ok(DrawStatus::Incomplete);
            }

            match self.stage {
                Stage::Start => {
                    let requests = self.header.begin_pass();
                    if requests.hide {
                        erase(gfx, &self.header)?;
                        return Ok(self.header.end_pass());
                    }
                    self.stage = if requests.full {
                        Stage::Panel
                    } else if requests.check {
                        Stage::Check
                    } else if requests.focus {
                        Stage::Focus
                    } else {
                        return Ok(self.header.end_pass());
                    };
                }
                Stage::Panel => {
                    if self.header.scheme.fill_style == FillStyle::Color {
                        erase(gfx, &self.header)?;
                    }
                    self.stage = Stage::Dot;
                }
                Stage::Dot => {
                    let dot = self.dot();
                    let scheme = &self.header.scheme;
                    gfx.set_line_style(LineStyle::Solid);
                    gfx.set_color(scheme.emboss_dark_color);
                    gfx.fill_circle(dot.center, dot.radius)?;
                    gfx.set_color(self.face_color());
                    gfx.fill_circle(dot.center, dot.radius.saturating_sub(scheme.emboss_size))?;
                    self.stage = if self.text.is_some() {
                        Stage::Text
                    } else {
                        Stage::Check
                    };
                }
                Stage::Text => {
                    if let Some(text) = self.text.as_deref() {
                        let scheme = &self.header.scheme;
                        let dot = self.dot();
                        let b = self.header.bounds;
                        let left = b.left + scheme.emboss() + 2 * dot.radius as i32 + 6;
                        let area = BoundingBox::new(left.min(b.right), b.top, b.right, b.bottom);
                        gfx.set_font(scheme.font);
                        gfx.set_color(if self.header.properties.disabled {
                            scheme.text_color_disabled
                        } else {
                            scheme.text_color0
                        });
                        gfx.text_box(area.to_rectangle(), text, TextAlignment::LEFT)?;
                    }
                    self.stage = Stage::Check;
                }
                Stage::Check => {
                    let dot = self.dot();
                    let scheme = &self.header.scheme;
                    let color = match (self.is_checked(), self.header.properties.disabled) {
                        (true, false) => scheme.text_color0,
                        (true, true) => scheme.text_color_disabled,
                        (false, _) => self.face_color(),
                    };
                    let inner = dot.radius.saturating_sub(dot.radius / 3 + 1).max(1);
                    gfx.set_color(color);
                    gfx.fill_circle(dot.center, inner)?;
                    let requests = self.header.pass_requests();
                    self.stage = if requests.full || requests.focus {
                        Stage::Focus
                    } else {
                        self.stage = Stage::Start;
                        return Ok(self.header.end_pass());
                    };
                }
                Stage::Focus => {
                    let scheme = &self.header.scheme;
                    if self.header.properties.focused {
                        gfx.set_color(scheme.text_color0);
                        gfx.set_line_style(LineStyle::Dashed);
                    } else {
                        gfx.set_color(scheme.common_background_color);
                        gfx.set_line_style(LineStyle::Solid);
                    }
                    gfx.rectangle(self.header.bounds.to_rectangle())?;
                    gfx.set_line_style(LineStyle::Solid);
                    self.stage = Stage::Start;
                    return Ok(self.header.end_pass());
                }
            }
        }
    }
}
