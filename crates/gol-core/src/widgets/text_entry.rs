//! Single-line text entry with a blinking caret

use alloc::rc::Rc;
use alloc::string::String;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use super::{Control, Header, erase};
use crate::error::{GolError, GolResult};
use crate::gfx::{
    DrawStatus, Gfx, HorizontalAlign, PanelStyle, TextAlignment, VerticalAlign, draw_panel,
};
use crate::ui::core::{
    Action, BoundingBox, KeyEvent, KeyPhase, Message, TextAction, TouchPhase, WidgetId,
};
use crate::ui::scan_codes::ScanCode;
use crate::ui::styling::StyleScheme;

/// Width of the caret bar in pixels
pub const CARET_WIDTH: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Panel,
    PrepareText,
    Text,
    Caret,
}

pub struct TextEntry {
    header: Header,
    buffer: String,
    /// Maximum number of characters
    capacity: usize,
    /// Current number of characters
    length: usize,
    alignment: TextAlignment,
    text_height: i32,
    caret_on: bool,
    stage: Stage,
}

impl TextEntry {
    /// Create an entry holding at most `capacity` characters.
    ///
    /// Buffer storage is reserved up front; failure to reserve it is
    /// reported as [`GolError::OutOfMemory`].
    pub fn new(
        id: WidgetId,
        bounds: BoundingBox,
        capacity: usize,
        scheme: Rc<StyleScheme>,
    ) -> GolResult<Self> {
        let mut buffer = String::new();
        buffer
            .try_reserve(capacity)
            .map_err(|_| GolError::OutOfMemory)?;

        let text_height = scheme.text_height();
        Ok(Self {
            header: Header::new(id, bounds, scheme),
            buffer,
            capacity,
            length: 0,
            alignment: TextAlignment::LEFT,
            text_height,
            caret_on: false,
            stage: Stage::Start,
        })
    }

    pub fn with_text(mut self, text: &str) -> GolResult<Self> {
        self.set_text(text)?;
        Ok(self)
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Show the caret whenever the entry is enabled, focused or not
    pub fn caret_always_on(mut self) -> Self {
        self.header.properties.caret_always_on = true;
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

    // ------------------------------------------------------------------------
    // Buffer
    // ------------------------------------------------------------------------

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replace the content with the first `capacity` characters of `text`.
    pub fn set_text(&mut self, text: &str) -> GolResult<()> {
        let end = text
            .char_indices()
            .nth(self.capacity)
            .map_or(text.len(), |(i, _)| i);
        let kept = &text[..end];

        // Reserve before touching the buffer so a failure leaves it intact
        self.buffer
            .try_reserve(kept.len().saturating_sub(self.buffer.len()))
            .map_err(|_| GolError::OutOfMemory)?;
        self.buffer.clear();
        self.buffer.push_str(kept);
        self.length = kept.chars().count();
        self.header.requests.full = true;
        Ok(())
    }

    /// Append one character; fails without change when full.
    pub fn char_add(&mut self, ch: char) -> GolResult<()> {
        if self.length >= self.capacity {
            return Err(GolError::BufferFull {
                capacity: self.capacity,
            });
        }
        self.buffer
            .try_reserve(ch.len_utf8())
            .map_err(|_| GolError::OutOfMemory)?;
        self.buffer.push(ch);
        self.length += 1;
        self.header.requests.full = true;
        Ok(())
    }

    /// Remove and return the last character; fails when empty.
    pub fn char_remove(&mut self) -> GolResult<char> {
        let ch = self.buffer.pop().ok_or(GolError::BufferEmpty)?;
        self.length -= 1;
        self.header.requests.full = true;
        Ok(ch)
    }

    // ------------------------------------------------------------------------
    // Caret
    // ------------------------------------------------------------------------

    /// Turn the caret on (shown while focused) and request a caret redraw.
    pub fn show_caret(&mut self) {
        self.caret_on = true;
        self.header.requests.caret = true;
    }

    /// Turn the caret off and request a caret redraw to erase it.
    pub fn hide_caret(&mut self) {
        self.caret_on = false;
        self.header.requests.caret = true;
    }

    /// Whether the next caret stage paints the caret rather than erasing it
    pub fn caret_visible(&self) -> bool {
        let props = &self.header.properties;
        !props.disabled && (props.caret_always_on || (props.focused && self.caret_on))
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
        self.header.requests.full = true;
    }

    fn inner(&self) -> BoundingBox {
        self.header.bounds.inset(self.header.scheme.emboss())
    }

    /// Where the text is laid out, keeping the caret column free on the right
    fn text_area(&self) -> BoundingBox {
        let inner = self.inner();
        let right = (inner.right - CARET_WIDTH).max(inner.left);
        BoundingBox::new(inner.left, inner.top, right, inner.bottom)
    }

    fn face_color(&self) -> Rgb565 {
        let scheme = &self.header.scheme;
        if self.header.properties.disabled {
            scheme.color_disabled
        } else {
            scheme.color0
        }
    }

    /// Top-left corner of the caret bar, just after the last character
    fn caret_origin(&self) -> Point {
        let inner = self.inner();
        let area = self.text_area();
        let width = self.header.scheme.text_width(&self.buffer);
        let h = self.text_height;

        let x = match self.alignment.horizontal {
            HorizontalAlign::Left => area.left + width,
            HorizontalAlign::Center => (area.left + area.right + 1) / 2 - width / 2 + width,
            HorizontalAlign::Right => area.right + 1,
        };
        let y = match self.alignment.vertical {
            VerticalAlign::Top => inner.top,
            VerticalAlign::Center => (inner.top + inner.bottom + 1) / 2 - h / 2,
            VerticalAlign::Bottom => inner.bottom + 1 - h,
        };

        Point::new(x.min(inner.right + 1 - CARET_WIDTH).max(inner.left), y)
    }
}

impl Control for TextEntry {
    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    fn translate(&self, message: &Message) -> Option<Action> {
        if self.header.properties.disabled {
            return None;
        }

        let action = match *message {
            Message::Pointer {
                x,
                y,
                phase: TouchPhase::Press,
            } if self.header.bounds.contains(x, y) => TextAction::Touchscreen,
            Message::Key { target, event } if target == self.header.id => match event {
                KeyEvent::Char(ch) if !ch.is_control() => TextAction::AddChar(ch),
                KeyEvent::Scan {
                    code: ScanCode::BACKSPACE,
                    phase: KeyPhase::Pressed,
                } => TextAction::DelChar,
                _ => return None,
            },
            _ => return None,
        };

        Some(Action::Text(action))
    }

    fn apply(&mut self, action: Action, _message: &Message) {
        let Action::Text(action) = action else {
            return;
        };

        match action {
            TextAction::AddChar(ch) => {
                if let Err(err) = self.char_add(ch) {
                    debug!("Text entry {}: {}", self.header.id, err);
                }
            }
            TextAction::DelChar => {
                if let Err(err) = self.char_remove() {
                    debug!("Text entry {}: {}", self.header.id, err);
                }
            }
            // Focus is granted by the list
            TextAction::Touchscreen => return,
        }
        self.header.requests.full = true;
    }

    fn draw<G: Gfx>(&mut self, gfx: &mut G) -> Result<DrawStatus, G::Error> {
        loop {
            if !gfx.ready() {
                return Ok(DrawStatus::Incomplete);
            }

            let disabled = self.header.properties.disabled;
            match self.stage {
                Stage::Start => {
                    let requests = self.header.begin_pass();
                    if requests.hide {
                        erase(gfx, &self.header)?;
                        return Ok(self.header.end_pass());
                    }
                    self.stage = if requests.full {
                        Stage::Panel
                    } else if (requests.caret || requests.focus) && !disabled {
                        Stage::Caret
                    } else {
                        return Ok(self.header.end_pass());
                    };
                }
                Stage::Panel => {
                    let scheme = &self.header.scheme;
                    let panel = PanelStyle {
                        face: scheme.fill_style.face(self.face_color()),
                        light: scheme.emboss_light_color,
                        dark: scheme.emboss_dark_color,
                        emboss: scheme.emboss_size,
                        radius: 0,
                    }
                    .sunken();
                    draw_panel(gfx, self.header.bounds, &panel)?;
                    self.stage = Stage::PrepareText;
                }
                Stage::PrepareText => {
                    let scheme = &self.header.scheme;
                    gfx.set_font(scheme.font);
                    gfx.set_color(if disabled {
                        scheme.text_color_disabled
                    } else {
                        scheme.text_color0
                    });
                    self.stage = Stage::Text;
                }
                Stage::Text => {
                    gfx.text_box(self.text_area().to_rectangle(), &self.buffer, self.alignment)?;
                    if disabled {
                        self.stage = Stage::Start;
                        return Ok(self.header.end_pass());
                    }
                    self.stage = Stage::Caret;
                }
                Stage::Caret => {
                    let color = if self.caret_visible() {
                        self.header.scheme.text_color0
                    } else {
                        self.face_color()
                    };
                    let origin = self.caret_origin();
                    let bar = BoundingBox::new(
                        origin.x,
                        origin.y,
                        origin.x + CARET_WIDTH - 1,
                        origin.y + self.text_height - 1,
                    );
                    gfx.set_color(color);
                    gfx.fill_rectangle(bar.to_rectangle())?;
                    self.stage = Stage::Start;
                    return Ok(self.header.end_pass());
                }
            }
        }
    }

    fn free(&mut self) {
        self.buffer = String::new();
        self.length = 0;
    }
}
