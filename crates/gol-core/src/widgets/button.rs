//! Push/toggle button with optional label and bitmaps

use alloc::rc::Rc;
use embedded_graphics::image::ImageRaw;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_layout::align::{horizontal, vertical};
use embedded_layout::prelude::*;
use log::debug;

use super::{Control, Header, Label, erase, make_label};
use crate::gfx::{DrawStatus, Gfx, LineStyle, PanelStyle, TextAlignment, draw_panel};
use crate::ui::core::{
    Action, BoundingBox, ButtonAction, KeyPhase, Message, TouchPhase, WidgetId,
};
use crate::ui::styling::StyleScheme;

/// Which bitmap the current face shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageSlot {
    Press,
    Release,
}

/// Colors resolved once per draw pass
#[derive(Debug, Clone, Copy)]
struct Face {
    color: Rgb565,
    text: Rgb565,
    image: Option<ImageSlot>,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Start,
    Background(Face),
    Panel(Face),
    Text(Face),
    Focus(Face),
}

/// Button that reports press/release and optionally latches as a toggle
pub struct Button {
    header: Header,
    text: Option<Label>,
    text_width: i32,
    text_height: i32,
    press_image: Option<ImageRaw<'static, Rgb565>>,
    release_image: Option<ImageRaw<'static, Rgb565>>,
    alignment: TextAlignment,
    radius: u32,
    stage: Stage,
}

impl Button {
    pub fn new(id: WidgetId, bounds: BoundingBox, scheme: Rc<StyleScheme>) -> Self {
        Self {
            header: Header::new(id, bounds, scheme),
            text: None,
            text_width: 0,
            text_height: 0,
            press_image: None,
            release_image: None,
            alignment: TextAlignment::CENTER,
            radius: 0,
            stage: Stage::Start,
        }
    }

    // ------------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------------

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(Some(text));
        self
    }

    pub fn with_press_image(mut self, image: ImageRaw<'static, Rgb565>) -> Self {
        self.press_image = Some(image);
        self
    }

    pub fn with_release_image(mut self, image: ImageRaw<'static, Rgb565>) -> Self {
        self.release_image = Some(image);
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Latch on release instead of springing back
    pub fn toggle(mut self) -> Self {
        self.header.properties.toggle = true;
        self
    }

    pub fn pressed(mut self) -> Self {
        self.header.properties.pressed = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.header.properties.disabled = true;
        self
    }

    /// Request focus when added to a list
    pub fn focused(mut self) -> Self {
        self.header.properties.focused = true;
        self
    }

    /// Skip the bevelled panel; only the image and text are drawn
    pub fn no_panel(mut self) -> Self {
        self.header.properties.no_panel = true;
        self
    }

    /// Split the face into an upper and lower color
    pub fn two_tone(mut self) -> Self {
        self.header.properties.two_tone = true;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the label and request a full redraw.
    pub fn set_text(&mut self, text: Option<&str>) {
        self.text = text.map(make_label);
        let scheme = &self.header.scheme;
        self.text_width = self.text.as_deref().map_or(0, |t| scheme.text_width(t));
        self.text_height = scheme.text_height();
        self.header.requests.full = true;
    }

    /// Precomputed label width in pixels
    pub fn text_width(&self) -> i32 {
        self.text_width
    }

    pub fn text_height(&self) -> i32 {
        self.text_height
    }

    pub fn press_image(&self) -> Option<&ImageRaw<'static, Rgb565>> {
        self.press_image.as_ref()
    }

    pub fn set_press_image(&mut self, image: Option<ImageRaw<'static, Rgb565>>) {
        self.press_image = image;
        self.header.requests.full = true;
    }

    pub fn release_image(&self) -> Option<&ImageRaw<'static, Rgb565>> {
        self.release_image.as_ref()
    }

    pub fn set_release_image(&mut self, image: Option<ImageRaw<'static, Rgb565>>) {
        self.release_image = image;
        self.header.requests.full = true;
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
        self.header.requests.full = true;
    }

    pub fn is_pressed(&self) -> bool {
        self.header.properties.pressed
    }

    pub fn is_toggle(&self) -> bool {
        self.header.properties.toggle
    }

    // ------------------------------------------------------------------------
    // Drawing helpers
    // ------------------------------------------------------------------------

    fn resolve_face(&self) -> Face {
        let props = &self.header.properties;
        let scheme = &self.header.scheme;

        let (color, text) = if props.disabled {
            (scheme.color_disabled, scheme.text_color_disabled)
        } else if props.pressed {
            (scheme.color1, scheme.text_color1)
        } else {
            (scheme.color0, scheme.text_color0)
        };

        let image = if props.pressed && self.press_image.is_some() {
            Some(ImageSlot::Press)
        } else if self.release_image.is_some() {
            Some(ImageSlot::Release)
        } else if self.press_image.is_some() {
            Some(ImageSlot::Press)
        } else {
            None
        };

        Face { color, text, image }
    }

    fn image(&self, slot: ImageSlot) -> Option<&ImageRaw<'static, Rgb565>> {
        match slot {
            ImageSlot::Press => self.press_image.as_ref(),
            ImageSlot::Release => self.release_image.as_ref(),
        }
    }

    fn draw_image<G: Gfx>(&self, gfx: &mut G, slot: ImageSlot) -> Result<(), G::Error> {
        let Some(image) = self.image(slot) else {
            return Ok(());
        };
        let area = self.header.bounds.to_rectangle();
        let placed = Rectangle::new(Point::zero(), image.size()).align_to(
            &area,
            horizontal::Center,
            vertical::Center,
        );
        gfx.image(placed.top_left, image)
    }

    fn draw_face<G: Gfx>(&self, gfx: &mut G, face: Face) -> Result<(), G::Error> {
        let props = &self.header.properties;
        let scheme = &self.header.scheme;
        let bounds = self.header.bounds;

        if !props.no_panel {
            let fill = scheme.fill_style.face(face.color);
            let mut panel = PanelStyle {
                face: if props.two_tone { None } else { fill },
                light: scheme.emboss_light_color,
                dark: scheme.emboss_dark_color,
                emboss: scheme.emboss_size,
                radius: self.radius,
            };
            if props.pressed {
                panel = panel.sunken();
            }
            draw_panel(gfx, bounds, &panel)?;

            if props.two_tone && fill.is_some() {
                let inner = bounds.inset(scheme.emboss());
                let middle = (inner.top + inner.bottom) / 2;
                let (upper, lower) = if props.disabled {
                    (scheme.color_disabled, scheme.color_disabled)
                } else if props.pressed {
                    (scheme.color1, scheme.color0)
                } else {
                    (scheme.color0, scheme.color1)
                };
                gfx.set_color(upper);
                gfx.fill_rectangle(
                    BoundingBox::new(inner.left, inner.top, inner.right, middle).to_rectangle(),
                )?;
                gfx.set_color(lower);
                gfx.fill_rectangle(
                    BoundingBox::new(inner.left, middle + 1, inner.right, inner.bottom)
                        .to_rectangle(),
                )?;
            }
        }

        if let Some(slot) = face.image {
            self.draw_image(gfx, slot)?;
        }
        Ok(())
    }

    fn focus_area(&self) -> BoundingBox {
        self.header
            .bounds
            .inset(self.header.scheme.emboss() + 2)
    }
}

impl Control for Button {
    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    fn translate(&self, message: &Message) -> Option<Action> {
        let props = &self.header.properties;
        if props.disabled {
            return None;
        }

        let action = match *message {
            Message::Pointer { x, y, phase } => {
                let inside = self.header.bounds.contains(x, y);
                if props.toggle {
                    // Toggle buttons latch on release
                    if inside && phase == TouchPhase::Release {
                        Some(if props.pressed {
                            ButtonAction::Released
                        } else {
                            ButtonAction::Pressed
                        })
                    } else {
                        None
                    }
                } else if inside {
                    match phase {
                        TouchPhase::Release if props.pressed => Some(ButtonAction::Released),
                        TouchPhase::StillPress if props.pressed => {
                            Some(ButtonAction::StillPressed)
                        }
                        TouchPhase::Press | TouchPhase::StillPress if !props.pressed => {
                            Some(ButtonAction::Pressed)
                        }
                        _ => None,
                    }
                } else if props.pressed
                    && matches!(phase, TouchPhase::Move | TouchPhase::Release)
                {
                    Some(ButtonAction::CancelPress)
                } else {
                    None
                }
            }
            Message::Key { target, event } if target == self.header.id => {
                let phase = event.activation()?;
                if props.toggle {
                    (phase == KeyPhase::Released).then_some(if props.pressed {
                        ButtonAction::Released
                    } else {
                        ButtonAction::Pressed
                    })
                } else {
                    Some(match phase {
                        KeyPhase::Pressed => ButtonAction::Pressed,
                        KeyPhase::Released => ButtonAction::Released,
                    })
                }
            }
            Message::Key { .. } => None,
        };

        action.map(Action::Button)
    }

    fn apply(&mut self, action: Action, _message: &Message) {
        let Action::Button(action) = action else {
            return;
        };

        match action {
            ButtonAction::Pressed => {
                self.header.properties.pressed = true;
                self.header.requests.full = true;
            }
            ButtonAction::Released | ButtonAction::CancelPress => {
                self.header.properties.pressed = false;
                self.header.requests.full = true;
            }
            ButtonAction::StillPressed => {}
        }
        debug!("Button {} -> {:?}", self.header.id, action);
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
                    // A state change after this point requests another pass
                    let face = self.resolve_face();
                    self.stage = if requests.full {
                        Stage::Background(face)
                    } else if requests.focus {
                        Stage::Focus(face)
                    } else {
                        return Ok(self.header.end_pass());
                    };
                }
                Stage::Background(face) => {
                    let scheme = &self.header.scheme;
                    // Clear the corners left outside a rounded face
                    if self.radius > 0 && !self.header.properties.no_panel {
                        gfx.set_line_style(LineStyle::Solid);
                        gfx.set_color(scheme.common_background_color);
                        gfx.fill_rectangle(self.header.bounds.to_rectangle())?;
                    }
                    self.stage = Stage::Panel(face);
                }
                Stage::Panel(face) => {
                    self.draw_face(gfx, face)?;
                    self.stage = if self.text.is_some() {
                        Stage::Text(face)
                    } else {
                        Stage::Focus(face)
                    };
                }
                Stage::Text(face) => {
                    if let Some(text) = self.text.as_deref() {
                        let scheme = &self.header.scheme;
                        gfx.set_font(scheme.font);
                        gfx.set_color(face.text);
                        let area = self.header.bounds.inset(scheme.emboss());
                        gfx.text_box(area.to_rectangle(), text, self.alignment)?;
                    }
                    self.stage = Stage::Focus(face);
                }
                Stage::Focus(face) => {
                    let area = self.focus_area().to_rectangle();
                    let focused = self.header.properties.focused;
                    let (color, style) = if focused {
                        (face.text, LineStyle::Dashed)
                    } else {
                        (face.color, LineStyle::Solid)
                    };
                    gfx.set_color(color);
                    gfx.set_line_style(style);
                    if self.radius > 0 {
                        let emboss = self.header.scheme.emboss_size;
                        let radius = self.radius.saturating_sub(2 + emboss);
                        gfx.rounded_rectangle(area, radius)?;
                    } else {
                        gfx.rectangle(area)?;
                    }
                    gfx.set_line_style(LineStyle::Solid);
                    self.stage = Stage::Start;
                    return Ok(self.header.end_pass());
                }
            }
        }
    }
}
