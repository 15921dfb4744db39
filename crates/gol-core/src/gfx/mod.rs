//! Display driver interface consumed by the widget draw routines.
//!
//! Widgets never talk to a `DrawTarget` directly. They issue primitives
//! through [`Gfx`], which also reports whether the rendering pipeline can
//! accept more work. Every draw stage checks [`Gfx::ready`] before issuing
//! anything and bails out with [`DrawStatus::Incomplete`] otherwise, so a
//! slow or asynchronous display never blocks the UI loop.

mod canvas;
mod panel;

pub use canvas::Canvas;
pub(crate) use panel::{PanelStyle, draw_panel};

use embedded_graphics::image::ImageRaw;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::warn;

/// Result of one call to a widget's draw routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    /// Everything requested has been drawn
    Complete,
    /// The pipeline was busy; call again later to resume
    Incomplete,
}

/// Tri-state status of the rendering pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStatus {
    #[default]
    Idle,
    Busy,
    /// The previous primitive failed; the caller should retry later
    Failed,
}

/// Stroke pattern for outlines and lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Whether the `n`th pixel along a stroke is lit
    pub fn lit(&self, n: usize) -> bool {
        match self {
            Self::Solid => true,
            Self::Dashed => n % 6 < 4,
            Self::Dotted => n % 2 == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Placement of text inside a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAlignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl TextAlignment {
    pub const CENTER: Self = Self::new(HorizontalAlign::Center, VerticalAlign::Center);
    pub const LEFT: Self = Self::new(HorizontalAlign::Left, VerticalAlign::Center);
    pub const RIGHT: Self = Self::new(HorizontalAlign::Right, VerticalAlign::Center);
    pub const TOP_LEFT: Self = Self::new(HorizontalAlign::Left, VerticalAlign::Top);

    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Primitive drawing operations plus pipeline status.
///
/// Outline primitives honour the current [`LineStyle`]; all primitives use
/// the color last passed to [`Gfx::set_color`].
pub trait Gfx {
    type Error;

    /// Current pipeline status. Drivers may reset a `Failed` status once it
    /// has been reported.
    fn render_status(&mut self) -> RenderStatus;

    fn set_color(&mut self, color: Rgb565);
    fn set_line_style(&mut self, style: LineStyle);
    fn set_font(&mut self, font: &'static MonoFont<'static>);

    fn rectangle(&mut self, area: Rectangle) -> Result<(), Self::Error>;
    fn fill_rectangle(&mut self, area: Rectangle) -> Result<(), Self::Error>;
    fn rounded_rectangle(&mut self, area: Rectangle, radius: u32) -> Result<(), Self::Error>;
    fn fill_rounded_rectangle(&mut self, area: Rectangle, radius: u32)
    -> Result<(), Self::Error>;
    fn circle(&mut self, center: Point, radius: u32) -> Result<(), Self::Error>;
    fn fill_circle(&mut self, center: Point, radius: u32) -> Result<(), Self::Error>;
    fn line(&mut self, start: Point, end: Point) -> Result<(), Self::Error>;
    fn image(
        &mut self,
        top_left: Point,
        image: &ImageRaw<'static, Rgb565>,
    ) -> Result<(), Self::Error>;
    /// Draw `text` inside `area`, clipped to it
    fn text_box(
        &mut self,
        area: Rectangle,
        text: &str,
        alignment: TextAlignment,
    ) -> Result<(), Self::Error>;

    /// Whether a draw stage may issue primitives now.
    fn ready(&mut self) -> bool {
        match self.render_status() {
            RenderStatus::Idle => true,
            RenderStatus::Busy => false,
            RenderStatus::Failed => {
                warn!("Render pipeline reported a failure, deferring draw");
                false
            }
        }
    }
}
