//! [`Gfx`] implementation on top of any embedded-graphics `DrawTarget`.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PointsIter, PrimitiveStyle, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::{Gfx, HorizontalAlign, LineStyle, RenderStatus, TextAlignment, VerticalAlign};
use crate::ui::styling::StyleScheme;

/// Renders widget primitives into a `DrawTarget<Color = Rgb565>`.
///
/// Drawing into a target is synchronous, so the canvas is always idle unless
/// a caller forces another status with [`Canvas::set_render_status`], which
/// is how double-buffered or DMA-driven displays signal a pending flush.
pub struct Canvas<D> {
    target: D,
    color: Rgb565,
    line_style: LineStyle,
    font: &'static MonoFont<'static>,
    status: RenderStatus,
}

impl<D> Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            color: Rgb565::WHITE,
            line_style: LineStyle::Solid,
            font: StyleScheme::default().font,
            status: RenderStatus::Idle,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    /// Override the reported pipeline status.
    ///
    /// `Failed` is reported once and then reverts to `Idle`.
    pub fn set_render_status(&mut self, status: RenderStatus) {
        self.status = status;
    }

    fn stroke(&self) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyle::with_stroke(self.color, 1)
    }

    fn fill(&self) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyle::with_fill(self.color)
    }

    /// Plot a one-pixel line, skipping pixels the line style leaves unlit.
    fn patterned_line(&mut self, start: Point, end: Point, phase: usize) -> Result<usize, D::Error> {
        let line = Line::new(start, end);
        let style = self.line_style;
        let color = self.color;
        let mut count = 0;
        let pixels = line.points().enumerate().filter_map(|(n, p)| {
            count = n + 1;
            style.lit(n + phase).then_some(Pixel(p, color))
        });
        self.target.draw_iter(pixels)?;
        Ok(phase + count)
    }
}

impl<D> Gfx for Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn render_status(&mut self) -> RenderStatus {
        let status = self.status;
        if status == RenderStatus::Failed {
            self.status = RenderStatus::Idle;
        }
        status
    }

    fn set_color(&mut self, color: Rgb565) {
        self.color = color;
    }

    fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
    }

    fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
    }

    fn rectangle(&mut self, area: Rectangle) -> Result<(), Self::Error> {
        if self.line_style == LineStyle::Solid {
            return area.into_styled(self.stroke()).draw(&mut self.target);
        }

        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let top_left = area.top_left;
        let top_right = Point::new(bottom_right.x, top_left.y);
        let bottom_left = Point::new(top_left.x, bottom_right.y);

        // Walk the outline clockwise so the pattern runs continuously around corners
        let mut phase = self.patterned_line(top_left, top_right, 0)?;
        phase = self.patterned_line(top_right, bottom_right, phase)?;
        phase = self.patterned_line(bottom_right, bottom_left, phase)?;
        self.patterned_line(bottom_left, top_left, phase)?;
        Ok(())
    }

    fn fill_rectangle(&mut self, area: Rectangle) -> Result<(), Self::Error> {
        self.target.fill_solid(&area, self.color)
    }

    fn rounded_rectangle(&mut self, area: Rectangle, radius: u32) -> Result<(), Self::Error> {
        if radius == 0 {
            return self.rectangle(area);
        }
        // Patterned strokes are not supported on rounded corners
        RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
            .into_styled(self.stroke())
            .draw(&mut self.target)
    }

    fn fill_rounded_rectangle(
        &mut self,
        area: Rectangle,
        radius: u32,
    ) -> Result<(), Self::Error> {
        if radius == 0 {
            return self.fill_rectangle(area);
        }
        RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
            .into_styled(self.fill())
            .draw(&mut self.target)
    }

    fn circle(&mut self, center: Point, radius: u32) -> Result<(), Self::Error> {
        Circle::with_center(center, radius * 2 + 1)
            .into_styled(self.stroke())
            .draw(&mut self.target)
    }

    fn fill_circle(&mut self, center: Point, radius: u32) -> Result<(), Self::Error> {
        Circle::with_center(center, radius * 2 + 1)
            .into_styled(self.fill())
            .draw(&mut self.target)
    }

    fn line(&mut self, start: Point, end: Point) -> Result<(), Self::Error> {
        self.patterned_line(start, end, 0)?;
        Ok(())
    }

    fn image(
        &mut self,
        top_left: Point,
        image: &ImageRaw<'static, Rgb565>,
    ) -> Result<(), Self::Error> {
        Image::new(image, top_left).draw(&mut self.target)
    }

    fn text_box(
        &mut self,
        area: Rectangle,
        text: &str,
        alignment: TextAlignment,
    ) -> Result<(), Self::Error> {
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let center = area.center();

        let (x, h_align) = match alignment.horizontal {
            HorizontalAlign::Left => (area.top_left.x, Alignment::Left),
            HorizontalAlign::Center => (center.x, Alignment::Center),
            HorizontalAlign::Right => (bottom_right.x, Alignment::Right),
        };
        let (y, baseline) = match alignment.vertical {
            VerticalAlign::Top => (area.top_left.y, Baseline::Top),
            VerticalAlign::Center => (center.y, Baseline::Middle),
            VerticalAlign::Bottom => (bottom_right.y, Baseline::Bottom),
        };

        let character_style = MonoTextStyle::new(self.font, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(h_align)
            .baseline(baseline)
            .build();

        Text::with_text_style(text, Point::new(x, y), character_style, text_style)
            .draw(&mut self.target.clipped(&area))?;
        Ok(())
    }
}
