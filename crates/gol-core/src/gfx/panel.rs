//! Raised/sunken 3D panel shared by all widget faces.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::{Gfx, LineStyle};
use crate::ui::core::BoundingBox;

/// Colors and geometry of one panel
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelStyle {
    /// Face color, or `None` to leave the face untouched
    pub face: Option<Rgb565>,
    /// Top/left bevel color
    pub light: Rgb565,
    /// Bottom/right bevel color
    pub dark: Rgb565,
    pub emboss: u32,
    pub radius: u32,
}

impl PanelStyle {
    /// Same panel with the bevel colors swapped, for pressed faces
    pub fn sunken(mut self) -> Self {
        core::mem::swap(&mut self.light, &mut self.dark);
        self
    }
}

pub(crate) fn draw_panel<G: Gfx>(
    gfx: &mut G,
    area: BoundingBox,
    style: &PanelStyle,
) -> Result<(), G::Error> {
    gfx.set_line_style(LineStyle::Solid);
    let emboss = style.emboss as i32;

    if style.radius > 0 {
        // Rounded panels get a single-tone rim
        gfx.set_color(style.dark);
        for ring in 0..emboss {
            let r = style.radius.saturating_sub(ring as u32);
            gfx.rounded_rectangle(area.inset(ring).to_rectangle(), r)?;
        }
        if let Some(face) = style.face {
            gfx.set_color(face);
            let r = style.radius.saturating_sub(style.emboss);
            gfx.fill_rounded_rectangle(area.inset(emboss).to_rectangle(), r)?;
        }
        return Ok(());
    }

    for ring in 0..emboss {
        let b = area.inset(ring);
        gfx.set_color(style.light);
        gfx.line(Point::new(b.left, b.top), Point::new(b.right, b.top))?;
        gfx.line(Point::new(b.left, b.top), Point::new(b.left, b.bottom))?;
        gfx.set_color(style.dark);
        gfx.line(Point::new(b.left, b.bottom), Point::new(b.right, b.bottom))?;
        gfx.line(Point::new(b.right, b.top), Point::new(b.right, b.bottom))?;
    }

    if let Some(face) = style.face {
        gfx.set_color(face);
        gfx.fill_rectangle(area.inset(emboss).to_rectangle())?;
    }
    Ok(())
}
