//! Shared style scheme referenced by every widget
//!
//! A scheme is immutable once built. Widgets hold it through an `Rc`, so a
//! scheme lives exactly as long as the last widget drawing with it.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;

use super::colors::*;

/// How panel faces are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillStyle {
    /// Faces are left transparent; only outlines and content are drawn
    None,
    /// Faces are filled with the face color
    #[default]
    Color,
}

impl FillStyle {
    /// Face color to paint, or `None` when faces stay transparent
    pub fn face(&self, color: Rgb565) -> Option<Rgb565> {
        match self {
            Self::None => None,
            Self::Color => Some(color),
        }
    }
}

/// Colors, font and emboss sizing shared by a set of widgets
///
/// The `*0` colors are used in the released/unselected state, `*1` in the
/// pressed/selected state.
#[derive(Clone, Copy)]
pub struct StyleScheme {
    pub emboss_dark_color: Rgb565,
    pub emboss_light_color: Rgb565,
    pub text_color0: Rgb565,
    pub text_color1: Rgb565,
    pub text_color_disabled: Rgb565,
    pub color0: Rgb565,
    pub color1: Rgb565,
    pub color_disabled: Rgb565,
    pub common_background_color: Rgb565,
    pub font: &'static MonoFont<'static>,
    pub fill_style: FillStyle,
    /// Thickness of the 3D border in pixels
    pub emboss_size: u32,
}

impl Default for StyleScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl StyleScheme {
    /// Light text on dark faces (default)
    pub fn dark() -> Self {
        Self {
            emboss_dark_color: COLOR_EMBOSS_DARK,
            emboss_light_color: COLOR_EMBOSS_LIGHT,
            text_color0: WHITE,
            text_color1: LIGHT_GRAY,
            text_color_disabled: GRAY,
            color0: COLOR_FACE,
            color1: COLOR_FACE_ACTIVE,
            color_disabled: COLOR_FACE_DISABLED,
            common_background_color: COLOR_BACKGROUND,
            font: &FONT_6X10,
            fill_style: FillStyle::Color,
            emboss_size: 2,
        }
    }

    /// Dark text on light faces
    pub fn light() -> Self {
        Self {
            emboss_dark_color: GRAY,
            emboss_light_color: WHITE,
            text_color0: DARK_GRAY,
            text_color1: WHITE,
            text_color_disabled: GRAY,
            color0: LIGHT_GRAY,
            color1: COLOR_ACCENT,
            color_disabled: COLOR_FACE_DISABLED,
            common_background_color: WHITE,
            font: &FONT_6X10,
            fill_style: FillStyle::Color,
            emboss_size: 2,
        }
    }

    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    pub fn with_emboss_size(mut self, size: u32) -> Self {
        self.emboss_size = size;
        self
    }

    pub fn with_fill_style(mut self, fill_style: FillStyle) -> Self {
        self.fill_style = fill_style;
        self
    }

    pub(crate) fn emboss(&self) -> i32 {
        self.emboss_size as i32
    }

    /// Height of one text row in pixels
    pub fn text_height(&self) -> i32 {
        self.font.character_size.height as i32
    }

    /// Rendered width of `text` in pixels
    pub fn text_width(&self, text: &str) -> i32 {
        let chars = text.chars().count() as i32;
        if chars == 0 {
            return 0;
        }
        let advance = (self.font.character_size.width + self.font.character_spacing) as i32;
        chars * advance - self.font.character_spacing as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_metrics_follow_font() {
        let scheme = StyleScheme::default();
        assert_eq!(scheme.text_height(), 10);
        assert_eq!(scheme.text_width(""), 0);
        assert_eq!(scheme.text_width("abc"), 18);
    }
}
