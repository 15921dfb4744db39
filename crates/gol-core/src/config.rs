//! Persisted UI configuration.
//!
//! Stored as postcard binary so it can live in a flash sector next to other
//! device settings. Colors are kept as raw RGB565 words.

use alloc::vec::Vec;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{GolError, GolResult};
use crate::list::WidgetList;
use crate::ui::styling::{FillStyle, StyleScheme};

/// Widget count used when no configuration has been stored
pub const DEFAULT_MAX_WIDGETS: u16 = 64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontChoice {
    /// 6x10 pixels
    #[default]
    Small,
    /// 9x15 pixels
    Medium,
    /// 10x20 pixels
    Large,
}

impl FontChoice {
    pub fn font(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => &FONT_6X10,
            Self::Medium => &FONT_9X15,
            Self::Large => &FONT_10X20,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeConfig {
    pub emboss_dark_color: u16,
    pub emboss_light_color: u16,
    pub text_color0: u16,
    pub text_color1: u16,
    pub text_color_disabled: u16,
    pub color0: u16,
    pub color1: u16,
    pub color_disabled: u16,
    pub common_background_color: u16,
    pub font: FontChoice,
    /// Paint panel faces; `false` leaves them transparent
    pub fill_faces: bool,
    pub emboss_size: u8,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self::from_scheme(&StyleScheme::default(), FontChoice::Small)
    }
}

fn raw(color: Rgb565) -> u16 {
    color.into_storage()
}

fn color(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

impl SchemeConfig {
    /// Capture `scheme`; fonts are not serializable so the caller names one.
    pub fn from_scheme(scheme: &StyleScheme, font: FontChoice) -> Self {
        Self {
            emboss_dark_color: raw(scheme.emboss_dark_color),
            emboss_light_color: raw(scheme.emboss_light_color),
            text_color0: raw(scheme.text_color0),
            text_color1: raw(scheme.text_color1),
            text_color_disabled: raw(scheme.text_color_disabled),
            color0: raw(scheme.color0),
            color1: raw(scheme.color1),
            color_disabled: raw(scheme.color_disabled),
            common_background_color: raw(scheme.common_background_color),
            font,
            fill_faces: scheme.fill_style == FillStyle::Color,
            emboss_size: scheme.emboss_size.min(u8::MAX as u32) as u8,
        }
    }

    pub fn to_scheme(&self) -> StyleScheme {
        StyleScheme {
            emboss_dark_color: color(self.emboss_dark_color),
            emboss_light_color: color(self.emboss_light_color),
            text_color0: color(self.text_color0),
            text_color1: color(self.text_color1),
            text_color_disabled: color(self.text_color_disabled),
            color0: color(self.color0),
            color1: color(self.color1),
            color_disabled: color(self.color_disabled),
            common_background_color: color(self.common_background_color),
            font: self.font.font(),
            fill_style: if self.fill_faces {
                FillStyle::Color
            } else {
                FillStyle::None
            },
            emboss_size: self.emboss_size as u32,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GolConfig {
    /// Upper bound on widgets in one list
    pub max_widgets: u16,
    pub scheme: SchemeConfig,
}

impl Default for GolConfig {
    fn default() -> Self {
        Self {
            max_widgets: DEFAULT_MAX_WIDGETS,
            scheme: SchemeConfig::default(),
        }
    }
}

impl GolConfig {
    pub fn from_bytes(bytes: &[u8]) -> GolResult<Self> {
        postcard::from_bytes(bytes).map_err(|err| {
            warn!("Failed to decode UI configuration: {:?}", err);
            GolError::InvalidConfig
        })
    }

    pub fn to_vec(&self) -> GolResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|err| {
            warn!("Failed to encode UI configuration: {:?}", err);
            GolError::OutOfMemory
        })
    }

    pub fn to_scheme(&self) -> StyleScheme {
        self.scheme.to_scheme()
    }

    /// Empty widget list bounded by `max_widgets`
    pub fn widget_list(&self) -> WidgetList {
        WidgetList::with_max_widgets(self.max_widgets as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::colors::COLOR_ACCENT;

    #[test]
    fn test_default_matches_dark_scheme() {
        let scheme = GolConfig::default().to_scheme();
        let dark = StyleScheme::dark();
        assert_eq!(scheme.color0, dark.color0);
        assert_eq!(scheme.common_background_color, dark.common_background_color);
        assert_eq!(scheme.emboss_size, dark.emboss_size);
        assert_eq!(scheme.fill_style, FillStyle::Color);
    }

    #[test]
    fn test_stored_config_restores() {
        let mut config = GolConfig {
            max_widgets: 12,
            ..GolConfig::default()
        };
        config.scheme.color1 = raw(COLOR_ACCENT);
        config.scheme.font = FontChoice::Large;
        config.scheme.fill_faces = false;

        let bytes = config.to_vec().unwrap();
        let restored = GolConfig::from_bytes(&bytes).unwrap();
        assert_eq!(restored, config);

        let scheme = restored.to_scheme();
        assert_eq!(scheme.color1, COLOR_ACCENT);
        assert_eq!(scheme.text_height(), 20);
        assert_eq!(scheme.fill_style, FillStyle::None);
        assert_eq!(restored.widget_list().max_widgets(), 12);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(GolConfig::from_bytes(&[]), Err(GolError::InvalidConfig));
    }
}
