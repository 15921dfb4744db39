//! Color definitions for the built-in style schemes
//!
//! All colors are RGB565, the native format of the small TFT panels the
//! widget layer targets.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Surfaces
// ============================================================================

/// Screen background - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Widget face - slightly lighter than the background
pub const COLOR_FACE: Rgb565 = Rgb565::new(38 >> 3, 46 >> 2, 48 >> 3);

/// Pressed/selected face - teal accent
pub const COLOR_FACE_ACTIVE: Rgb565 = Rgb565::new(29 >> 3, 96 >> 2, 80 >> 3);

/// Disabled face
pub const COLOR_FACE_DISABLED: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

// ============================================================================
// Emboss
// ============================================================================

/// Highlight edge of a raised panel
pub const COLOR_EMBOSS_LIGHT: Rgb565 = Rgb565::new(88 >> 3, 104 >> 2, 108 >> 3);

/// Shadow edge of a raised panel
pub const COLOR_EMBOSS_DARK: Rgb565 = Rgb565::new(8 >> 3, 10 >> 2, 11 >> 3);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for text on active faces
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Medium gray - for disabled text
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Near black - text on light schemes
pub const DARK_GRAY: Rgb565 = Rgb565::new(4, 8, 4);

/// Bright teal-green accent
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);
