//! Style schemes and the color constants they are built from

pub mod colors;
mod scheme;

pub use colors::*;
pub use scheme::{FillStyle, StyleScheme};
