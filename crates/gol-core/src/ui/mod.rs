//! Widget-facing UI vocabulary: geometry, messages, actions, state and styling

pub mod core;
pub mod scan_codes;
pub mod state;
pub mod styling;

pub use self::core::*;
pub use scan_codes::ScanCode;
pub use state::{DrawRequests, Properties};
pub use styling::{FillStyle, StyleScheme};
