//! Retained-mode widget layer for small RGB565 displays
//!
//! Applications build a [`WidgetList`] of buttons, radio buttons, list
//! boxes and text entries, feed it input [`Message`]s, and call
//! [`WidgetList::draw_all`] from their main loop. Drawing goes through the
//! [`Gfx`] driver trait and is resumable: when the driver reports that it is
//! busy, a draw returns [`DrawStatus::Incomplete`] and picks up where it left
//! off on the next call.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod arena;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod gfx;
pub mod input;
pub mod list;
pub mod ui;
pub mod widgets;

pub use config::GolConfig;
pub use error::{GolError, GolResult};
pub use gfx::{Canvas, DrawStatus, Gfx, RenderStatus};
pub use list::{WidgetHandle, WidgetList};
pub use ui::{Action, BoundingBox, KeyEvent, Message, StyleScheme, WidgetId};
pub use widgets::{Button, Control, ListBox, RadioButton, TextEntry, Widget};
