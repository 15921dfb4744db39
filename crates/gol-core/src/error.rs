//! Error types for widget-layer operations
//!
//! Rendering deferral is not an error: a draw that cannot finish because the
//! display pipeline is busy reports [`DrawStatus::Incomplete`] instead.
//! Invalid input is not an error either; translation simply yields `None`.
//!
//! [`DrawStatus::Incomplete`]: crate::gfx::DrawStatus::Incomplete

use thiserror_no_std::Error;

/// Errors returned by widget construction and list/widget operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GolError {
    /// The allocator could not provide storage for a widget, item or buffer
    #[error("Out of memory")]
    OutOfMemory,

    /// The widget list already holds its configured maximum
    #[error("Widget capacity exceeded (max: {max})")]
    CapacityExceeded {
        /// Maximum number of widgets the list accepts
        max: usize,
    },

    /// Character could not be added because the text buffer is full
    #[error("Text buffer full (capacity: {capacity})")]
    BufferFull {
        /// Capacity of the text buffer in characters
        capacity: usize,
    },

    /// Character could not be removed because the text buffer is empty
    #[error("Text buffer empty")]
    BufferEmpty,

    /// Handle does not refer to a live widget in this list
    #[error("Unknown widget handle")]
    UnknownWidget,

    /// Handle does not refer to a live item in this list box
    #[error("Unknown list item handle")]
    UnknownItem,

    /// Widget exists but is not of the requested variant
    #[error("Widget is not a {expected}")]
    WrongVariant {
        /// Variant the caller asked for
        expected: &'static str,
    },

    /// Widget cannot receive keyboard focus (wrong variant or disabled)
    #[error("Widget cannot take focus")]
    NotFocusable,

    /// Serialized configuration could not be decoded
    #[error("Invalid configuration")]
    InvalidConfig,
}

/// Result alias used throughout the crate
pub type GolResult<T> = Result<T, GolError>;
