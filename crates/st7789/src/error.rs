//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Example
//!
//! ```
//! use st7789::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Larger than the controller RAM
//! let result = Dimensions::new(400, 240);
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum columns addressable in ST7789 frame memory
pub const MAX_COLUMNS: u16 = 240;

/// Maximum rows addressable in ST7789 frame memory
pub const MAX_ROWS: u16 = 320;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    Interface(I::Error),
    /// Address window does not fit on the panel
    ///
    /// Raised by [`Display::write_addr_window`](crate::display::Display::write_addr_window)
    /// when the window is empty or extends past the configured dimensions.
    WindowOutOfBounds {
        /// Left column
        x: u16,
        /// Top row
        y: u16,
        /// Width in pixels
        width: u16,
        /// Height in pixels
        height: u16,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::WindowOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "Address window {width}x{height} at ({x}, {y}) is off panel"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels
        width: u16,
        /// Height in pixels
        height: u16,
    },
    /// Panel offset pushes the visible area past the controller RAM
    OffsetOutOfRange {
        /// Column offset
        x: u16,
        /// Row offset
        y: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::MissingDimensions => write!(f, "Dimensions must be specified"),
            BuilderError::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS})"
            ),
            BuilderError::OffsetOutOfRange { x, y } => {
                write!(f, "Offset ({x}, {y}) exceeds controller RAM")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
