//! Error types for the framebuffer
//!
//! Drawing never fails: out-of-range coordinates and degenerate sizes are
//! clipped away. The only runtime failure is running out of memory while
//! allocating the pixel store.

/// Largest logical side; physical rows are addressed with `u16` windows
pub const MAX_SIDE: u16 = 4096;

/// Errors raised while creating a [`Framebuffer`](crate::Framebuffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The allocator could not provide the pixel store or dirty tables
    OutOfMemory {
        /// Bytes requested
        bytes: usize,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfMemory { bytes } => {
                write!(f, "Out of memory allocating {bytes} bytes for framebuffer")
            }
        }
    }
}

impl core::error::Error for Error {}

/// Errors that can occur when building configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// Invalid logical dimensions
    ///
    /// Both sides must be in `1..=MAX_SIDE`.
    InvalidDimensions {
        /// Logical width
        width: u16,
        /// Logical height
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (each side must be 1..={MAX_SIDE})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
