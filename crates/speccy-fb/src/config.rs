//! Framebuffer configuration types and builder

pub use crate::error::{BuilderError, MAX_SIDE};

use crate::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// Logical drawing surface size
///
/// The pixel store is transposed: `width` physical rows of `height` pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Logical width (physical row count)
    pub width: u16,
    /// Logical height (physical row length)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero or
    /// above [`MAX_SIDE`].
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_SIDE || height == 0 || height > MAX_SIDE {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels in the store
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: LOGICAL_WIDTH,
            height: LOGICAL_HEIGHT,
        }
    }
}

/// Framebuffer configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Logical surface size
    pub dimensions: Dimensions,
    /// Color the store is cleared to on init
    pub background: u16,
}

/// Builder for constructing framebuffer configuration
///
/// # Example
///
/// ```
/// use speccy_fb::{Builder, Dimensions};
///
/// let config = Builder::new()
///     .dimensions(Dimensions::new(128, 96).unwrap())
///     .background(0x001F)
///     .build();
/// assert_eq!(config.dimensions.width, 128);
/// ```
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder for the 256x192 reference surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logical dimensions
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.config.dimensions = dims;
        self
    }

    /// Set the initial clear color
    pub fn background(mut self, color: u16) -> Self {
        self.config.background = color;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_surface() {
        let config = Builder::new().build();
        assert_eq!(config.dimensions, Dimensions::new(256, 192).unwrap());
        assert_eq!(config.background, 0);
        assert_eq!(config.dimensions.pixel_count(), 256 * 192);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(
            Dimensions::new(0, 192),
            Err(BuilderError::InvalidDimensions {
                width: 0,
                height: 192
            })
        );
        assert!(Dimensions::new(256, MAX_SIDE + 1).is_err());
    }
}
