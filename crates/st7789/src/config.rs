//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

use crate::command::{MADCTL_BGR, MADCTL_MV, MADCTL_MX, MADCTL_MY};

/// Panel dimensions in native (portrait) orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Visible columns (source outputs)
    pub width: u16,
    /// Visible rows (gate outputs)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero or
    /// larger than the controller frame memory (240x320).
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_COLUMNS || height == 0 || height > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels on the panel
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Scan orientation relative to the native portrait layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Native portrait
    #[default]
    Portrait,
    /// Rotated 90 degrees clockwise
    Landscape,
    /// Rotated 180 degrees
    PortraitFlipped,
    /// Rotated 270 degrees clockwise
    LandscapeFlipped,
}

impl Orientation {
    /// MADCTL orientation bits
    pub fn madctl(self) -> u8 {
        match self {
            Orientation::Portrait => 0x00,
            Orientation::Landscape => MADCTL_MX | MADCTL_MV,
            Orientation::PortraitFlipped => MADCTL_MX | MADCTL_MY,
            Orientation::LandscapeFlipped => MADCTL_MY | MADCTL_MV,
        }
    }

    /// Whether rows and columns are exchanged
    pub fn is_landscape(self) -> bool {
        matches!(self, Orientation::Landscape | Orientation::LandscapeFlipped)
    }
}

/// Subpixel color order of the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Visible panel dimensions (portrait)
    pub dimensions: Dimensions,
    /// Offset of the visible area inside controller RAM (portrait)
    pub offset: (u16, u16),
    /// Scan orientation
    pub orientation: Orientation,
    /// Most IPS panels need inversion on to show true colors
    pub invert_colors: bool,
    /// Subpixel order
    pub color_order: ColorOrder,
}

impl Config {
    /// Dimensions as seen by callers after applying the orientation
    pub fn oriented_dimensions(&self) -> Dimensions {
        if self.orientation.is_landscape() {
            Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            }
        } else {
            self.dimensions
        }
    }

    /// RAM offset after applying the orientation
    pub fn oriented_offset(&self) -> (u16, u16) {
        let (x, y) = self.offset;
        if self.orientation.is_landscape() {
            (y, x)
        } else {
            (x, y)
        }
    }

    /// Full MADCTL byte (orientation + color order)
    pub fn madctl(&self) -> u8 {
        let order = match self.color_order {
            ColorOrder::Rgb => 0x00,
            ColorOrder::Bgr => MADCTL_BGR,
        };
        self.orientation.madctl() | order
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use st7789::{Builder, Dimensions, Orientation};
///
/// let config = Builder::new()
///     .dimensions(Dimensions::new(240, 280).unwrap())
///     .offset(0, 20)
///     .orientation(Orientation::Portrait)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.oriented_dimensions().height, 280);
/// ```
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    offset: (u16, u16),
    orientation: Orientation,
    invert_colors: bool,
    color_order: ColorOrder,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            dimensions: None,
            offset: (0, 0),
            orientation: Orientation::Portrait,
            invert_colors: true,
            color_order: ColorOrder::Rgb,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the offset of the visible area inside controller RAM
    pub fn offset(mut self, x: u16, y: u16) -> Self {
        self.offset = (x, y);
        self
    }

    /// Set scan orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Enable or disable color inversion
    pub fn invert_colors(mut self, invert: bool) -> Self {
        self.invert_colors = invert;
        self
    }

    /// Set subpixel order
    pub fn color_order(mut self, order: ColorOrder) -> Self {
        self.color_order = order;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set and
    /// `BuilderError::OffsetOutOfRange` if the offset pushes the visible area
    /// past the controller RAM.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let (x, y) = self.offset;
        if dimensions.width as u32 + x as u32 > MAX_COLUMNS as u32
            || dimensions.height as u32 + y as u32 > MAX_ROWS as u32
        {
            return Err(BuilderError::OffsetOutOfRange { x, y });
        }
        Ok(Config {
            dimensions,
            offset: self.offset,
            orientation: self.orientation,
            invert_colors: self.invert_colors,
            color_order: self.color_order,
        })
    }
}
