//! RGB565 helpers
//!
//! Pixels are plain `u16`: 5 bits red, 6 bits green, 5 bits blue, red in the
//! high bits.

pub const BLACK: u16 = 0x0000;
pub const WHITE: u16 = 0xFFFF;
pub const RED: u16 = 0xF800;
pub const GREEN: u16 = 0x07E0;
pub const BLUE: u16 = 0x001F;
pub const YELLOW: u16 = 0xFFE0;
pub const CYAN: u16 = 0x07FF;
pub const MAGENTA: u16 = 0xF81F;

/// Pack 8-bit components, dropping the low bits
pub const fn color565(r: u8, g: u8, b: u8) -> u16 {
    (((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16)
}

/// Expand to 8-bit components, replicating high bits into the low ones
pub const fn components(color: u16) -> (u8, u8, u8) {
    let r = ((color >> 11) & 0x1F) as u8;
    let g = ((color >> 5) & 0x3F) as u8;
    let b = (color & 0x1F) as u8;
    ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}

#[cfg(feature = "graphics")]
pub use embedded_graphics_core::pixelcolor::Rgb565;

#[cfg(feature = "graphics")]
pub fn to_rgb565(color: u16) -> Rgb565 {
    use embedded_graphics_core::pixelcolor::raw::RawU16;
    Rgb565::from(RawU16::new(color))
}

#[cfg(feature = "graphics")]
pub fn from_rgb565(color: Rgb565) -> u16 {
    use embedded_graphics_core::pixelcolor::IntoStorage;
    color.into_storage()
}
