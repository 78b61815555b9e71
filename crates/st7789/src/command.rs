// ST7789 command definitions

// System
pub const SOFT_RESET: u8 = 0x01; // Software reset
pub const SLEEP_IN: u8 = 0x10; // Enter sleep mode
pub const SLEEP_OUT: u8 = 0x11; // Exit sleep mode
pub const NORMAL_MODE: u8 = 0x13; // Normal display mode on
pub const INVERT_OFF: u8 = 0x20; // Display inversion off
pub const INVERT_ON: u8 = 0x21; // Display inversion on
pub const DISPLAY_OFF: u8 = 0x28; // Display off
pub const DISPLAY_ON: u8 = 0x29; // Display on

// Memory access
pub const COLUMN_ADDRESS_SET: u8 = 0x2A; // CASET
pub const ROW_ADDRESS_SET: u8 = 0x2B; // RASET
pub const MEMORY_WRITE: u8 = 0x2C; // RAMWR
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36; // MADCTL
pub const PIXEL_FORMAT: u8 = 0x3A; // COLMOD

// COLMOD: 65K colors, 16 bits per pixel
pub const PIXEL_FORMAT_RGB565: u8 = 0x55;

// MADCTL bits
pub const MADCTL_MY: u8 = 0x80; // Row address order
pub const MADCTL_MX: u8 = 0x40; // Column address order
pub const MADCTL_MV: u8 = 0x20; // Row/column exchange
pub const MADCTL_BGR: u8 = 0x08; // BGR subpixel order
