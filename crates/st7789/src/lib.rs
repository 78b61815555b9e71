//! ST7789 TFT Display Driver
//!
//! A driver for the ST7789 RGB565 LCD controller found on small IPS modules
//! (240x240, 240x280, 240x320).
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Windowed partial writes (`start_write` / `write_addr_window` /
//!   `write_pixels` / `end_write`)
//! - Panel RAM offsets and orientation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use st7789::{Builder, Dimensions, Display, DisplayInterface, Error, Interface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst);
//! let dims = match Dimensions::new(240, 280) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).offset(0, 20).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! fn show<I: DisplayInterface>(display: &mut Display<I>, delay: &mut impl DelayNs) -> Result<(), Error<I>> {
//!     display.init(delay)?;
//!     display.start_write();
//!     display.write_addr_window(0, 0, 2, 1)?;
//!     display.write_pixels(&[0xF800, 0x001F])?;
//!     display.end_write();
//!     Ok(())
//! }
//!
//! let mut display = Display::new(interface, config);
//! assert!(show(&mut display, &mut delay).is_ok());
//! ```

#![no_std]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::unwrap_used
    )
)]

#[cfg(test)]
extern crate alloc;

/// ST7789 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// embedded-graphics integration
#[cfg(feature = "graphics")]
pub mod graphics;
/// Hardware interface abstraction
pub mod interface;

pub use config::{Builder, ColorOrder, Config, Dimensions, Orientation};
pub use display::Display;
pub use error::{BuilderError, Error, MAX_COLUMNS, MAX_ROWS};
pub use interface::{DisplayInterface, Interface, InterfaceError};

/// Pack 8-bit RGB components into RGB565
///
/// ```
/// assert_eq!(st7789::color565(255, 0, 0), 0xF800);
/// assert_eq!(st7789::color565(255, 255, 255), 0xFFFF);
/// ```
pub const fn color565(r: u8, g: u8, b: u8) -> u16 {
    (((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::convert::Infallible;
    use embedded_hal::spi::{Operation, SpiDevice};

    #[derive(Default)]
    struct CaptureSpi {
        writes: Vec<Vec<u8>>,
    }

    impl embedded_hal::spi::ErrorType for CaptureSpi {
        type Error = Infallible;
    }

    impl SpiDevice for CaptureSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push(bytes.to_vec());
                }
            }
            Ok(())
        }
    }

    struct Pin;

    impl embedded_hal::digital::ErrorType for Pin {
        type Error = Infallible;
    }

    impl embedded_hal::digital::OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn interface_forwards_bytes() {
        let mut interface = Interface::new(CaptureSpi::default(), Pin, Pin);
        interface.send_command(command::MEMORY_WRITE).unwrap();
        interface.send_data(&[0xF8, 0x00]).unwrap();
        let (spi, _, _) = interface.release();
        assert_eq!(spi.writes, [Vec::from([0x2C]), Vec::from([0xF8, 0x00])]);
    }

    #[test]
    fn color565_packs_components() {
        assert_eq!(color565(0, 0, 0), 0x0000);
        assert_eq!(color565(0, 255, 0), 0x07E0);
        assert_eq!(color565(0, 0, 255), 0x001F);
    }
}
