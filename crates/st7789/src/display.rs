//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::*;
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Pixels converted to bytes per SPI transfer in [`Display::write_pixels`]
const PIXEL_CHUNK: usize = 64;

/// Core display driver for ST7789
///
/// Exposes the windowed write protocol used by partial-update framebuffers:
/// [`start_write`](Self::start_write), [`write_addr_window`](Self::write_addr_window),
/// [`write_pixels`](Self::write_pixels), [`end_write`](Self::end_write).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Inside a start_write/end_write session
    writing: bool,
    /// Whether the controller is in sleep mode
    sleeping: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            writing: false,
            sleeping: true,
        }
    }

    /// Perform hardware reset, software reset, and initialization
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.interface.reset(delay);

        self.send_command(SOFT_RESET)?;
        delay.delay_ms(150);

        self.send_command(SLEEP_OUT)?;
        delay.delay_ms(120);
        self.sleeping = false;

        self.send_command(PIXEL_FORMAT)?;
        self.send_data(&[PIXEL_FORMAT_RGB565])?;

        self.send_command(MEMORY_ACCESS_CONTROL)?;
        self.send_data(&[self.config.madctl()])?;

        self.send_command(if self.config.invert_colors {
            INVERT_ON
        } else {
            INVERT_OFF
        })?;

        self.send_command(NORMAL_MODE)?;
        delay.delay_ms(10);

        self.send_command(DISPLAY_ON)?;
        delay.delay_ms(10);

        log::debug!(
            "st7789 ready: {}x{} offset {:?} madctl {:#04x}",
            self.config.dimensions.width,
            self.config.dimensions.height,
            self.config.offset,
            self.config.madctl()
        );
        Ok(())
    }

    /// Begin a write session
    pub fn start_write(&mut self) {
        self.writing = true;
    }

    /// End the current write session
    pub fn end_write(&mut self) {
        self.writing = false;
    }

    /// Whether a write session is open
    pub fn is_writing(&self) -> bool {
        self.writing
    }

    /// Declare the window that subsequent pixel data targets
    ///
    /// Coordinates are in oriented panel space; the RAM offset is applied here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WindowOutOfBounds`] if the window is empty or does not
    /// fit on the panel.
    pub fn write_addr_window(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), Error<I>> {
        let dims = self.config.oriented_dimensions();
        if width == 0
            || height == 0
            || x as u32 + width as u32 > dims.width as u32
            || y as u32 + height as u32 > dims.height as u32
        {
            return Err(Error::WindowOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        let (off_x, off_y) = self.config.oriented_offset();
        let x_start = x + off_x;
        let x_end = x_start + width - 1;
        let y_start = y + off_y;
        let y_end = y_start + height - 1;

        self.send_command(COLUMN_ADDRESS_SET)?;
        self.send_data(&[
            (x_start >> 8) as u8,
            x_start as u8,
            (x_end >> 8) as u8,
            x_end as u8,
        ])?;

        self.send_command(ROW_ADDRESS_SET)?;
        self.send_data(&[
            (y_start >> 8) as u8,
            y_start as u8,
            (y_end >> 8) as u8,
            y_end as u8,
        ])?;

        self.send_command(MEMORY_WRITE)
    }

    /// Stream RGB565 pixels into the current window (big-endian on the wire)
    pub fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Error<I>> {
        let mut bytes = [0u8; PIXEL_CHUNK * 2];
        for chunk in pixels.chunks(PIXEL_CHUNK) {
            for (dst, px) in bytes.chunks_exact_mut(2).zip(chunk) {
                dst.copy_from_slice(&px.to_be_bytes());
            }
            self.send_data(&bytes[..chunk.len() * 2])?;
        }
        Ok(())
    }

    /// Repeat one color over `count` pixels of the current window
    pub fn write_repeated(&mut self, color: u16, count: usize) -> Result<(), Error<I>> {
        let mut bytes = [0u8; PIXEL_CHUNK * 2];
        for dst in bytes.chunks_exact_mut(2) {
            dst.copy_from_slice(&color.to_be_bytes());
        }
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(PIXEL_CHUNK);
            self.send_data(&bytes[..n * 2])?;
            remaining -= n;
        }
        Ok(())
    }

    /// Fill the whole panel with one color
    pub fn fill_screen(&mut self, color: u16) -> Result<(), Error<I>> {
        let dims = self.config.oriented_dimensions();
        self.start_write();
        let result = self
            .write_addr_window(0, 0, dims.width, dims.height)
            .and_then(|()| self.write_repeated(color, dims.pixel_count()));
        self.end_write();
        result
    }

    /// Enter sleep mode
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        if self.sleeping {
            return Ok(());
        }
        self.send_command(DISPLAY_OFF)?;
        self.send_command(SLEEP_IN)?;
        delay.delay_ms(5);
        self.sleeping = true;
        Ok(())
    }

    /// Leave sleep mode
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        if !self.sleeping {
            return Ok(());
        }
        self.send_command(SLEEP_OUT)?;
        delay.delay_ms(120);
        self.send_command(DISPLAY_ON)?;
        self.sleeping = false;
        Ok(())
    }

    /// Whether the controller is sleeping
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> Result<(), Error<I>> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> Result<(), Error<I>> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Visible dimensions after orientation
    pub fn dimensions(&self) -> Dimensions {
        self.config.oriented_dimensions()
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    #[cfg(test)]
    pub(crate) fn interface_ref(&self) -> &I {
        &self.interface
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{Builder, Orientation};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Op {
        Command(u8),
        Data(Vec<u8>),
        Reset,
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingInterface {
        pub(crate) ops: Vec<Op>,
    }

    impl RecordingInterface {
        /// All data bytes sent after the last occurrence of `cmd`
        pub(crate) fn data_after(&self, cmd: u8) -> Vec<u8> {
            let start = self
                .ops
                .iter()
                .rposition(|op| *op == Op::Command(cmd))
                .expect("command was sent");
            self.ops[start + 1..]
                .iter()
                .take_while(|op| matches!(op, Op::Data(_)))
                .flat_map(|op| match op {
                    Op::Data(bytes) => bytes.clone(),
                    _ => Vec::new(),
                })
                .collect()
        }
    }

    impl DisplayInterface for RecordingInterface {
        type Error = Infallible;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.ops.push(Op::Command(command));
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.ops.push(Op::Data(data.to_vec()));
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
            self.ops.push(Op::Reset);
        }
    }

    pub(crate) struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    pub(crate) fn display_240x280() -> Display<RecordingInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 280).unwrap())
            .offset(0, 20)
            .build()
            .unwrap();
        Display::new(RecordingInterface::default(), config)
    }

    #[test]
    fn init_sequence() {
        let mut display = display_240x280();
        display.init(&mut NoDelay).unwrap();
        let commands: Vec<u8> = display
            .interface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Command(c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(display.interface.ops[0], Op::Reset);
        assert_eq!(
            commands,
            vec![
                SOFT_RESET,
                SLEEP_OUT,
                PIXEL_FORMAT,
                MEMORY_ACCESS_CONTROL,
                INVERT_ON,
                NORMAL_MODE,
                DISPLAY_ON
            ]
        );
        assert_eq!(display.interface.data_after(PIXEL_FORMAT), vec![0x55]);
        assert!(!display.is_sleeping());
    }

    #[test]
    fn address_window_applies_offset() {
        let mut display = display_240x280();
        display.write_addr_window(24, 12, 192, 3).unwrap();
        assert_eq!(
            display.interface.data_after(COLUMN_ADDRESS_SET),
            vec![0, 24, 0, 215]
        );
        // rows 12..=14 shifted by the 20-row offset
        assert_eq!(
            display.interface.data_after(ROW_ADDRESS_SET),
            vec![0, 32, 0, 34]
        );
        assert_eq!(display.interface.ops.last(), Some(&Op::Command(MEMORY_WRITE)));
    }

    #[test]
    fn address_window_rejects_off_panel() {
        let mut display = display_240x280();
        assert!(matches!(
            display.write_addr_window(200, 0, 41, 1),
            Err(Error::WindowOutOfBounds { .. })
        ));
        assert!(display.write_addr_window(0, 0, 0, 1).is_err());
        assert!(display.interface.ops.is_empty());
    }

    #[test]
    fn landscape_window_uses_swapped_bounds() {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 280).unwrap())
            .offset(0, 20)
            .orientation(Orientation::Landscape)
            .build()
            .unwrap();
        let mut display = Display::new(RecordingInterface::default(), config);
        assert!(display.write_addr_window(0, 0, 280, 240).is_ok());
        assert_eq!(
            display.interface.data_after(COLUMN_ADDRESS_SET),
            vec![0, 20, 1, 43]
        );
    }

    #[test]
    fn pixels_are_big_endian_and_chunked() {
        let mut display = display_240x280();
        let pixels: Vec<u16> = (0..100u16).map(|i| 0xF800 | i).collect();
        display.write_pixels(&pixels).unwrap();
        let chunks: Vec<usize> = display
            .interface
            .ops
            .iter()
            .map(|op| match op {
                Op::Data(bytes) => bytes.len(),
                _ => 0,
            })
            .collect();
        assert_eq!(chunks, vec![128, 72]);
        match &display.interface.ops[0] {
            Op::Data(bytes) => assert_eq!(&bytes[..4], &[0xF8, 0x00, 0xF8, 0x01]),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn fill_screen_covers_panel() {
        let mut display = display_240x280();
        display.fill_screen(0xFFFF).unwrap();
        let sent: usize = display
            .interface
            .ops
            .iter()
            .skip_while(|op| **op != Op::Command(MEMORY_WRITE))
            .map(|op| match op {
                Op::Data(bytes) => bytes.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(sent, 240 * 280 * 2);
        assert!(!display.is_writing());
    }

    #[test]
    fn sleep_and_wake_are_idempotent() {
        let mut display = display_240x280();
        display.init(&mut NoDelay).unwrap();
        display.sleep(&mut NoDelay).unwrap();
        let after_sleep = display.interface.ops.len();
        display.sleep(&mut NoDelay).unwrap();
        assert_eq!(display.interface.ops.len(), after_sleep);
        display.wake(&mut NoDelay).unwrap();
        assert!(!display.is_sleeping());
    }
}
