//! Output sink contract
//!
//! [`Framebuffer::end_frame`](crate::Framebuffer::end_frame) talks to the panel
//! only through [`PixelSink`]. The ST7789 driver implements it (with the
//! `st7789` feature), as do [`PanelMirror`](crate::panel::PanelMirror) and the
//! desktop simulator.

/// Rectangle declared by [`PixelSink::write_addr_window`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrWindow {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl AddrWindow {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Destination for incremental RGB565 transfers
///
/// Calls always arrive as one `start_write`, any number of
/// `write_addr_window` + `write_pixels` pairs, then one `end_write`.
/// Transfers are synchronous: a sink that blocks blocks the frame.
pub trait PixelSink {
    /// Transport error, handed back unchanged from `end_frame`
    type Error;

    /// Begin a scoped transfer session
    fn start_write(&mut self);

    /// Declare the region the next pixels fill, row-major
    fn write_addr_window(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error>;

    /// Stream packed RGB565 pixels into the declared window
    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Self::Error>;

    /// End the session; sinks may flush or present here
    fn end_write(&mut self);
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    type Error = S::Error;

    fn start_write(&mut self) {
        (**self).start_write();
    }

    fn write_addr_window(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error> {
        (**self).write_addr_window(x, y, width, height)
    }

    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Self::Error> {
        (**self).write_pixels(pixels)
    }

    fn end_write(&mut self) {
        (**self).end_write();
    }
}

#[cfg(feature = "st7789")]
impl<I> PixelSink for st7789::Display<I>
where
    I: st7789::DisplayInterface,
{
    type Error = st7789::Error<I>;

    fn start_write(&mut self) {
        st7789::Display::start_write(self);
    }

    fn write_addr_window(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error> {
        st7789::Display::write_addr_window(self, x, y, width, height)
    }

    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Self::Error> {
        st7789::Display::write_pixels(self, pixels)
    }

    fn end_write(&mut self) {
        st7789::Display::end_write(self);
    }
}

#[cfg(all(test, feature = "st7789"))]
mod tests {
    use crate::color::WHITE;
    use crate::{Framebuffer, PanelMirror};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::convert::Infallible;
    use embedded_hal::delay::DelayNs;

    /// Records commands and the data bytes that follow each one
    #[derive(Debug, Default)]
    struct ByteLog {
        log: Vec<(u8, Vec<u8>)>,
    }

    impl st7789::DisplayInterface for ByteLog {
        type Error = Infallible;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.log.push((command, Vec::new()));
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if let Some((_, bytes)) = self.log.last_mut() {
                bytes.extend_from_slice(data);
            }
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
    }

    #[test]
    fn dirty_row_reaches_the_controller() {
        let dims = st7789::Dimensions::new(240, 280).unwrap();
        let config = st7789::Builder::new()
            .dimensions(dims)
            .offset(0, 20)
            .build()
            .unwrap();
        let mut display = st7789::Display::new(ByteLog::default(), config);

        let mut fb = Framebuffer::speccy().unwrap();
        fb.end_frame(&mut PanelMirror::new(240, 280), 24, 12, false)
            .unwrap();
        fb.start_frame();
        fb.plot(5, 0, WHITE);
        fb.end_frame(&mut display, 24, 12, false).unwrap();
        assert!(!display.is_writing());

        let log = display.release().log;
        let commands: Vec<u8> = log.iter().map(|(cmd, _)| *cmd).collect();
        assert_eq!(
            commands,
            vec![
                st7789::command::COLUMN_ADDRESS_SET,
                st7789::command::ROW_ADDRESS_SET,
                st7789::command::MEMORY_WRITE
            ]
        );
        // columns 24..=215, row 12 + 5 plus the 20-row RAM offset
        assert_eq!(log[0].1, vec![0, 24, 0, 215]);
        assert_eq!(log[1].1, vec![0, 37, 0, 37]);
        let pixels = &log[2].1;
        assert_eq!(pixels.len(), 192 * 2);
        assert_eq!(&pixels[pixels.len() - 2..], &[0xFF, 0xFF]);
        assert!(pixels[..pixels.len() - 2].iter().all(|&b| b == 0));
    }
}
