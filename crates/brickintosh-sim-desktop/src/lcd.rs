//! Simulated 240x280 ST7789 panel
//!
//! Accepts the same windowed writes as the real controller and lands them in
//! a [`SimulatorDisplay`]. Pixels falling outside the LCD are dropped, as the
//! panel does with an oversized window.

use std::convert::Infallible;

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::SimulatorDisplay;
use speccy_fb::{AddrWindow, PixelSink};

pub const LCD_WIDTH: u32 = 240;
pub const LCD_HEIGHT: u32 = 280;

pub struct SimulatorLcd {
    display: SimulatorDisplay<Rgb565>,
    window: AddrWindow,
    cursor: usize,
    frames: usize,
}

impl SimulatorLcd {
    pub fn new() -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(LCD_WIDTH, LCD_HEIGHT)),
            window: AddrWindow {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            },
            cursor: 0,
            frames: 0,
        }
    }

    pub fn display(&self) -> &SimulatorDisplay<Rgb565> {
        &self.display
    }

    /// Completed write sessions
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Fill the whole LCD, like the controller's `fill_screen`
    pub fn fill_screen(&mut self, color: u16) {
        match self.display.clear(Rgb565::from(RawU16::new(color))) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.display.get_pixel(Point::new(x, y))
    }
}

impl Default for SimulatorLcd {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSink for SimulatorLcd {
    type Error = Infallible;

    fn start_write(&mut self) {}

    fn write_addr_window(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error> {
        self.window = AddrWindow {
            x,
            y,
            width,
            height,
        };
        self.cursor = 0;
        Ok(())
    }

    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Self::Error> {
        let window = self.window;
        let stride = window.width as usize;
        if stride == 0 {
            return Ok(());
        }
        let start = self.cursor;
        self.cursor += pixels.len();

        let lcd = Size::new(LCD_WIDTH, LCD_HEIGHT);
        let points = pixels.iter().enumerate().filter_map(|(i, &raw)| {
            let n = start + i;
            let x = window.x as i32 + (n % stride) as i32;
            let y = window.y as i32 + (n / stride) as i32;
            let on_lcd = x < lcd.width as i32 && y < lcd.height as i32;
            on_lcd.then(|| Pixel(Point::new(x, y), Rgb565::from(RawU16::new(raw))))
        });
        self.display.draw_iter(points)
    }

    fn end_write(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn pixels_fill_window_row_major() {
        let mut lcd = SimulatorLcd::new();
        lcd.start_write();
        lcd.write_addr_window(10, 20, 2, 2).unwrap();
        lcd.write_pixels(&[0xF800, 0x07E0, 0x001F, 0xFFFF]).unwrap();
        lcd.end_write();

        assert_eq!(lcd.pixel(10, 20), Rgb565::RED);
        assert_eq!(lcd.pixel(11, 20), Rgb565::GREEN);
        assert_eq!(lcd.pixel(10, 21), Rgb565::BLUE);
        assert_eq!(lcd.pixel(11, 21), Rgb565::WHITE);
        assert_eq!(lcd.frames(), 1);
    }

    #[test]
    fn fill_screen_paints_every_pixel() {
        let mut lcd = SimulatorLcd::new();
        lcd.fill_screen(0x001F);
        assert_eq!(lcd.pixel(0, 0), Rgb565::BLUE);
        assert_eq!(lcd.pixel(239, 279), Rgb565::BLUE);
        assert_eq!(lcd.frames(), 0);
    }

    #[test]
    fn oversized_window_is_clipped() {
        let mut lcd = SimulatorLcd::new();
        lcd.start_write();
        lcd.write_addr_window(239, 279, 2, 2).unwrap();
        lcd.write_pixels(&[0xFFFF; 4]).unwrap();
        lcd.end_write();
        assert_eq!(lcd.pixel(239, 279), Rgb565::WHITE);
        assert_eq!(lcd.pixel(238, 279), Rgb565::BLACK);
    }

    #[test]
    fn framebuffer_lands_at_origin() {
        let mut fb = speccy_fb::Framebuffer::speccy().unwrap();
        let mut lcd = SimulatorLcd::new();
        fb.plot(0, 0, speccy_fb::color::RED);
        fb.end_frame(&mut lcd, 24, 12, false).unwrap();
        // logical (0, 0) is the last pixel of the first physical row
        assert_eq!(lcd.pixel(24 + 191, 12), Rgb565::RED);
        assert_eq!(lcd.pixel(24, 12), Rgb565::BLACK);
    }
}
