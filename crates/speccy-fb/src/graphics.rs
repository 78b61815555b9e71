//! Graphics support via embedded-graphics
//!
//! [`Framebuffer`] is a [`DrawTarget`] over logical coordinates, so text,
//! shapes and images from the embedded-graphics ecosystem mark rows dirty the
//! same way the built-in primitives do.
//!
//! ```
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use speccy_fb::Framebuffer;
//!
//! let mut fb = Framebuffer::speccy().unwrap();
//! fb.start_frame();
//! Rectangle::new(Point::new(100, 60), Size::new(20, 10))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::YELLOW))
//!     .draw(&mut fb)
//!     .unwrap();
//! assert_eq!(fb.dirty_rows().count(), 20);
//! ```

use core::convert::Infallible;

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{IntoStorage, Rgb565},
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::framebuffer::Framebuffer;

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.plot(point.x, point.y, color.into_storage());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_rect(
            area.top_left.x,
            area.top_left.y,
            area.size.width.min(i32::MAX as u32) as i32,
            area.size.height.min(i32::MAX as u32) as i32,
            color.into_storage(),
        );
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Framebuffer::clear(self, color.into_storage());
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(dims.width as u32, dims.height as u32)
    }
}
