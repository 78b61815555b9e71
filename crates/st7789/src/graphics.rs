//! Graphics support via embedded-graphics
//!
//! [`Display`](crate::display::Display) draws straight to controller RAM: every
//! solid fill becomes one address window plus a repeated color stream, and
//! single pixels become 1x1 windows. Callers that redraw often should render
//! into a framebuffer first and push only changed regions.

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions as _, OriginDimensions, Size},
    pixelcolor::{IntoStorage, Rgb565},
    prelude::Pixel,
    primitives::{PointsIter as _, Rectangle},
};

use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                self.write_addr_window(point.x as u16, point.y as u16, 1, 1)?;
                self.write_pixels(&[color.into_storage()])?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<Iter>(&mut self, area: &Rectangle, colors: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Self::Color>,
    {
        let clipped = area.intersection(&self.bounding_box());
        if clipped != *area || area.is_zero_sized() {
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }

        self.write_addr_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
        )?;
        let mut chunk = [0u16; 64];
        let mut len = 0;
        for color in colors.into_iter().take(area.size.width as usize * area.size.height as usize) {
            chunk[len] = color.into_storage();
            len += 1;
            if len == chunk.len() {
                self.write_pixels(&chunk)?;
                len = 0;
            }
        }
        self.write_pixels(&chunk[..len])
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        if clipped.is_zero_sized() {
            return Ok(());
        }
        self.write_addr_window(
            clipped.top_left.x as u16,
            clipped.top_left.y as u16,
            clipped.size.width as u16,
            clipped.size.height as u16,
        )?;
        self.write_repeated(
            color.into_storage(),
            clipped.size.width as usize * clipped.size.height as usize,
        )
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(dims.width as u32, dims.height as u32)
    }
}

#[cfg(test)]
mod tests {
    use crate::command::{COLUMN_ADDRESS_SET, MEMORY_WRITE, ROW_ADDRESS_SET};
    use crate::display::tests::{Op, display_240x280};
    use alloc::vec;
    use embedded_graphics_core::{
        draw_target::DrawTarget,
        geometry::{Point, Size},
        pixelcolor::Rgb565,
        prelude::*,
        primitives::Rectangle,
    };

    #[test]
    fn fill_solid_is_one_window() {
        let mut display = display_240x280();
        display
            .fill_solid(
                &Rectangle::new(Point::new(230, 270), Size::new(20, 20)),
                Rgb565::RED,
            )
            .unwrap();
        let windows = display_ops(&display)
            .iter()
            .filter(|op| **op == Op::Command(MEMORY_WRITE))
            .count();
        assert_eq!(windows, 1);
        let recorder = display.release();
        // clipped to 10x10 at (230, 270)
        assert_eq!(recorder.data_after(COLUMN_ADDRESS_SET), vec![0, 230, 0, 239]);
        assert_eq!(recorder.data_after(ROW_ADDRESS_SET), vec![1, 34, 1, 43]);
        assert_eq!(recorder.data_after(MEMORY_WRITE).len(), 10 * 10 * 2);
    }

    #[test]
    fn offscreen_pixels_are_skipped() {
        let mut display = display_240x280();
        display
            .draw_iter([
                Pixel(Point::new(-1, 0), Rgb565::WHITE),
                Pixel(Point::new(240, 0), Rgb565::WHITE),
            ])
            .unwrap();
        assert!(display_ops(&display).is_empty());
    }

    #[test]
    fn size_reports_oriented_dimensions() {
        let display = display_240x280();
        assert_eq!(display.size(), Size::new(240, 280));
    }

    fn display_ops(
        display: &crate::Display<crate::display::tests::RecordingInterface>,
    ) -> &[Op] {
        display.interface_ref().ops.as_slice()
    }
}
