//! Rotated RGB565 framebuffer with incremental flushing
//!
//! Drawing happens in logical coordinates. Every primitive records which
//! physical rows it touched; [`Framebuffer::end_frame`] then sends only those
//! rows, merged into as few address windows as possible.
//!
//! ```
//! use speccy_fb::{Framebuffer, PanelMirror, color};
//!
//! let mut fb = Framebuffer::speccy().unwrap();
//! let mut panel = PanelMirror::new(192, 256);
//!
//! // first frame paints everything once
//! fb.end_frame(&mut panel, 0, 0, false).unwrap();
//!
//! fb.start_frame();
//! fb.plot(5, 0, color::WHITE);
//! let stats = fb.end_frame(&mut panel, 0, 0, false).unwrap();
//! assert_eq!(stats.runs, 1);
//! assert_eq!(stats.rows, 1);
//! ```

extern crate alloc;

use alloc::vec::Vec;

use crate::config::{Config, Dimensions};
use crate::dirty::DirtyRows;
use crate::error::Error;
use crate::geometry::{clip_span, Layout};
use crate::sink::PixelSink;
use crate::sprite::SpriteSheet;

/// What one [`Framebuffer::end_frame`] sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Address windows issued
    pub runs: usize,
    /// Physical rows transferred
    pub rows: usize,
    /// Pixels transferred
    pub pixels: usize,
}

/// Double-buffered dirty-row framebuffer
///
/// Owns one heap pixel store of `width * height` RGB565 values, transposed:
/// physical row `x` holds logical column `x` from the bottom (`y = height - 1`)
/// up.
pub struct Framebuffer {
    layout: Layout,
    dimensions: Dimensions,
    pixels: Vec<u16>,
    dirty: DirtyRows,
    background: u16,
}

impl Framebuffer {
    /// Allocate the store and clear it to `config.background`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the allocation fails; nothing is kept.
    pub fn init(config: Config) -> Result<Self, Error> {
        let layout = Layout::new(config.dimensions);
        let len = layout.pixel_count();

        let mut pixels = Vec::new();
        if pixels.try_reserve_exact(len).is_err() {
            log::warn!("framebuffer allocation of {} bytes failed", len * 2);
            return Err(Error::OutOfMemory { bytes: len * 2 });
        }
        pixels.resize(len, 0);
        let dirty = DirtyRows::new(layout.rows())?;

        log::debug!(
            "framebuffer {}x{} allocated ({} bytes)",
            config.dimensions.width,
            config.dimensions.height,
            len * 2
        );

        let mut fb = Self {
            layout,
            dimensions: config.dimensions,
            pixels,
            dirty,
            background: config.background,
        };
        fb.clear(config.background);
        Ok(fb)
    }

    /// 256x192 surface cleared to black
    pub fn speccy() -> Result<Self, Error> {
        Self::init(Config::default())
    }

    /// Begin a frame: forget which rows changed
    pub fn start_frame(&mut self) {
        self.dirty.reset_current();
    }

    /// Fill everything with `color`, make it the background and force the
    /// next `end_frame` to repaint the whole panel
    pub fn clear(&mut self, color: u16) {
        self.pixels.fill(color);
        self.background = color;
        self.dirty.mark_all();
        log::debug!("framebuffer cleared to {color:#06x}");
    }

    /// Set one pixel; off-surface coordinates are ignored
    ///
    /// The row is only marked dirty when the stored value actually changes.
    pub fn plot(&mut self, x: i32, y: i32, color: u16) {
        let Some(cell) = self.layout.locate(x, y) else {
            return;
        };
        let index = self.layout.index(cell);
        if self.pixels[index] != color {
            self.pixels[index] = color;
            self.dirty.mark(cell.row);
        }
    }

    /// Bresenham line, both endpoints inclusive
    pub fn write_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        let (mut x, mut y) = (i64::from(x0), i64::from(y0));
        let (x1, y1) = (i64::from(x1), i64::from(y1));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x as i32, y as i32, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Horizontal span of `w` pixels starting at `(x, y)`
    pub fn hline(&mut self, x: i32, y: i32, w: i32, color: u16) {
        let Some(ys) = clip_span(y, 1, self.layout.row_len()) else {
            return;
        };
        let Some(rows) = clip_span(x, w, self.layout.rows()) else {
            return;
        };
        let column = self.layout.column_of(ys.start);
        let row_len = self.layout.row_len();
        for row in rows.clone() {
            self.pixels[row * row_len + column] = color;
        }
        self.dirty.mark_range(rows);
    }

    /// Vertical span of `h` pixels starting at `(x, y)`
    pub fn vline(&mut self, x: i32, y: i32, h: i32, color: u16) {
        self.fill_rect(x, y, 1, h, color);
    }

    /// Filled rectangle, clipped to the surface
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        let Some(rows) = clip_span(x, w, self.layout.rows()) else {
            return;
        };
        let Some(ys) = clip_span(y, h, self.layout.row_len()) else {
            return;
        };
        // logical y grows toward lower columns
        let first_column = self.layout.column_of(ys.end - 1);
        let last_column = self.layout.column_of(ys.start);
        let row_len = self.layout.row_len();
        for row in rows.clone() {
            let base = row * row_len;
            self.pixels[base + first_column..=base + last_column].fill(color);
        }
        self.dirty.mark_range(rows);
    }

    /// One-pixel rectangle outline
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        if w <= 0 || h <= 0 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        self.hline(x, y, w, color);
        self.hline(x, bottom, w, color);
        self.vline(x, y, h, color);
        self.vline(right, y, h, color);
    }

    /// Nearest-neighbour scaled blit centered on `(center_x, center_y)`
    ///
    /// `image` is row-major `src_w * src_h`. The destination is
    /// `round(src * scale)` on each side; a scale that rounds to zero draws
    /// nothing. Every pixel goes through [`plot`](Self::plot), so unchanged
    /// pixels stay clean.
    pub fn write_image_scaled(
        &mut self,
        image: &[u16],
        src_w: usize,
        src_h: usize,
        center_x: i32,
        center_y: i32,
        scale: f32,
    ) {
        let dst_w = (src_w as f32 * scale + 0.5) as i64;
        let dst_h = (src_h as f32 * scale + 0.5) as i64;
        if dst_w <= 0 || dst_h <= 0 || src_w == 0 || src_h == 0 {
            return;
        }
        let x0 = i64::from(center_x) - (dst_w >> 1);
        let y0 = i64::from(center_y) - (dst_h >> 1);

        // only walk destination pixels that land on the surface
        let dy_range = (-y0).max(0)..dst_h.min(self.layout.row_len() as i64 - y0);
        let dx_range = (-x0).max(0)..dst_w.min(self.layout.rows() as i64 - x0);

        for dy in dy_range {
            let sy = nearest(dy, src_h, dst_h);
            for dx in dx_range.clone() {
                let sx = nearest(dx, src_w, dst_w);
                let Some(index) = sy.checked_mul(src_w).and_then(|i| i.checked_add(sx)) else {
                    continue;
                };
                if let Some(&px) = image.get(index) {
                    self.plot((x0 + dx) as i32, (y0 + dy) as i32, px);
                }
            }
        }
    }

    /// Draw one tile of a sprite sheet with its top-left at `(x, y)`
    pub fn write_tile(&mut self, sheet: &SpriteSheet<'_>, tile_index: usize, x: i32, y: i32) {
        for pixel_row in 0..sheet.tile_height() {
            let Some(line) = sheet.tile_row(tile_index, pixel_row) else {
                return;
            };
            let py = y.saturating_add(pixel_row as i32);
            for (i, &px) in line.iter().enumerate() {
                self.plot(x.saturating_add(i as i32), py, px);
            }
        }
    }

    /// Push changed rows to `sink` and finish the frame
    ///
    /// Rows dirty this frame (plus, with `clear_after`, rows dirty last frame)
    /// are merged into contiguous runs. Each run becomes one
    /// `write_addr_window(origin_x, origin_y + first_row, row_len, run_len)`
    /// and one `write_pixels`. With `clear_after`, once every run has gone out
    /// the sent rows are reset to the background color, so content that is
    /// not redrawn next frame is wiped from the panel on the following flush.
    ///
    /// # Errors
    ///
    /// Sink errors are returned as-is. The session is still closed with
    /// `end_write`, and the dirty state is left as it was so the flush can be
    /// retried.
    pub fn end_frame<S: PixelSink>(
        &mut self,
        sink: &mut S,
        origin_x: u16,
        origin_y: u16,
        clear_after: bool,
    ) -> Result<FrameStats, S::Error> {
        sink.start_write();
        let result = self.transmit(sink, origin_x, origin_y, clear_after);
        if result.is_ok() {
            if clear_after {
                self.wipe_sent_rows();
            }
            self.dirty.advance();
        }
        sink.end_write();

        if let Ok(stats) = &result {
            log::trace!(
                "frame flushed: {} runs, {} rows, {} px",
                stats.runs,
                stats.rows,
                stats.pixels
            );
        }
        result
    }

    fn transmit<S: PixelSink>(
        &mut self,
        sink: &mut S,
        origin_x: u16,
        origin_y: u16,
        clear_after: bool,
    ) -> Result<FrameStats, S::Error> {
        let Self {
            layout,
            pixels,
            dirty,
            ..
        } = self;
        let row_len = layout.row_len() as u16;
        let mut stats = FrameStats::default();

        for run in dirty.runs(clear_after) {
            let span = layout.row_span(run.rows());
            sink.write_addr_window(
                origin_x,
                origin_y.saturating_add(run.start as u16),
                row_len,
                run.len as u16,
            )?;
            sink.write_pixels(&pixels[span.clone()])?;

            log::trace!("run rows {}..{}", run.start, run.start + run.len);
            stats.runs += 1;
            stats.rows += run.len;
            stats.pixels += span.len();
        }
        Ok(stats)
    }

    // Runs only once the whole frame is out, so a failed flush can be resent.
    fn wipe_sent_rows(&mut self) {
        let Self {
            layout,
            pixels,
            dirty,
            background,
            ..
        } = self;
        for run in dirty.runs(true) {
            pixels[layout.row_span(run.rows())].fill(*background);
        }
    }

    /// Read back a logical pixel
    pub fn pixel(&self, x: i32, y: i32) -> Option<u16> {
        let cell = self.layout.locate(x, y)?;
        self.pixels.get(self.layout.index(cell)).copied()
    }

    /// Whether physical row `row` changed this frame
    pub fn is_row_dirty(&self, row: usize) -> bool {
        self.dirty.is_dirty(row)
    }

    /// Physical rows changed this frame
    pub fn dirty_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.dirty.len()).filter(|&row| self.dirty.is_dirty(row))
    }

    /// Physical rows changed in the previous frame
    pub fn previous_dirty_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.dirty.len()).filter(|&row| self.dirty.was_dirty(row))
    }

    /// Color used by `clear_after` flushes
    pub fn background(&self) -> u16 {
        self.background
    }

    /// Logical surface size
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Raw transposed store, one physical row after another
    pub fn storage(&self) -> &[u16] {
        &self.pixels
    }
}

/// Source index for destination index `dst_i`: `round(dst_i * src / dst)`
fn nearest(dst_i: i64, src: usize, dst: i64) -> usize {
    let src = src as i128;
    let dst = i128::from(dst);
    let i = (i128::from(dst_i) * src + (dst >> 1)) / dst;
    // upscaling can round the last destination pixel one past the end
    i.min(src - 1) as usize
}
