//! Sprite sheet addressing
//!
//! A sheet is one row-major RGB565 image holding equally sized tiles, laid
//! out left to right then top to bottom.

/// Scanline `pixel_row` of tile `tile_index` in a `sheet_w`-wide sheet
///
/// The sheet has `sheet_w / tile_w` tile columns. Returns `None` instead of
/// reading past the sheet when the tile or row is out of range.
pub fn sprite_sheet_tile_row(
    sheet: &[u16],
    sheet_w: usize,
    tile_w: usize,
    tile_h: usize,
    tile_index: usize,
    pixel_row: usize,
) -> Option<&[u16]> {
    if tile_w == 0 || pixel_row >= tile_h {
        return None;
    }
    let columns = sheet_w / tile_w;
    if columns == 0 {
        return None;
    }
    let tile_x = (tile_index % columns) * tile_w;
    let tile_y = (tile_index / columns) * tile_h;
    let start = (tile_y + pixel_row)
        .checked_mul(sheet_w)?
        .checked_add(tile_x)?;
    sheet.get(start..start.checked_add(tile_w)?)
}

/// Borrowed sprite sheet with a fixed tile grid
#[derive(Debug, Clone, Copy)]
pub struct SpriteSheet<'a> {
    pixels: &'a [u16],
    width: usize,
    tile_width: usize,
    tile_height: usize,
}

impl<'a> SpriteSheet<'a> {
    pub fn new(pixels: &'a [u16], width: usize, tile_width: usize, tile_height: usize) -> Self {
        Self {
            pixels,
            width,
            tile_width,
            tile_height,
        }
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    pub fn tile_height(&self) -> usize {
        self.tile_height
    }

    /// Tile columns per sheet row
    pub fn columns(&self) -> usize {
        self.width.checked_div(self.tile_width).unwrap_or(0)
    }

    /// Complete tiles in the sheet
    pub fn tile_count(&self) -> usize {
        let height = self.pixels.len().checked_div(self.width).unwrap_or(0);
        self.columns() * height.checked_div(self.tile_height).unwrap_or(0)
    }

    pub fn tile_row(&self, tile_index: usize, pixel_row: usize) -> Option<&'a [u16]> {
        sprite_sheet_tile_row(
            self.pixels,
            self.width,
            self.tile_width,
            self.tile_height,
            tile_index,
            pixel_row,
        )
    }
}
