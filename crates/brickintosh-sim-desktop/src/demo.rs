//! Demo scene: a pulsing brick, a sweeping line and a few wall tiles
//!
//! Everything is redrawn every frame, so the scene is meant to run with
//! clear-after flushes.

use speccy_fb::color::{self, color565};
use speccy_fb::{Framebuffer, SpriteSheet, LOGICAL_HEIGHT, LOGICAL_WIDTH};

pub const TILE: usize = 16;
const SHEET_WIDTH: usize = TILE * 2;

const MORTAR: u16 = color565(150, 150, 140);
const WALL_TILES: u32 = 4;
const SWEEP_SLANT: i32 = 12;

/// Two 16x16 brick tiles side by side: red and weathered
pub fn brick_sheet() -> Vec<u16> {
    let faces = [color565(178, 34, 34), color565(120, 60, 40)];
    let mut sheet = Vec::with_capacity(SHEET_WIDTH * TILE);
    for y in 0..TILE {
        for x in 0..SHEET_WIDTH {
            let tile = x / TILE;
            let tx = x % TILE;
            // courses are 8 rows; alternate courses shift the joint by half
            let joint = if (y / 8) % 2 == 0 { 0 } else { TILE / 2 };
            let mortar = y % 8 == 7 || tx == joint || tx == joint + TILE - 1;
            sheet.push(if mortar { MORTAR } else { faces[tile] });
        }
    }
    sheet
}

/// Frame-indexed scene state
pub struct Scene {
    sheet: Vec<u16>,
    brick: Vec<u16>,
    frame: u32,
}

impl Scene {
    pub fn new() -> Self {
        let sheet = brick_sheet();
        let tiles = SpriteSheet::new(&sheet, SHEET_WIDTH, TILE, TILE);
        let brick: Vec<u16> = (0..TILE)
            .filter_map(|row| tiles.tile_row(0, row))
            .flatten()
            .copied()
            .collect();
        Self {
            sheet,
            brick,
            frame: 0,
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Sprite scale for frame `frame`, pulsing between 1x and 4x
    pub fn scale_at(frame: u32) -> f32 {
        let phase = (frame % 90) as f32 / 90.0 * core::f32::consts::TAU;
        2.5 - 1.5 * phase.cos()
    }

    /// Draw the current frame and advance
    pub fn draw(&mut self, fb: &mut Framebuffer) {
        let w = LOGICAL_WIDTH as i32;
        let h = LOGICAL_HEIGHT as i32;
        let frame = self.frame;

        // short wall in the bottom-left corner, tiles alternate every 15 frames
        let sheet = SpriteSheet::new(&self.sheet, SHEET_WIDTH, TILE, TILE);
        let wall_y = h - TILE as i32;
        for i in 0..WALL_TILES {
            let tile = (i + frame / 15) as usize % sheet.tile_count();
            fb.write_tile(&sheet, tile, i as i32 * TILE as i32, wall_y);
        }

        let sweep = (frame % LOGICAL_WIDTH as u32) as i32;
        fb.write_line(sweep, 0, sweep + SWEEP_SLANT, wall_y - 1, color::YELLOW);

        fb.write_image_scaled(
            &self.brick,
            TILE,
            TILE,
            w / 2,
            h / 2 - 8,
            Self::scale_at(frame),
        );

        self.frame = self.frame.wrapping_add(1);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
