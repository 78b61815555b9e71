//! Host-side scenario test harness for scripted framebuffer sequences.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, Instant};

use png::{BitDepth, ColorType, Encoder};
use speccy_fb::color::components;
use speccy_fb::{Config, FrameStats, Framebuffer, PanelMirror, Transfer};

/// LCD size of the Brickintosh panel
pub const LCD_WIDTH: u16 = 240;
pub const LCD_HEIGHT: u16 = 280;

/// Small helper that couples a framebuffer with a mirrored panel.
pub struct ScenarioHarness {
    fb: Framebuffer,
    panel: PanelMirror,
    origin: (u16, u16),
    last: FrameStats,
    frames: usize,
}

impl ScenarioHarness {
    /// 256x192 framebuffer centered on the 240x280 LCD, as on the device.
    pub fn new() -> Self {
        Self::with_config(Config::default(), (LCD_WIDTH, LCD_HEIGHT), (24, 12))
    }

    /// Construct a harness with caller-provided framebuffer and panel geometry.
    pub fn with_config(config: Config, panel: (u16, u16), origin: (u16, u16)) -> Self {
        Self {
            fb: Framebuffer::init(config).expect("scenario framebuffer should allocate"),
            panel: PanelMirror::new(panel.0, panel.1),
            origin,
            last: FrameStats::default(),
            frames: 0,
        }
    }

    /// Run one full frame: start, draw, flush.
    pub fn frame(&mut self, clear_after: bool, draw: impl FnOnce(&mut Framebuffer)) -> FrameStats {
        self.fb.start_frame();
        draw(&mut self.fb);
        self.last = self
            .fb
            .end_frame(&mut self.panel, self.origin.0, self.origin.1, clear_after)
            .expect("scenario frame should flush");
        self.frames += 1;
        self.last
    }

    /// Run a frame and return elapsed wall time.
    pub fn frame_timed(
        &mut self,
        clear_after: bool,
        draw: impl FnOnce(&mut Framebuffer),
    ) -> Duration {
        let start = Instant::now();
        self.frame(clear_after, draw);
        start.elapsed()
    }

    /// Run a frame and assert wall-time budget in milliseconds.
    pub fn assert_frame_budget_ms(
        &mut self,
        clear_after: bool,
        max_ms: u128,
        label: &str,
        draw: impl FnOnce(&mut Framebuffer),
    ) {
        let elapsed = self.frame_timed(clear_after, draw);
        assert!(
            elapsed.as_millis() <= max_ms,
            "{} frame exceeded budget: {}ms > {}ms",
            label,
            elapsed.as_millis(),
            max_ms
        );
    }

    /// Stats of the most recent flush.
    pub fn last_stats(&self) -> FrameStats {
        self.last
    }

    /// Frames run so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Access the framebuffer for assertions.
    pub fn fb(&self) -> &Framebuffer {
        &self.fb
    }

    /// Access the framebuffer for setup outside a frame.
    pub fn fb_mut(&mut self) -> &mut Framebuffer {
        &mut self.fb
    }

    /// Access the mirrored panel.
    pub fn panel(&self) -> &PanelMirror {
        &self.panel
    }

    /// Drain the transfer log of the mirrored panel.
    pub fn take_transfers(&mut self) -> Vec<Transfer> {
        self.panel.take_transfers()
    }

    /// What the panel shows for logical pixel `(x, y)`.
    pub fn shown(&self, x: i32, y: i32) -> Option<u16> {
        let dims = self.fb.dimensions();
        if x < 0 || y < 0 || x >= dims.width as i32 || y >= dims.height as i32 {
            return None;
        }
        let column = (dims.height as i32 - 1) - y;
        self.panel.pixel(
            self.origin.0.checked_add(u16::try_from(column).ok()?)?,
            self.origin.1.checked_add(u16::try_from(x).ok()?)?,
        )
    }

    /// Count panel pixels of the given color.
    pub fn panel_pixel_count(&self, color: u16) -> usize {
        self.panel.pixels().iter().filter(|&&px| px == color).count()
    }

    /// Save the mirrored panel to an RGB PNG.
    pub fn save_screenshot_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let (width, height) = self.panel.dimensions();
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for &pixel in self.panel.pixels() {
            let (r, g, b) = components(pixel);
            data.extend_from_slice(&[r, g, b]);
        }

        let file = File::create(path).map_err(|e| e.to_string())?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, width as u32, height as u32);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut png_writer = encoder.write_header().map_err(|e| e.to_string())?;
        png_writer
            .write_image_data(&data)
            .map_err(|e| e.to_string())
    }
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new()
    }
}
