//! In-memory panel for tests and host tooling.
//!
//! `PanelMirror` implements [`PixelSink`] the way the controller RAM behaves:
//! pixels land row-major inside the declared window. It also records every
//! window/transfer pair so tests can assert exactly what a frame sent.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::sink::{AddrWindow, PixelSink};

/// One `write_addr_window` and the pixels streamed into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub window: AddrWindow,
    pub pixels: usize,
}

/// Protocol violations caught by [`PanelMirror`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorError {
    /// Window or pixels sent outside `start_write` / `end_write`
    NoSession,
    /// Pixels sent before any window was declared
    NoWindow,
    /// Window extends past the panel
    WindowOutOfBounds(AddrWindow),
    /// More pixels than the window holds
    Overflow { window: AddrWindow, pixels: usize },
}

impl core::fmt::Display for MirrorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MirrorError::NoSession => write!(f, "Write outside a session"),
            MirrorError::NoWindow => write!(f, "Pixels sent before an address window"),
            MirrorError::WindowOutOfBounds(w) => write!(
                f,
                "Window {}x{} at ({}, {}) is off panel",
                w.width, w.height, w.x, w.y
            ),
            MirrorError::Overflow { window, pixels } => write!(
                f,
                "{pixels} pixels overflow a {}x{} window",
                window.width, window.height
            ),
        }
    }
}

impl core::error::Error for MirrorError {}

/// Panel memory model that allows overdraw and tracks transfers
pub struct PanelMirror {
    pixels: Vec<u16>,
    width: u16,
    height: u16,
    window: Option<AddrWindow>,
    cursor: usize,
    writing: bool,
    sessions: usize,
    transfers: Vec<Transfer>,
}

impl PanelMirror {
    /// Create a black panel with the given dimensions
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
            window: None,
            cursor: 0,
            writing: false,
            sessions: 0,
            transfers: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Panel contents, row-major
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Completed `start_write` / `end_write` pairs
    pub fn sessions(&self) -> usize {
        self.sessions
    }

    pub fn is_writing(&self) -> bool {
        self.writing
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Drain the transfer log
    pub fn take_transfers(&mut self) -> Vec<Transfer> {
        core::mem::take(&mut self.transfers)
    }
}

impl PixelSink for PanelMirror {
    type Error = MirrorError;

    fn start_write(&mut self) {
        self.writing = true;
    }

    fn write_addr_window(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error> {
        if !self.writing {
            return Err(MirrorError::NoSession);
        }
        let window = AddrWindow {
            x,
            y,
            width,
            height,
        };
        if width == 0
            || height == 0
            || x as u32 + width as u32 > self.width as u32
            || y as u32 + height as u32 > self.height as u32
        {
            return Err(MirrorError::WindowOutOfBounds(window));
        }
        self.window = Some(window);
        self.cursor = 0;
        self.transfers.push(Transfer { window, pixels: 0 });
        Ok(())
    }

    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), Self::Error> {
        if !self.writing {
            return Err(MirrorError::NoSession);
        }
        let window = self.window.ok_or(MirrorError::NoWindow)?;
        if self.cursor + pixels.len() > window.pixel_count() {
            return Err(MirrorError::Overflow {
                window,
                pixels: self.cursor + pixels.len(),
            });
        }

        let stride = window.width as usize;
        for (offset, &px) in pixels.iter().enumerate() {
            let n = self.cursor + offset;
            let x = window.x as usize + n % stride;
            let y = window.y as usize + n / stride;
            self.pixels[y * self.width as usize + x] = px;
        }
        self.cursor += pixels.len();
        if let Some(last) = self.transfers.last_mut() {
            last.pixels += pixels.len();
        }
        Ok(())
    }

    fn end_write(&mut self) {
        if self.writing {
            self.sessions += 1;
        }
        self.writing = false;
        self.window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_fill_window_row_major() {
        let mut panel = PanelMirror::new(4, 4);
        panel.start_write();
        panel.write_addr_window(1, 1, 2, 2).unwrap();
        panel.write_pixels(&[1, 2]).unwrap();
        panel.write_pixels(&[3, 4]).unwrap();
        panel.end_write();

        assert_eq!(
            panel.pixels(),
            &[0, 0, 0, 0, 0, 1, 2, 0, 0, 3, 4, 0, 0, 0, 0, 0]
        );
        assert_eq!(panel.transfers()[0].pixels, 4);
        assert_eq!(panel.sessions(), 1);
    }

    #[test]
    fn rejects_protocol_misuse() {
        let mut panel = PanelMirror::new(4, 4);
        assert_eq!(panel.write_addr_window(0, 0, 1, 1), Err(MirrorError::NoSession));
        panel.start_write();
        assert_eq!(panel.write_pixels(&[1]), Err(MirrorError::NoWindow));
        assert!(matches!(
            panel.write_addr_window(3, 0, 2, 1),
            Err(MirrorError::WindowOutOfBounds(_))
        ));
        panel.write_addr_window(0, 0, 1, 1).unwrap();
        assert!(matches!(
            panel.write_pixels(&[1, 2]),
            Err(MirrorError::Overflow { pixels: 2, .. })
        ));
    }
}
