//! Rotated RGB565 framebuffer for small SPI LCDs
//!
//! Keeps a full logical frame (256x192 by default) in RAM, stored transposed
//! so it can be streamed to a panel mounted at 90 degrees. Every drawing call
//! records the physical rows it touched, and [`Framebuffer::end_frame`] sends
//! only those rows to a [`PixelSink`], merged into contiguous address windows.
//!
//! ## Features
//!
//! - `no_std` + `alloc`
//! - Per-row dirty tracking with optional clear-after-send frames
//! - `graphics`: embedded-graphics [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
//! - `st7789`: [`PixelSink`] for the `st7789` driver
//! - `std`: wall clock for [`FramePacer`]
//!
//! ## Usage
//!
//! ```
//! use speccy_fb::{color, Framebuffer, PanelMirror};
//!
//! let mut fb = Framebuffer::speccy().unwrap();
//! let mut lcd = PanelMirror::new(240, 280);
//!
//! fb.start_frame();
//! fb.fill_rect(40, 40, 16, 16, color::RED);
//! fb.write_line(0, 0, 255, 191, color::WHITE);
//! fb.end_frame(&mut lcd, 24, 12, true).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

/// Monotonic time and frame pacing
pub mod clock;
/// RGB565 helpers
pub mod color;
/// Framebuffer configuration types and builder
pub mod config;
mod dirty;
/// Error types
pub mod error;
/// The framebuffer itself
pub mod framebuffer;
mod geometry;
/// embedded-graphics integration
#[cfg(feature = "graphics")]
pub mod graphics;
/// In-memory reference panel
pub mod panel;
/// Output sink contract
pub mod sink;
/// Sprite sheet access
pub mod sprite;

pub use clock::{Clock, FramePacer};
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use config::{Builder, Config, Dimensions};
pub use error::{BuilderError, Error, MAX_SIDE};
pub use framebuffer::{FrameStats, Framebuffer};
pub use panel::{MirrorError, PanelMirror, Transfer};
pub use sink::{AddrWindow, PixelSink};
pub use sprite::{sprite_sheet_tile_row, SpriteSheet};

/// Default logical width
pub const LOGICAL_WIDTH: u16 = 256;
/// Default logical height
pub const LOGICAL_HEIGHT: u16 = 192;
