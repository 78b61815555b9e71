//! Desktop simulator for the Brickintosh LCD.
//!
//! Drives the speccy-fb engine into a simulated 240x280 ST7789. With the
//! `window` feature the panel is shown in an SDL window; otherwise a fixed
//! number of frames is rendered headless and the final LCD saved as PNG.

mod demo;
mod lcd;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use embedded_graphics_simulator::OutputSettingsBuilder;
use embedded_hal::delay::DelayNs;
use speccy_fb::{Framebuffer, FramePacer, StdClock};

use demo::Scene;
use lcd::SimulatorLcd;

/// Framebuffer placement on the LCD (centered horizontally)
const ORIGIN_X: u16 = 24;
const ORIGIN_Y: u16 = 12;

/// Brickintosh simulator
#[derive(Parser)]
#[command(name = "brickintosh-sim")]
#[command(version)]
#[command(about = "Simulated 240x280 LCD driven by the speccy-fb framebuffer")]
struct Cli {
    /// Integer pixel scale of the window and PNG output
    #[arg(short, long, default_value_t = 2)]
    scale: u32,

    /// Target frame rate (0 runs unpaced)
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Stop after this many frames (headless runs default to 120)
    #[arg(short = 'n', long)]
    frames: Option<u32>,

    /// Keep drawn content between frames instead of wiping it after each flush
    #[arg(long)]
    no_clear_after: bool,

    /// Where headless runs save the final LCD contents
    #[arg(short, long, default_value = "brickintosh.png")]
    output: PathBuf,
}

/// `DelayNs` backed by `std::thread::sleep`
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }
}

/// Engine, panel and pacing for one run
struct Simulator {
    fb: Framebuffer,
    lcd: SimulatorLcd,
    scene: Scene,
    pacer: FramePacer,
    clock: StdClock,
    delay: StdDelay,
    clear_after: bool,
}

impl Simulator {
    fn new(cli: &Cli) -> Result<Self, speccy_fb::Error> {
        let mut lcd = SimulatorLcd::new();
        lcd.fill_screen(speccy_fb::color::BLACK);
        Ok(Self {
            fb: Framebuffer::speccy()?,
            lcd,
            scene: Scene::new(),
            pacer: FramePacer::new(cli.fps),
            clock: StdClock::new(),
            delay: StdDelay,
            clear_after: !cli.no_clear_after,
        })
    }

    fn step(&mut self) {
        self.fb.start_frame();
        self.scene.draw(&mut self.fb);
        let stats = match self
            .fb
            .end_frame(&mut self.lcd, ORIGIN_X, ORIGIN_Y, self.clear_after)
        {
            Ok(stats) => stats,
            Err(never) => match never {},
        };
        log::debug!(
            "frame {}: {} runs, {} rows",
            self.scene.frame(),
            stats.runs,
            stats.rows
        );
        self.pacer.wait(&self.clock, &mut self.delay);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut sim = Simulator::new(&cli)?;
    log::info!(
        "LCD {}x{}, framebuffer at ({ORIGIN_X}, {ORIGIN_Y}), clear-after {}",
        lcd::LCD_WIDTH,
        lcd::LCD_HEIGHT,
        sim.clear_after
    );

    run(&cli, &mut sim)
}

#[cfg(feature = "window")]
fn run(cli: &Cli, sim: &mut Simulator) -> Result<(), Box<dyn std::error::Error>> {
    use embedded_graphics_simulator::{sdl2::Keycode, SimulatorEvent, Window};

    let output_settings = OutputSettingsBuilder::new().scale(cli.scale).build();
    let mut window = Window::new("Brickintosh", &output_settings);

    println!("Brickintosh Simulator");
    println!("  Escape - Quit");

    let mut rendered = 0u32;
    loop {
        sim.step();
        window.update(sim.lcd.display());
        rendered += 1;

        for event in window.events() {
            match event {
                SimulatorEvent::Quit
                | SimulatorEvent::KeyDown {
                    keycode: Keycode::Escape,
                    ..
                } => return Ok(()),
                _ => {}
            }
        }

        if cli.frames.is_some_and(|limit| rendered >= limit) {
            log::info!("frame limit reached after {rendered} frames");
            return Ok(());
        }
    }
}

#[cfg(not(feature = "window"))]
fn run(cli: &Cli, sim: &mut Simulator) -> Result<(), Box<dyn std::error::Error>> {
    const HEADLESS_FRAMES: u32 = 120;

    let frames = cli.frames.unwrap_or(HEADLESS_FRAMES);
    for _ in 0..frames {
        sim.step();
    }

    let output_settings = OutputSettingsBuilder::new().scale(cli.scale).build();
    sim.lcd
        .display()
        .to_rgb_output_image(&output_settings)
        .save_png(&cli.output)?;
    log::info!(
        "rendered {} frames ({} sessions), saved {}",
        frames,
        sim.lcd.frames(),
        cli.output.display()
    );
    Ok(())
}
