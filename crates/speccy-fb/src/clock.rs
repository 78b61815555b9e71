//! Monotonic time and frame pacing
//!
//! Time sources and delays are injected so the same loop runs against a
//! hardware timer, `std::time::Instant` or a test double.

use embedded_hal::delay::DelayNs;

/// Millisecond monotonic time source
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point; wraps on overflow
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Wall clock backed by [`std::time::Instant`]
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> u32 {
        // truncation is the documented wrap
        self.start.elapsed().as_millis() as u32
    }
}

/// Holds a loop to a fixed frame period
///
/// Call [`wait`](Self::wait) once per frame after `end_frame`. It sleeps for
/// whatever is left of the period; a frame that overran gets no sleep and the
/// next period starts immediately.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    period_ms: u32,
    frame_start: Option<u32>,
    overruns: u32,
}

impl FramePacer {
    /// Pacer for `fps` frames per second (`0` disables pacing)
    pub fn new(fps: u32) -> Self {
        Self {
            period_ms: if fps == 0 { 0 } else { 1000 / fps },
            frame_start: None,
            overruns: 0,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Frames that took longer than the period
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Sleep out the rest of the current frame and start the next one
    ///
    /// Returns the milliseconds slept.
    pub fn wait<C: Clock, D: DelayNs>(&mut self, clock: &C, delay: &mut D) -> u32 {
        if self.period_ms == 0 {
            return 0;
        }
        let now = clock.now_ms();
        let Some(start) = self.frame_start else {
            self.frame_start = Some(now);
            return 0;
        };

        let elapsed = now.wrapping_sub(start);
        let slept = match self.period_ms.checked_sub(elapsed) {
            Some(remaining) if remaining > 0 => {
                delay.delay_ms(remaining);
                remaining
            }
            Some(_) => 0,
            None => {
                self.overruns += 1;
                log::trace!("frame overran by {}ms", elapsed - self.period_ms);
                0
            }
        };
        self.frame_start = Some(now.wrapping_add(slept));
        slept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakeClock {
        now: Cell<u32>,
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> u32 {
            self.now.get()
        }
    }

    /// Delay that advances the fake clock
    struct FakeDelay<'a> {
        clock: &'a FakeClock,
        slept_ns: u64,
    }

    impl DelayNs for FakeDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.slept_ns += u64::from(ns);
            let ms = ns / 1_000_000;
            self.clock.now.set(self.clock.now.get().wrapping_add(ms));
        }
    }

    #[test]
    fn sleeps_remaining_budget() {
        let clock = FakeClock { now: Cell::new(100) };
        let mut delay = FakeDelay {
            clock: &clock,
            slept_ns: 0,
        };
        let mut pacer = FramePacer::new(50);
        assert_eq!(pacer.period_ms(), 20);

        assert_eq!(pacer.wait(&clock, &mut delay), 0);
        clock.now.set(106);
        assert_eq!(pacer.wait(&clock, &mut delay), 14);
        assert_eq!(clock.now_ms(), 120);
        assert_eq!(delay.slept_ns, 14_000_000);
    }

    #[test]
    fn overrun_skips_sleep() {
        let clock = FakeClock { now: Cell::new(0) };
        let mut delay = FakeDelay {
            clock: &clock,
            slept_ns: 0,
        };
        let mut pacer = FramePacer::new(50);
        pacer.wait(&clock, &mut delay);
        clock.now.set(35);
        assert_eq!(pacer.wait(&clock, &mut delay), 0);
        assert_eq!(pacer.overruns(), 1);

        // next budget starts at the overrun frame's end
        clock.now.set(45);
        assert_eq!(pacer.wait(&clock, &mut delay), 10);
    }

    #[test]
    fn wraparound_is_handled() {
        let clock = FakeClock {
            now: Cell::new(u32::MAX - 4),
        };
        let mut delay = FakeDelay {
            clock: &clock,
            slept_ns: 0,
        };
        let mut pacer = FramePacer::new(100);
        pacer.wait(&clock, &mut delay);
        clock.now.set(2);
        assert_eq!(pacer.wait(&clock, &mut delay), 3);
    }

    #[test]
    fn zero_fps_never_sleeps() {
        let clock = FakeClock { now: Cell::new(0) };
        let mut delay = FakeDelay {
            clock: &clock,
            slept_ns: 0,
        };
        let mut pacer = FramePacer::new(0);
        pacer.wait(&clock, &mut delay);
        clock.now.set(1);
        assert_eq!(pacer.wait(&clock, &mut delay), 0);
        assert_eq!(delay.slept_ns, 0);
        assert_eq!(pacer.overruns(), 0);
    }
}
