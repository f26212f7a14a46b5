//! Frame clock for continuously refreshing scenes.
//!
//! A live video background changes without any shape changing, so the scene
//! must be repainted on every frame while it is shown. Each [`Animation`]
//! keeps the clock producing frames; dropping or stopping the last one lets
//! the clock go idle again.

use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

#[derive(Debug)]
struct ClockState {
    origin: Instant,
    running: Cell<usize>,
    last: Cell<Option<Instant>>,
    count: Cell<u64>,
}

/// Timing information for one produced frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Time since the clock was created.
    pub time: Duration,
    /// Time since the previous frame, zero for the first frame of a run.
    pub time_diff: Duration,
    /// Instantaneous frames per second, zero when unknown.
    pub frame_rate: f32,
    /// Number of frames produced so far, starting at 1.
    pub count: u64,
}

/// Produces frames while at least one animation is running.
///
/// Cloning yields another handle to the same clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    state: Rc<ClockState>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_origin(Instant::now())
    }

    /// Create a clock whose frame times are measured from `origin`.
    pub fn with_origin(origin: Instant) -> Self {
        Self {
            state: Rc::new(ClockState {
                origin,
                running: Cell::new(0),
                last: Cell::new(None),
                count: Cell::new(0),
            }),
        }
    }

    /// Start a new animation on this clock.
    pub fn start(&self) -> Animation {
        let running = self.state.running.get() + 1;
        self.state.running.set(running);
        log::debug!("🎞️ Animation started ({} running)", running);
        Animation {
            state: Rc::clone(&self.state),
            running: true,
        }
    }

    /// True while any animation is running.
    pub fn is_running(&self) -> bool {
        self.state.running.get() > 0
    }

    /// Number of animations currently running.
    pub fn active_animations(&self) -> usize {
        self.state.running.get()
    }

    /// Produce a frame for the current time, if the clock is running.
    pub fn tick(&self) -> Option<Frame> {
        self.tick_at(Instant::now())
    }

    /// Produce a frame for `now`, if the clock is running.
    pub fn tick_at(&self, now: Instant) -> Option<Frame> {
        if !self.is_running() {
            self.state.last.set(None);
            return None;
        }

        let time_diff = self
            .state
            .last
            .get()
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        let frame_rate = if time_diff > Duration::ZERO {
            1.0 / time_diff.as_secs_f32()
        } else {
            0.0
        };
        let count = self.state.count.get() + 1;
        self.state.count.set(count);
        self.state.last.set(Some(now));

        Some(Frame {
            time: now.saturating_duration_since(self.state.origin),
            time_diff,
            frame_rate,
            count,
        })
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// A running animation. Stops itself when dropped.
#[derive(Debug)]
pub struct Animation {
    state: Rc<ClockState>,
    running: bool,
}

impl Animation {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the animation. Stopping twice is a no-op.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        let running = self.state.running.get().saturating_sub(1);
        self.state.running.set(running);
        log::debug!("🎞️ Animation stopped ({} running)", running);
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_clock_produces_no_frames() {
        let clock = FrameClock::new();
        assert!(!clock.is_running());
        assert!(clock.tick().is_none());
    }

    #[test]
    fn test_running_clock_produces_frames() {
        let origin = Instant::now();
        let clock = FrameClock::with_origin(origin);
        let _anim = clock.start();

        let first = clock.tick_at(origin + Duration::from_millis(10)).expect("frame");
        assert_eq!(first.count, 1);
        assert_eq!(first.time_diff, Duration::ZERO);
        assert_eq!(first.frame_rate, 0.0);

        let second = clock.tick_at(origin + Duration::from_millis(30)).expect("frame");
        assert_eq!(second.count, 2);
        assert_eq!(second.time, Duration::from_millis(30));
        assert_eq!(second.time_diff, Duration::from_millis(20));
        assert!((second.frame_rate - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let clock = FrameClock::new();
        let mut anim = clock.start();
        let _other = clock.start();
        assert_eq!(clock.active_animations(), 2);

        anim.stop();
        anim.stop();
        assert!(!anim.is_running());
        assert_eq!(clock.active_animations(), 1);
    }

    #[test]
    fn test_drop_stops_animation() {
        let clock = FrameClock::new();
        {
            let _anim = clock.start();
            assert!(clock.is_running());
        }
        assert!(!clock.is_running());
        assert!(clock.tick().is_none());
    }

    #[test]
    fn test_restart_resets_time_diff() {
        let origin = Instant::now();
        let clock = FrameClock::with_origin(origin);
        let anim = clock.start();
        clock.tick_at(origin + Duration::from_millis(5));
        drop(anim);
        assert!(clock.tick_at(origin + Duration::from_millis(10)).is_none());

        let _anim = clock.start();
        let frame = clock.tick_at(origin + Duration::from_millis(500)).expect("frame");
        assert_eq!(frame.time_diff, Duration::ZERO);
    }
}
