//! Frame timing

use std::time::{Duration, Instant};

/// Measures the time between consecutive frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_update: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
        }
    }

    /// Seconds since the previous call (or since creation)
    pub fn delta(&mut self) -> f32 {
        self.delta_at(Instant::now())
    }

    pub fn delta_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_update).as_secs_f32();
        self.last_update = now;
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Caps the frame rate by handing out frame deadlines
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
}

impl FramePacer {
    pub fn new(target_fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            next_frame: now,
        }
    }

    /// Whether a frame is due at `now`. Consumes the deadline when it is.
    ///
    /// Falling more than one interval behind resynchronizes instead of
    /// bursting frames to catch up.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.interval;
        if self.next_frame <= now {
            self.next_frame = now + self.interval;
        }
        true
    }

    /// Deadline of the next frame
    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Frames-per-second readout, refreshed once per second
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    current_fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, delta_time: f32) {
        self.frames += 1;
        self.elapsed += delta_time;

        if self.elapsed >= 1.0 {
            self.current_fps = (self.frames as f32 / self.elapsed).round() as u32;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> u32 {
        self.current_fps
    }
}
