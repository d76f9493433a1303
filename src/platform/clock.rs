//! Wall-clock frame timing

use std::time::{Duration, Instant};

/// Measures elapsed seconds between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    previous: Option<Instant>,
    max_elapsed: Option<f32>,
}

impl FrameClock {
    /// `max_elapsed` caps a single frame's elapsed time; `None` leaves it raw
    pub fn new(max_elapsed: Option<f32>) -> Self {
        Self {
            previous: None,
            max_elapsed,
        }
    }

    /// Seconds since the previous call; the first call returns 0
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// `tick` against an explicit timestamp
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = self
            .previous
            .map(|prev| now.saturating_duration_since(prev))
            .unwrap_or(Duration::ZERO)
            .as_secs_f32();
        self.previous = Some(now);
        self.clamp(elapsed)
    }

    /// Apply the cap to an externally supplied elapsed time
    pub fn clamp(&self, elapsed: f32) -> f32 {
        match self.max_elapsed {
            Some(max) if elapsed > max => {
                log::warn!("Frame took {:.3}s, clamping to {:.3}s", elapsed, max);
                max
            }
            _ => elapsed,
        }
    }
}
