use std::time::{Duration, Instant};

/// Quadratic ease-out: fast start, gentle landing.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// A single in-flight scroll motion from `from` to `to`.
///
/// The owner samples it once per frame; the animation never writes to a
/// viewport by itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    id: u64,
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(id: u64, from: f32, to: f32, started_at: Instant, duration: Duration) -> Self {
        Self {
            id,
            from,
            to,
            started_at,
            duration,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Rounded offset at `now`, and whether the motion has finished.
    pub fn sample(&self, now: Instant) -> (f32, bool) {
        let t = self.progress(now);
        let offset = (self.from + (self.to - self.from) * ease_out_quad(t)).round();
        (offset, t >= 1.0)
    }
}
