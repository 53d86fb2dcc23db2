use std::time::{Duration, Instant};

/// Duration of the arc/cell movement when the order changes.
pub const ORDER_TRANSITION: Duration = Duration::from_millis(750);
/// Duration of the cross-fade when switching visualizations.
pub const VIZ_FADE: Duration = Duration::from_millis(500);
/// Delay before focused labels start fading in, letting the chord dim
/// settle first.
pub const FOCUS_LABEL_DELAY: Duration = Duration::from_millis(1500);
/// Duration of the focused label fade-in.
pub const FOCUS_LABEL_FADE: Duration = Duration::from_millis(500);
/// Delay before link opacity is restored after focus is lost.
pub const DEFOCUS_RESTORE_DELAY: Duration = Duration::from_millis(500);

/// Opacity of chord bands outside the focused linked set.
pub const DIM_OPACITY: f32 = 0.025;
/// Resting opacity of chord bands.
pub const BAND_OPACITY: f32 = 0.9;

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// A fire-and-forget animation clock. Progress is derived from wall time;
/// nothing ticks it.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    start: Instant,
    duration: Duration,
}

impl Tween {
    pub fn new(now: Instant, duration: Duration) -> Self {
        Self {
            start: now,
            duration,
        }
    }

    /// An already-finished tween, for initial state.
    pub fn done(now: Instant, duration: Duration) -> Self {
        Self {
            start: now.checked_sub(duration).unwrap_or(now),
            duration,
        }
    }

    /// Raw linear progress in `[0, 1]`.
    pub fn raw(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        ease_in_out(self.raw(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.raw(now) >= 1.0
    }
}

/// Linear interpolation used when tweening angles and positions.
pub fn lerp(a: f64, b: f64, t: f32) -> f64 {
    a + (b - a) * t as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_the_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(0.5), 0.5);
    }

    #[test]
    fn ease_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_in_out(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn tween_progress_clamps() {
        let now = Instant::now();
        let tween = Tween::new(now, Duration::from_millis(750));
        assert_eq!(tween.raw(now), 0.0);
        assert!(!tween.is_finished(now));
        let later = now + Duration::from_secs(2);
        assert_eq!(tween.raw(later), 1.0);
        assert!(tween.is_finished(later));
    }

    #[test]
    fn done_tween_is_finished_immediately() {
        let now = Instant::now();
        let tween = Tween::done(now, Duration::from_millis(750));
        assert!(tween.is_finished(now));
    }

    #[test]
    fn lerp_interpolates() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }
}
