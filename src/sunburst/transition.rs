//! Zoom transitions.
//!
//! A `Transition` owns its start and end scales, so every frame is computed
//! from an explicit value rather than from scales mutated in place. Time is
//! whatever clock the caller drives the renderer with, measured from mount.

use std::time::Duration;

use crate::sunburst::scale::Scales;

pub const ZOOM_DURATION: Duration = Duration::from_millis(750);

/// Cubic ease-in-out, the default easing for d3 transitions.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 - 2.0 * t;
        1.0 - u * u * u / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Scales,
    pub to: Scales,
    pub started_at: Duration,
    pub duration: Duration,
}

impl Transition {
    pub fn new(from: Scales, to: Scales, started_at: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration: ZOOM_DURATION,
        }
    }

    pub fn ends_at(&self) -> Duration {
        self.started_at + self.duration
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.ends_at()
    }

    pub fn scales_at(&self, now: Duration) -> Scales {
        self.from.lerp(&self.to, ease_cubic_in_out(self.progress(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoomed() -> Scales {
        Scales {
            theta_domain: [0.0, 2.0 / 3.0],
            radius_domain: [1.0 / 3.0, 1.0],
            radius_range: [60.0, 250.0],
        }
    }

    #[test]
    fn easing_is_symmetric_and_pinned() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!((ease_cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_cubic_in_out(0.25) + ease_cubic_in_out(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scales_run_from_start_to_end() {
        let start = Duration::from_millis(100);
        let t = Transition::new(Scales::full(250.0), zoomed(), start);

        assert_eq!(t.scales_at(start), Scales::full(250.0));
        assert_eq!(t.scales_at(start + ZOOM_DURATION), zoomed());
        assert_eq!(t.scales_at(Duration::from_secs(10)), zoomed());
        assert_eq!(t.scales_at(Duration::ZERO), Scales::full(250.0));

        let mid = t.scales_at(start + ZOOM_DURATION / 2);
        assert!((mid.radius_range[0] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn finishes_after_duration() {
        let t = Transition::new(Scales::full(250.0), zoomed(), Duration::ZERO);
        assert!(!t.is_finished(Duration::from_millis(749)));
        assert!(t.is_finished(Duration::from_millis(750)));
        assert_eq!(t.progress(Duration::from_millis(375)), 0.5);
    }
}
