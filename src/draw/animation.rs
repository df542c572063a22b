use std::time::Duration;

use tokio::time::Instant;

use crate::draw::easing::ease_out_cubic;

/// Scroll distance that lands card `target` in the centre after `extra_cycles` full laps.
///
/// Equals `(pool_len * extra_cycles + target) * spacing` and does not depend on the duration.
pub fn travel_distance(target: usize, pool_len: usize, extra_cycles: u32, spacing: f64) -> f64 {
    let cards = pool_len as f64 * f64::from(extra_cycles) + target as f64;
    cards * spacing
}

/// A single timed spin towards a known target card.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinAnimation {
    pub target_index: usize,
    pub started_at: Instant,
    pub duration: Duration,
    pub total_distance: f64,
}

impl SpinAnimation {
    pub fn new(
        target_index: usize,
        pool_len: usize,
        extra_cycles: u32,
        spacing: f64,
        duration: Duration,
        started_at: Instant,
    ) -> Self {
        Self {
            target_index,
            started_at,
            duration,
            total_distance: travel_distance(target_index, pool_len, extra_cycles, spacing),
        }
    }

    /// Linear progress in `[0, 1]` from elapsed wall-clock time.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Scroll offset at `now`; negative values scroll cards leftwards.
    pub fn offset_at(&self, now: Instant) -> f64 {
        -self.total_distance * ease_out_cubic(self.progress(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{
        carousel::{CarouselLayout, Viewport},
        config::DrawConfig,
    };

    #[test]
    fn distance_is_laps_plus_target() {
        assert_eq!(travel_distance(2, 8, 3, 10.0), 260.0);
        assert_eq!(travel_distance(0, 1, 0, 5.0), 0.0);
        assert_eq!(travel_distance(4, 5, 1, 1.5), 13.5);
    }

    #[test]
    fn distance_ignores_duration() {
        let start = Instant::now();
        let fast = SpinAnimation::new(3, 7, 3, 12.0, Duration::from_millis(100), start);
        let slow = SpinAnimation::new(3, 7, 3, 12.0, Duration::from_secs(30), start);
        assert_eq!(fast.total_distance, slow.total_distance);
        assert_eq!(fast.offset_at(start + Duration::from_secs(60)), -fast.total_distance);
    }

    #[test]
    fn every_target_lands_in_the_centre() {
        let layout = CarouselLayout::from_viewport(
            Viewport {
                width: 390.0,
                height: 600.0,
                window_width: 390.0,
            },
            &DrawConfig::default(),
        );
        let start = Instant::now();
        for pool_len in 1..=9 {
            for target in 0..pool_len {
                let spin = SpinAnimation::new(
                    target,
                    pool_len,
                    3,
                    layout.spacing(),
                    Duration::from_millis(3_500),
                    start,
                );
                let end = start + spin.duration;
                assert!(spin.is_finished(end));
                assert_eq!(layout.center_index(spin.offset_at(end), pool_len), Some(target));
            }
        }
    }

    #[test]
    fn progress_is_clamped_and_eased() {
        let start = Instant::now();
        let spin = SpinAnimation::new(1, 4, 3, 10.0, Duration::from_secs(2), start);
        assert_eq!(spin.progress(start), 0.0);
        assert_eq!(spin.offset_at(start), 0.0);
        assert_eq!(spin.progress(start + Duration::from_secs(1)), 0.5);
        assert!((spin.offset_at(start + Duration::from_secs(1)) + 130.0 * 0.875).abs() < 1e-9);
        assert!(!spin.is_finished(start + Duration::from_secs(1)));
    }
}
