//! L4 Atomic Layer: Scroll state records
//!
//! `ScrollState` holds the tracked and steered offsets together with the
//! range they must stay inside. `AutoScroll` is a timed transition that only
//! exists while it is running.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{finite_or_zero, lerp, progress};

/// Tracked horizontal offsets of one viewport
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    /// Offset written to the viewport
    pub current: f64,
    /// Offset input is steering toward
    pub target: f64,
    /// Largest valid offset
    pub max_scroll: f64,
}

impl ScrollState {
    /// Create state positioned at `offset`
    pub fn at(offset: f64, max_scroll: f64) -> Self {
        let mut state = Self {
            current: offset,
            target: offset,
            max_scroll: 0.0,
        };
        state.set_max_scroll(max_scroll);
        state.clamp_all();
        state
    }

    /// Update the range; NaN or negative ranges collapse to zero
    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = finite_or_zero(max_scroll).max(0.0);
    }

    /// Clamp an arbitrary offset into `[0, max_scroll]`
    #[inline]
    pub fn clamp(&self, offset: f64) -> f64 {
        finite_or_zero(offset).clamp(0.0, self.max_scroll)
    }

    pub fn clamp_target(&mut self) {
        self.target = self.clamp(self.target);
    }

    pub fn clamp_all(&mut self) {
        self.current = self.clamp(self.current);
        self.target = self.clamp(self.target);
    }

    /// Move both offsets to `offset`
    pub fn sync_to(&mut self, offset: f64) {
        let offset = self.clamp(offset);
        self.current = offset;
        self.target = offset;
    }
}

/// A programmatic, eased transition between two offsets
#[derive(Debug, Clone, Copy)]
pub struct AutoScroll {
    pub start: Instant,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: EasingType,
}

impl AutoScroll {
    pub fn new(start: Instant, from: f64, to: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            start,
            from,
            to,
            duration,
            easing,
        }
    }

    /// Raw progress at `now`, capped at 1.0
    #[inline]
    pub fn progress(&self, now: Instant) -> f64 {
        progress(self.start, now, self.duration)
    }

    /// Position at `now`; exactly `to` once progress reaches 1.0
    pub fn sample(&self, now: Instant) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            self.to
        } else {
            lerp(self.from, self.to, self.easing.apply(t))
        }
    }

    #[inline]
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_and_nan_guard() {
        let mut state = ScrollState::at(0.0, 2000.0);
        state.target = 5000.0;
        state.clamp_target();
        assert_eq!(state.target, 2000.0);

        state.target = -10.0;
        state.clamp_target();
        assert_eq!(state.target, 0.0);

        state.target = f64::NAN;
        state.current = f64::NAN;
        state.clamp_all();
        assert_eq!(state.target, 0.0);
        assert_eq!(state.current, 0.0);
    }

    #[test]
    fn test_invalid_max_scroll_collapses_to_zero() {
        let mut state = ScrollState::default();
        state.set_max_scroll(f64::NAN);
        assert_eq!(state.max_scroll, 0.0);
        state.set_max_scroll(-400.0);
        assert_eq!(state.max_scroll, 0.0);
        assert_eq!(state.clamp(250.0), 0.0);
    }

    #[test]
    fn test_at_clamps_initial_offset() {
        let state = ScrollState::at(900.0, 500.0);
        assert_eq!(state.current, 500.0);
        assert_eq!(state.target, 500.0);
    }

    #[test]
    fn test_auto_scroll_sample() {
        let start = Instant::now();
        let auto = AutoScroll::new(
            start,
            0.0,
            2000.0,
            Duration::from_millis(500),
            EasingType::EaseInOutCubic,
        );

        assert_eq!(auto.sample(start), 0.0);
        assert!((auto.sample(start + Duration::from_millis(250)) - 1000.0).abs() < 1e-9);
        assert_eq!(auto.sample(start + Duration::from_millis(500)), 2000.0);
        assert!(auto.is_complete(start + Duration::from_millis(500)));
        assert!(!auto.is_complete(start + Duration::from_millis(499)));
    }

    #[test]
    fn test_auto_scroll_backwards() {
        let start = Instant::now();
        let auto = AutoScroll::new(start, 800.0, 200.0, Duration::from_millis(100), EasingType::Linear);
        assert!((auto.sample(start + Duration::from_millis(50)) - 500.0).abs() < 1e-9);
        assert_eq!(auto.sample(start + Duration::from_millis(100)), 200.0);
    }
}
