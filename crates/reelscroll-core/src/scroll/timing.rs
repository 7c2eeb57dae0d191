//! L4 Atomic Layer: Time calculation utilities for scroll animations
//!
//! Progress is always derived from absolute elapsed time, so dropped or late
//! frames never slow a transition down.

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) at `now`
///
/// A zero duration is complete immediately. A `now` earlier than `start`
/// counts as no progress.
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.min(1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Replace NaN with zero
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
