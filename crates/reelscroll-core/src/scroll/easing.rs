//! L4 Atomic Layer: Pure easing functions for scroll transitions
//!
//! Every curve maps progress in [0, 1] to position in [0, 1].

pub use crate::config::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value, clamped to [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EasingType::None => if t < 1.0 { 0.0 } else { 1.0 },
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::EaseInOutCubic => ease_in_out_cubic(t),
        }
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Cubic ease-in-out: 4t³ for t < 0.5, 1 - (-2t+2)³/2 otherwise
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        for easing in [
            EasingType::None,
            EasingType::Linear,
            EasingType::Cubic,
            EasingType::EaseInOutCubic,
        ] {
            if easing != EasingType::None {
                assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            }
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_ease_in_out_cubic_shape() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-12);
        assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_ease_in_out_cubic_strictly_increasing() {
        let mut prev = ease_in_out_cubic(0.0);
        for i in 1..=100 {
            let v = ease_in_out_cubic(i as f64 / 100.0);
            assert!(v > prev, "not increasing at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let easing = EasingType::EaseInOutCubic;
        assert_eq!(easing.apply(-3.0), 0.0);
        assert_eq!(easing.apply(7.0), 1.0);
        assert_eq!(easing.apply(f64::NAN), 0.0);
    }
}
