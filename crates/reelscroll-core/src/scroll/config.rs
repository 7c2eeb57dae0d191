//! L4 Atomic Layer: Configuration types for smooth scrolling
//!
//! Re-exports configuration from the crate root and adds duration helpers.

use std::time::Duration;

pub use crate::config::{EasingType, ScrollConfig};

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Default duration of a programmatic scroll
    fn auto_scroll_duration(&self) -> Duration;

    /// Duration of a jump between named sections
    fn section_scroll_duration(&self) -> Duration;

    /// Interval between two frames of the frame loop
    fn frame_interval(&self) -> Duration;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn auto_scroll_duration(&self) -> Duration {
        Duration::from_millis(self.auto_scroll_duration_ms)
    }

    #[inline]
    fn section_scroll_duration(&self) -> Duration {
        Duration::from_millis(self.section_scroll_duration_ms)
    }

    #[inline]
    fn frame_interval(&self) -> Duration {
        if self.frame_rate == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_micros((1_000_000 / self.frame_rate as u64).max(1))
        }
    }
}
