//! L4 Atomic Layer: The host surface a smoother binds to

use crate::layout::NodeId;

use super::timing::finite_or_zero;

/// A horizontally scrollable element owned by the host
///
/// Metric reads may transiently report NaN while the host is laying out;
/// callers treat that as zero.
pub trait Viewport {
    /// Current horizontal offset as the host sees it
    fn scroll_offset(&self) -> f64;

    /// Write the horizontal offset
    fn set_scroll_offset(&mut self, offset: f64);

    /// Total scrollable width of the content
    fn content_extent(&self) -> f64;

    /// Width of the visible box
    fn visible_extent(&self) -> f64;

    /// Largest valid offset, never negative
    fn max_scroll(&self) -> f64 {
        finite_or_zero(self.content_extent() - self.visible_extent()).max(0.0)
    }

    /// Nearest container between `target` and this viewport that can take a
    /// vertical scroll in `direction` (negative = up) right now
    fn vertical_absorber(&self, _target: Option<NodeId>, _direction: f64) -> Option<NodeId> {
        None
    }
}

/// A wheel gesture delivered to a bound viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Element under the pointer, if known
    pub target: Option<NodeId>,
}

impl WheelEvent {
    pub fn vertical(delta_y: f64) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            target: None,
        }
    }

    pub fn horizontal(delta_x: f64) -> Self {
        Self {
            delta_x,
            delta_y: 0.0,
            target: None,
        }
    }

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Whether the gesture is predominantly horizontal
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.delta_x.abs() > self.delta_y.abs()
    }
}

/// What the smoother did with a wheel event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// A nested container scrolls vertically on its own
    NestedScroll(NodeId),
    /// Native horizontal gesture, left to the host
    Horizontal,
    /// Vertical delta mapped onto the horizontal target
    Mapped,
    /// Nothing to do (zero delta or released binding)
    Ignored,
}

impl WheelOutcome {
    /// Whether the host's default scrolling must be suppressed
    #[inline]
    pub fn default_prevented(&self) -> bool {
        matches!(self, WheelOutcome::Mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        offset: f64,
        content: f64,
        visible: f64,
    }

    impl Viewport for Fixed {
        fn scroll_offset(&self) -> f64 {
            self.offset
        }
        fn set_scroll_offset(&mut self, offset: f64) {
            self.offset = offset;
        }
        fn content_extent(&self) -> f64 {
            self.content
        }
        fn visible_extent(&self) -> f64 {
            self.visible
        }
    }

    #[test]
    fn test_max_scroll() {
        let v = Fixed { offset: 0.0, content: 3000.0, visible: 1000.0 };
        assert_eq!(v.max_scroll(), 2000.0);

        let v = Fixed { offset: 0.0, content: 500.0, visible: 1000.0 };
        assert_eq!(v.max_scroll(), 0.0);

        let v = Fixed { offset: 0.0, content: f64::NAN, visible: 1000.0 };
        assert_eq!(v.max_scroll(), 0.0);
    }

    #[test]
    fn test_wheel_direction() {
        assert!(WheelEvent::horizontal(40.0).is_horizontal());
        assert!(!WheelEvent::vertical(40.0).is_horizontal());
        let diagonal = WheelEvent { delta_x: 30.0, delta_y: -30.0, target: None };
        assert!(!diagonal.is_horizontal());
    }

    #[test]
    fn test_only_mapped_prevents_default() {
        assert!(WheelOutcome::Mapped.default_prevented());
        assert!(!WheelOutcome::Horizontal.default_prevented());
        assert!(!WheelOutcome::Ignored.default_prevented());
        assert!(!WheelOutcome::NestedScroll(NodeId::ROOT).default_prevented());
    }
}
