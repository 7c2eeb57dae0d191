//! L3 Molecular Layer: Smooth horizontal scroll controller
//!
//! Maps vertical wheel input onto the horizontal offset of one viewport and
//! eases it toward the requested position, one step per frame. Programmatic
//! requests run as timed auto-scrolls on an ease-in-out curve instead.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::state::{AutoScroll, ScrollState};
use super::timing::{finite_or_zero, lerp};
use super::viewport::{Viewport, WheelEvent, WheelOutcome};

/// Options for [`ScrollSmoother::scroll_to`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollToOptions {
    /// Jump synchronously instead of animating
    pub immediate: bool,
    /// Transition length; the configured default when `None`
    pub duration: Option<Duration>,
}

impl ScrollToOptions {
    pub fn immediate() -> Self {
        Self {
            immediate: true,
            duration: None,
        }
    }

    pub fn animated(duration: Duration) -> Self {
        Self {
            immediate: false,
            duration: Some(duration),
        }
    }
}

/// Point-in-time view of a smoother, for HUDs and decorations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollSnapshot {
    pub current: f64,
    pub target: f64,
    pub max_scroll: f64,
    /// `current / max_scroll`, zero for an unscrollable page
    pub progress: f64,
    pub auto_scrolling: bool,
}

/// Scroll controller for a single viewport
///
/// Drive it with [`frame`](Self::frame) once per display refresh and feed it
/// wheel/resize events in between. Every method takes the viewport it writes
/// to; the smoother itself only keeps the offsets.
#[derive(Debug, Clone)]
pub struct ScrollSmoother {
    config: ScrollConfig,
    state: ScrollState,
    auto: Option<AutoScroll>,
}

impl ScrollSmoother {
    /// Start tracking `viewport` from its present offset
    pub fn new<V: Viewport + ?Sized>(config: ScrollConfig, viewport: &V) -> Self {
        let offset = finite_or_zero(viewport.scroll_offset());
        Self {
            config,
            state: ScrollState::at(offset, viewport.max_scroll()),
            auto: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.state.current
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.state.target
    }

    #[inline]
    pub fn max_scroll(&self) -> f64 {
        self.state.max_scroll
    }

    /// Check if a programmatic transition is running
    #[inline]
    pub fn is_auto_scrolling(&self) -> bool {
        self.auto.is_some()
    }

    /// Check if another frame would still move the offset
    pub fn needs_update(&self) -> bool {
        self.auto.is_some() || (self.state.target - self.state.current).abs() > 0.0
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        let max_scroll = self.state.max_scroll;
        let progress = if max_scroll > 0.0 {
            (self.state.current / max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        };
        ScrollSnapshot {
            current: self.state.current,
            target: self.state.target,
            max_scroll,
            progress,
            auto_scrolling: self.auto.is_some(),
        }
    }

    /// Advance one frame at `now`
    pub fn frame<V: Viewport + ?Sized>(&mut self, viewport: &mut V, now: Instant) {
        // Layout may have changed since the last frame
        self.state.set_max_scroll(viewport.max_scroll());
        self.state.clamp_all();

        let actual = finite_or_zero(viewport.scroll_offset());

        // The host moved the offset itself (touch or trackpad momentum)
        if self.auto.is_none()
            && (actual - self.state.current.round()).abs() > self.config.sync_tolerance_px
        {
            debug!(from = self.state.current, to = actual, "Resyncing to native scroll");
            self.state.sync_to(actual);
        }

        if let Some(auto) = self.auto {
            self.state.current = self.state.clamp(auto.sample(now));
            if auto.is_complete(now) {
                debug!(position = self.state.current, "Auto-scroll finished");
                self.auto = None;
                self.state.target = self.state.current;
            }
            viewport.set_scroll_offset(self.state.current.round());
        } else if (self.state.target - self.state.current).abs() > self.config.snap_threshold_px {
            self.state.current = lerp(self.state.current, self.state.target, self.config.lerp_factor);
            viewport.set_scroll_offset(self.state.current.round());
        } else {
            self.state.current = self.state.target;
            let rounded = self.state.current.round();
            if rounded != actual {
                viewport.set_scroll_offset(rounded);
            }
        }
    }

    /// Apply the wheel policy to one event
    pub fn wheel<V: Viewport + ?Sized>(&mut self, viewport: &V, event: &WheelEvent) -> WheelOutcome {
        // Nested panels that can still scroll vertically keep the gesture
        if let Some(node) = viewport.vertical_absorber(event.target, event.delta_y) {
            return WheelOutcome::NestedScroll(node);
        }

        if self.auto.take().is_some() {
            debug!(position = self.state.current, "Auto-scroll interrupted by wheel");
            self.state.target = self.state.current;
        }

        if event.is_horizontal() {
            return WheelOutcome::Horizontal;
        }

        let delta_y = finite_or_zero(event.delta_y);
        if delta_y == 0.0 {
            return WheelOutcome::Ignored;
        }

        self.state.set_max_scroll(viewport.max_scroll());
        self.state.target += delta_y;
        self.state.clamp_target();
        WheelOutcome::Mapped
    }

    /// Re-clamp after the host layout changed and write the result at once
    pub fn resize<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        self.state.set_max_scroll(viewport.max_scroll());
        self.state.clamp_all();
        viewport.set_scroll_offset(self.state.current.round());
    }

    /// Scroll to `position`, either at once or as an eased transition
    pub fn scroll_to<V: Viewport + ?Sized>(
        &mut self,
        viewport: &mut V,
        position: f64,
        options: ScrollToOptions,
        now: Instant,
    ) {
        self.state.set_max_scroll(viewport.max_scroll());
        let position = self.state.clamp(position);

        if options.immediate {
            self.auto = None;
            self.state.current = position;
            self.state.target = position;
            viewport.set_scroll_offset(position);
            return;
        }

        let duration = options
            .duration
            .unwrap_or_else(|| self.config.auto_scroll_duration());
        debug!(
            from = self.state.current,
            to = position,
            duration_ms = duration.as_millis() as u64,
            "Auto-scroll started"
        );
        self.auto = Some(AutoScroll::new(
            now,
            self.state.current,
            position,
            duration,
            self.config.easing,
        ));
    }
}
