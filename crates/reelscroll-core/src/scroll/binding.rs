//! L2 Organism Layer: Binding a smoother to a live viewport
//!
//! `attach` takes ownership of a viewport's horizontal offset for the
//! lifetime of the returned handle: it spawns the frame loop on the current
//! tokio runtime and starts accepting wheel and resize events. `release`
//! stops both. The viewport itself stays reachable through
//! [`ScrollHandle::with_viewport`] so the host can render and re-layout it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::smoother::{ScrollSmoother, ScrollSnapshot, ScrollToOptions};
use super::viewport::{Viewport, WheelEvent, WheelOutcome};

struct Binding<V> {
    viewport: V,
    smoother: ScrollSmoother,
    released: bool,
}

struct Shared<V> {
    binding: Mutex<Binding<V>>,
}

impl<V> Shared<V> {
    fn lock(&self) -> MutexGuard<'_, Binding<V>> {
        // A panicking host callback must not wedge the frame loop
        self.binding.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a bound viewport
///
/// Dropping the handle releases the binding.
pub struct ScrollHandle<V> {
    shared: Arc<Shared<V>>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

/// Begin owning `viewport`'s horizontal scroll
///
/// Must be called from within a tokio runtime. A viewport with zero size is
/// accepted; everything clamps to zero until it grows.
pub fn attach<V>(viewport: V, config: ScrollConfig) -> ScrollHandle<V>
where
    V: Viewport + Send + 'static,
{
    let frame_interval = config.frame_interval();
    let smoother = ScrollSmoother::new(config, &viewport);
    let shared = Arc::new(Shared {
        binding: Mutex::new(Binding {
            viewport,
            smoother,
            released: false,
        }),
    });

    let (shutdown, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(frame_loop(shared.clone(), frame_interval, shutdown_rx));

    info!(
        frame_interval_us = frame_interval.as_micros() as u64,
        "Scroll smoother attached"
    );

    ScrollHandle {
        shared,
        shutdown,
        task: Some(task),
    }
}

async fn frame_loop<V: Viewport>(
    shared: Arc<Shared<V>>,
    frame_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(frame_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
            }

            _ = interval.tick() => {
                if !run_frame(&shared) {
                    break;
                }
            }
        }
    }

    debug!("Frame loop stopped");
}

/// Advance one frame; false once the binding has been released
fn run_frame<V: Viewport>(shared: &Shared<V>) -> bool {
    let mut guard = shared.lock();
    if guard.released {
        return false;
    }
    let binding = &mut *guard;
    binding.smoother.frame(&mut binding.viewport, now());
    true
}

/// Frame timestamps come from the tokio clock so paused-time tests line up
fn now() -> std::time::Instant {
    Instant::now().into_std()
}

impl<V: Viewport> ScrollHandle<V> {
    /// Stop the frame loop and ignore further events
    ///
    /// Idempotent. No viewport write happens after this returns.
    pub fn release(&mut self) {
        {
            let mut guard = self.shared.lock();
            if guard.released {
                return;
            }
            guard.released = true;
        }
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        info!("Scroll smoother released");
    }

    pub fn is_released(&self) -> bool {
        self.shared.lock().released
    }

    /// Scroll to `position` (see [`ScrollSmoother::scroll_to`])
    pub fn scroll_to(&self, position: f64, options: ScrollToOptions) {
        let mut guard = self.shared.lock();
        if guard.released {
            return;
        }
        let binding = &mut *guard;
        binding
            .smoother
            .scroll_to(&mut binding.viewport, position, options, now());
    }

    /// Deliver a wheel event
    ///
    /// Returns [`WheelOutcome::Ignored`] once released, leaving the event to
    /// the host untouched.
    pub fn wheel(&self, event: &WheelEvent) -> WheelOutcome {
        let mut guard = self.shared.lock();
        if guard.released {
            return WheelOutcome::Ignored;
        }
        let binding = &mut *guard;
        binding.smoother.wheel(&binding.viewport, event)
    }

    /// Deliver a window resize
    pub fn resize(&self) {
        let mut guard = self.shared.lock();
        if guard.released {
            return;
        }
        let binding = &mut *guard;
        binding.smoother.resize(&mut binding.viewport);
    }

    pub fn config(&self) -> ScrollConfig {
        self.shared.lock().smoother.config().clone()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.shared.lock().smoother.snapshot()
    }

    /// Check if another frame would still move the offset
    pub fn needs_update(&self) -> bool {
        let guard = self.shared.lock();
        !guard.released && guard.smoother.needs_update()
    }

    /// Run `f` against the bound viewport
    ///
    /// Used by the host to render, re-layout or scroll natively. The frame
    /// loop is held off while `f` runs.
    pub fn with_viewport<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        let mut guard = self.shared.lock();
        f(&mut guard.viewport)
    }
}

impl<V> Drop for ScrollHandle<V> {
    fn drop(&mut self) {
        let mut guard = self.shared.lock();
        guard.released = true;
        drop(guard);
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
