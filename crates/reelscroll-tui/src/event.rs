use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    /// Poll faster than `tick_rate_ms` while the page is moving
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        let animation_tick = if animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis((1000 / animation_fps as u64).max(1))
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick,
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation tick rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Map a raw terminal event to an application event
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => {
            // Only handle key press events, ignore release events
            // (crossterm 0.27+ sends release events on some systems)
            if key.kind == KeyEventKind::Press {
                Some(AppEvent::Key(key))
            } else {
                None
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp
            | MouseEventKind::ScrollDown
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => Some(AppEvent::Wheel(mouse)),
            _ => None,
        },
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel notch
    Wheel(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
