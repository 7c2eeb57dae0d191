//! Smooth horizontal scrolling
//!
//! Vertical wheel input drives a horizontal page. The offset eases toward
//! its target every frame, and programmatic jumps play as timed transitions.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves
//! - `timing` - Progress and interpolation helpers
//! - `config` - Duration helpers over `ScrollConfig`
//! - `state` - Offsets and the auto-scroll record
//! - `viewport` - The host surface and wheel event types
//!
//! ## L3 Molecular Layer
//! - `smoother` - Per-frame controller combining the atoms
//!
//! ## L2 Organism Layer
//! - `binding` - `attach`/`ScrollHandle`, the frame loop and listener lifetime
//!
//! # Usage
//!
//! ```ignore
//! use reelscroll_core::{attach, Page, ScrollConfig, ScrollToOptions, WheelEvent};
//!
//! let mut handle = attach(Page::new(1000.0, 3000.0), ScrollConfig::default());
//!
//! // Host forwards input
//! let outcome = handle.wheel(&WheelEvent::vertical(150.0));
//! if outcome.default_prevented() {
//!     // suppress the host's own scrolling
//! }
//!
//! // Navigation animates to a position
//! handle.scroll_to(2000.0, ScrollToOptions::default());
//!
//! handle.release();
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod state;
pub mod timing;
pub mod viewport;

// L3 Molecular Layer
pub mod smoother;

// L2 Organism Layer
pub mod binding;

pub use binding::{attach, ScrollHandle};
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
pub use smoother::{ScrollSmoother, ScrollSnapshot, ScrollToOptions};
pub use state::{AutoScroll, ScrollState};
pub use viewport::{Viewport, WheelEvent, WheelOutcome};
