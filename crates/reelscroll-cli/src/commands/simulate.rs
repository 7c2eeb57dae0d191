use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Args;

use reelscroll_core::scroll::{ScrollSnapshot, Viewport};
use reelscroll_core::{AppConfig, Page, ScrollSmoother, ScrollToOptions, WheelEvent};

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Visible width of the viewport in px
    #[arg(long, default_value_t = 1000.0)]
    pub visible: f64,
    /// Total content width in px
    #[arg(long, default_value_t = 3000.0)]
    pub content: f64,
    /// Vertical wheel delta in px, applied before the first frame (repeatable)
    #[arg(long, allow_negative_numbers = true)]
    pub wheel: Vec<f64>,
    /// Scroll to this offset after the wheel input
    #[arg(long)]
    pub scroll_to: Option<f64>,
    /// Transition length for --scroll-to, the configured default otherwise
    #[arg(long, requires = "scroll_to")]
    pub duration_ms: Option<u64>,
    /// Jump to --scroll-to without animating
    #[arg(long, requires = "scroll_to")]
    pub immediate: bool,
    /// Number of frames to replay
    #[arg(long, default_value_t = 60)]
    pub frames: u32,
    /// Frame spacing in ms
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,
}

pub fn run(config: &AppConfig, args: &SimulateArgs) -> Result<()> {
    for snapshot in simulate(config, args)? {
        println!("{}", serde_json::to_string(&snapshot)?);
    }
    Ok(())
}

/// Replay the input against a bare page on a synthetic clock
pub fn simulate(config: &AppConfig, args: &SimulateArgs) -> Result<Vec<ScrollSnapshot>> {
    if !(args.visible.is_finite() && args.content.is_finite()) {
        bail!("--visible and --content must be finite");
    }
    if args.frame_ms == 0 {
        bail!("--frame-ms must be positive");
    }

    let mut page = Page::new(args.visible, args.content);
    let mut smoother = ScrollSmoother::new(config.scroll.clone(), &page);
    let start = Instant::now();

    for &delta_y in &args.wheel {
        let outcome = smoother.wheel(&page, &WheelEvent::vertical(delta_y));
        tracing::debug!(delta_y, ?outcome, "Simulated wheel");
    }

    if let Some(position) = args.scroll_to {
        let options = if args.immediate {
            ScrollToOptions::immediate()
        } else {
            ScrollToOptions {
                immediate: false,
                duration: args.duration_ms.map(Duration::from_millis),
            }
        };
        smoother.scroll_to(&mut page, position, options, start);
    }

    let frame = Duration::from_millis(args.frame_ms);
    let snapshots = (1..=args.frames)
        .map(|i| {
            smoother.frame(&mut page, start + frame * i);
            smoother.snapshot()
        })
        .collect();

    tracing::debug!(offset = page.scroll_offset(), "Simulation finished");
    Ok(snapshots)
}
