use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use reelscroll_core::AppConfig;
use reelscroll_tui::{
    app::{screen_layout, App},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{ProgressHudWidget, SectionsStripWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("reelscroll"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<AppConfig>,
) -> Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let mut app = App::new(config.clone(), Theme::default(), width, height)?;

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.scroll.frame_rate);

    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = false;

    loop {
        terminal.draw(|frame| {
            let [hud, strip, status] = screen_layout(frame.area());
            ProgressHudWidget::render(frame, hud, &app);
            SectionsStripWidget::render(frame, strip, &app);
            StatusBarWidget::render(frame, status, &app);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key)),
                AppEvent::Wheel(mouse) => app.handle_wheel(mouse)?,
                AppEvent::Resize(w, h) => app.resize(w, h)?,
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_scroll_update();

        if app.should_quit {
            break;
        }
    }

    app.scroller.release();
    Ok(())
}
