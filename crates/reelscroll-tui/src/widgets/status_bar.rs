use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use reelscroll_core::WheelOutcome;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let snapshot = app.snapshot();

        let mode_str = if snapshot.auto_scrolling {
            "AUTO"
        } else if app.needs_scroll_update() {
            "EASE"
        } else {
            "IDLE"
        };

        let wheel_str = match app.last_outcome {
            Some(WheelOutcome::Mapped) => "page",
            Some(WheelOutcome::NestedScroll(_)) => "panel",
            Some(WheelOutcome::Horizontal) => "native",
            Some(WheelOutcome::Ignored) | None => "-",
        };

        let (status_text, status_style) = if let Some(msg) = &app.status_message {
            (
                format!(" {}", msg),
                Style::default().fg(theme.warning).bg(theme.bg2),
            )
        } else {
            (
                format!(
                    " {} | {:.0}/{:.0}px | target {:.0} | wheel: {}",
                    mode_str, snapshot.current, snapshot.max_scroll, snapshot.target, wheel_str
                ),
                Style::default().fg(theme.fg0).bg(theme.bg2),
            )
        };

        let help_hint = " q:quit h/l:sections 1-9:jump g/G:ends ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, status_style),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
