use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;

/// Section tabs with a progress gauge for the horizontal offset
pub struct ProgressHudWidget;

impl ProgressHudWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let (labels, active) = app.section_labels();
        let mut spans = vec![Span::raw(" ")];
        for (i, label) in labels.iter().enumerate() {
            let style = if active == Some(i) {
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.active)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg1)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, label), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

        let snapshot = app.snapshot();
        let ratio = if snapshot.max_scroll > 0.0 {
            (snapshot.current / snapshot.max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.gauge).bg(theme.bg2))
            .ratio(ratio)
            .label(format!("{:.0}%", ratio * 100.0));
        frame.render_widget(gauge, rows[1]);
    }
}
