use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, PanelView, SectionView};
use crate::theme::Theme;

/// The horizontally scrolling page, one bordered block per section
pub struct SectionsStripWidget;

impl SectionsStripWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        for view in app.visible_sections() {
            Self::render_section(frame, area, &view, theme);
        }
    }

    fn render_section(frame: &mut Frame, area: Rect, view: &SectionView, theme: &Theme) {
        let Some((rect, borders, hidden)) = clip(area, view.start_col, view.end_col) else {
            return;
        };

        let border_style = if view.active {
            Style::default().fg(theme.active)
        } else {
            Style::default().fg(theme.grey0)
        };
        let mut block = Block::default()
            .borders(borders)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));
        if hidden == 0 {
            block = block.title(format!(" {} ", view.label));
        }
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let copy: Vec<Line> = view
            .copy
            .iter()
            .map(|line| Line::styled(line.clone(), Style::default().fg(theme.fg0)))
            .collect();
        let mut copy_height = (copy.len() as u16 + 1).min(inner.height);
        if let Some(panel) = &view.panel {
            // Stop above the panel's top border
            copy_height = copy_height.min(panel.row.saturating_sub(2));
        }
        // Text slides out to the left with its section
        let copy_scroll = hidden.saturating_sub(1);
        frame.render_widget(
            Paragraph::new(copy).scroll((0, copy_scroll)),
            Rect { height: copy_height, ..inner },
        );

        if let Some(panel) = &view.panel {
            Self::render_panel(frame, area, panel, &view.panel_lines, theme);
        }
    }

    fn render_panel(
        frame: &mut Frame,
        area: Rect,
        panel: &PanelView,
        lines: &[String],
        theme: &Theme,
    ) {
        let Some((rect, borders, hidden)) = clip(area, panel.start_col, panel.end_col) else {
            return;
        };
        // Border row above the first line the page laid out
        let top = area.y + panel.row.saturating_sub(1);
        let bottom = (top + panel.rows + 2).min(area.bottom());
        if bottom < top + 3 {
            return;
        }
        let rect = Rect {
            y: top,
            height: bottom - top,
            ..rect
        };

        let total = lines.len();
        let block = Block::default()
            .borders(borders)
            .border_style(Style::default().fg(theme.panel))
            .title_style(Style::default().fg(theme.accent))
            .title(format!(" {}/{} ", (panel.scroll_rows as usize + 1).min(total), total))
            .style(Style::default().bg(theme.bg1));

        let text: Vec<Line> = lines
            .iter()
            .map(|line| Line::styled(line.clone(), Style::default().fg(theme.fg1)))
            .collect();

        // One line per row so rows line up with the panel's scroll height
        let paragraph = Paragraph::new(text)
            .block(block)
            .scroll((panel.scroll_rows, hidden.saturating_sub(1)));
        frame.render_widget(paragraph, rect);
    }
}

/// Clip a column span to `area`
///
/// Returns the on-screen rect, the borders still visible and how many
/// columns are cut off on the left.
fn clip(area: Rect, start_col: i32, end_col: i32) -> Option<(Rect, Borders, u16)> {
    let width = area.width as i32;
    let left = start_col.max(0);
    let right = end_col.min(width);
    if right <= left {
        return None;
    }

    let mut borders = Borders::TOP | Borders::BOTTOM;
    if start_col >= 0 {
        borders |= Borders::LEFT;
    }
    if end_col <= width {
        borders |= Borders::RIGHT;
    }

    let rect = Rect {
        x: area.x + left as u16,
        width: (right - left) as u16,
        ..area
    };
    Some((rect, borders, (left - start_col) as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::{backend::TestBackend, Terminal};
    use reelscroll_core::AppConfig;

    use crate::app::screen_layout;
    use crate::input::Action;

    #[tokio::test(start_paused = true)]
    async fn test_panel_drawn_where_page_laid_it_out() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default(), 100, 40).unwrap();
        app.handle_action(Action::JumpToSection(1));
        tokio::time::sleep(Duration::from_secs(1)).await;

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| {
                let strip = screen_layout(frame.area())[1];
                SectionsStripWidget::render(frame, strip, &app);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();

        // Panel spans columns 10..90; its first line sits on strip row 26,
        // so the titled top border is on screen row 3 + 25
        assert_eq!(buffer[(10, 28)].symbol(), "┌");
        assert_eq!(buffer[(12, 28)].symbol(), "1");
        assert_eq!(buffer[(12, 28)].fg, app.theme.accent);
        assert_eq!(buffer[(10, 38)].symbol(), "└");
        // Section border and title
        assert_eq!(buffer[(0, 3)].symbol(), "┌");
        assert_eq!(buffer[(2, 3)].symbol(), "S");
    }

    #[test]
    fn test_clip_fully_visible() {
        let area = Rect::new(0, 3, 100, 30);
        let (rect, borders, hidden) = clip(area, 10, 60).unwrap();
        assert_eq!(rect, Rect::new(10, 3, 50, 30));
        assert_eq!(borders, Borders::ALL);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_clip_cut_on_both_sides() {
        let area = Rect::new(0, 3, 100, 30);
        let (rect, borders, hidden) = clip(area, -20, 130).unwrap();
        assert_eq!(rect, Rect::new(0, 3, 100, 30));
        assert_eq!(borders, Borders::TOP | Borders::BOTTOM);
        assert_eq!(hidden, 20);
    }

    #[test]
    fn test_clip_off_screen() {
        let area = Rect::new(0, 3, 100, 30);
        assert!(clip(area, -50, 0).is_none());
        assert!(clip(area, 100, 180).is_none());
    }
}
