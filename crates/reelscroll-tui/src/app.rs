use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tracing::debug;

use reelscroll_core::scroll::{ScrollSnapshot, Viewport};
use reelscroll_core::{attach, AppConfig, Page, ScrollHandle, ScrollToOptions, WheelEvent, WheelOutcome};

use crate::input::Action;
use crate::theme::Theme;

/// Rows used by the progress HUD
pub const HUD_HEIGHT: u16 = 3;
/// Rows used by the status bar
pub const STATUS_HEIGHT: u16 = 1;

/// Split the terminal into HUD, page strip and status bar
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HUD_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// A nested panel as it should appear on screen
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    /// Column span relative to the strip, may lie partly off-screen
    pub start_col: i32,
    pub end_col: i32,
    /// First content row relative to the strip
    pub row: u16,
    pub rows: u16,
    /// First visible line
    pub scroll_rows: u16,
}

/// A section as it should appear on screen
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub label: String,
    pub copy: Vec<String>,
    pub panel_lines: Vec<String>,
    pub start_col: i32,
    pub end_col: i32,
    pub panel: Option<PanelView>,
    pub active: bool,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub scroller: ScrollHandle<Page>,
    pub theme: Theme,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub last_outcome: Option<WheelOutcome>,
    /// Area the page strip occupies
    pub page_area: Rect,
}

impl App {
    /// Build the page for a `width` x `height` terminal and bind the scroller
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: Arc<AppConfig>, theme: Theme, width: u16, height: u16) -> Result<Self> {
        let page_area = screen_layout(Rect::new(0, 0, width, height))[1];
        let (visible_width, visible_height) = page_size(&config, page_area);
        let page = Page::from_sections(
            &config.sections,
            visible_width,
            visible_height,
            config.ui.cell_height_px,
        )?;
        let scroller = attach(page, config.scroll.clone());

        Ok(Self {
            config,
            scroller,
            theme,
            should_quit: false,
            status_message: None,
            last_outcome: None,
            page_area,
        })
    }

    /// Check if the page is still moving and needs a fast redraw
    pub fn needs_scroll_update(&self) -> bool {
        self.scroller.needs_update()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.scroller.snapshot()
    }

    /// Labels of all sections and the index of the active one
    pub fn section_labels(&self) -> (Vec<String>, Option<usize>) {
        self.scroller.with_viewport(|page| {
            let labels = page.sections().iter().map(|s| s.label.clone()).collect();
            (labels, page.active_section().map(|(i, _)| i))
        })
    }

    /// Forward a mouse wheel notch to the scroller
    ///
    /// Gestures the scroller leaves alone are applied natively: nested panels
    /// scroll vertically, horizontal swipes move the page directly.
    pub fn handle_wheel(&mut self, mouse: MouseEvent) -> Result<()> {
        let step = self.config.ui.wheel_step_px;
        let (delta_x, delta_y) = match mouse.kind {
            MouseEventKind::ScrollDown => (0.0, step),
            MouseEventKind::ScrollUp => (0.0, -step),
            MouseEventKind::ScrollRight => (step, 0.0),
            MouseEventKind::ScrollLeft => (-step, 0.0),
            _ => return Ok(()),
        };

        let target = self.strip_point(mouse.column, mouse.row).and_then(|(x, y)| {
            self.scroller.with_viewport(|page| page.hit_test(x, y))
        });

        let outcome = self.scroller.wheel(&WheelEvent {
            delta_x,
            delta_y,
            target,
        });

        match outcome {
            WheelOutcome::NestedScroll(node) => {
                self.scroller
                    .with_viewport(|page| page.scroll_panel(node, delta_y))?;
            }
            WheelOutcome::Horizontal => {
                self.scroller.with_viewport(|page| {
                    let offset = page.scroll_offset();
                    page.set_scroll_offset(offset + delta_x);
                });
            }
            WheelOutcome::Mapped | WheelOutcome::Ignored => {}
        }

        debug!(?outcome, delta_x, delta_y, "Wheel");
        self.last_outcome = Some(outcome);
        Ok(())
    }

    /// Pixel position of the centre of a terminal cell within the page strip
    ///
    /// `None` when the cell lies outside the strip (HUD, status bar).
    fn strip_point(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let area = self.page_area;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }
        let x = ((column - area.x) as f64 + 0.5) * self.config.ui.cell_width_px;
        let y = ((row - area.y) as f64 + 0.5) * self.config.ui.cell_height_px;
        Some((x, y))
    }

    /// Apply an input action
    pub fn handle_action(&mut self, action: Action) {
        self.status_message = None;
        let result = match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::NextSection => self.step_section(1),
            Action::PrevSection => self.step_section(-1),
            Action::JumpToSection(index) => self.scroller.scroll_to_section_index(index),
            Action::JumpToStart => {
                self.scroller.scroll_to(0.0, ScrollToOptions::immediate());
                Ok(())
            }
            Action::JumpToEnd => {
                let end = self.scroller.with_viewport(|page| page.max_scroll());
                self.scroller.scroll_to(end, ScrollToOptions::immediate());
                Ok(())
            }
            Action::None => Ok(()),
        };

        if let Err(e) = result {
            self.status_message = Some(e.to_string());
        }
    }

    fn step_section(&self, step: isize) -> reelscroll_core::Result<()> {
        let next = self.scroller.with_viewport(|page| {
            let current = page.active_section().map(|(i, _)| i).unwrap_or(0);
            page.sections().step(current, step)
        });
        match next {
            Some(index) => self.scroller.scroll_to_section_index(index),
            None => Ok(()),
        }
    }

    /// Re-layout after the terminal was resized
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.page_area = screen_layout(Rect::new(0, 0, width, height))[1];
        let (visible_width, visible_height) = page_size(&self.config, self.page_area);
        self.scroller
            .with_viewport(|page| page.resize(visible_width, visible_height))?;
        self.scroller.resize();
        Ok(())
    }

    /// Sections overlapping the visible window, in strip columns
    pub fn visible_sections(&self) -> Vec<SectionView> {
        let cell_width = self.config.ui.cell_width_px;
        let cell_height = self.config.ui.cell_height_px;
        let columns = self.page_area.width as i32;

        self.scroller.with_viewport(|page| {
            let offset = page.scroll_offset();
            let to_col = |x: f64| ((x - offset) / cell_width).round() as i32;
            let active = page.active_section().map(|(i, _)| i);

            page.sections()
                .iter()
                .enumerate()
                .filter_map(|(index, section)| {
                    let start_col = to_col(section.offset);
                    let end_col = to_col(section.end());
                    if end_col <= 0 || start_col >= columns {
                        return None;
                    }

                    let panel = section
                        .panel
                        .and_then(|node| page.tree().get(node))
                        .map(|element| PanelView {
                            start_col: to_col(element.x),
                            end_col: to_col(element.x + element.width),
                            row: (element.y / cell_height).round() as u16,
                            rows: (element.client_height / cell_height).floor() as u16,
                            scroll_rows: (element.scroll_top / cell_height).round() as u16,
                        });

                    Some(SectionView {
                        label: section.label.clone(),
                        copy: section.copy.clone(),
                        panel_lines: section.panel_lines.clone(),
                        start_col,
                        end_col,
                        panel,
                        active: active == Some(index),
                    })
                })
                .collect()
        })
    }
}

/// Pixel size of the page strip
fn page_size(config: &AppConfig, area: Rect) -> (f64, f64) {
    (
        area.width as f64 * config.ui.cell_width_px,
        area.height as f64 * config.ui.cell_height_px,
    )
}
