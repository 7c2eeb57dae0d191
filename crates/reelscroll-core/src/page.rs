//! The horizontally scrolling page
//!
//! `Page` is the concrete viewport the engine binds to: a layout tree with a
//! viewport node, its sections laid out left to right, and the horizontal
//! offset the host would otherwise keep in its scroll container.

use std::time::Duration;

use crate::config::SectionConfig;
use crate::layout::{Element, ElementTree, NodeId};
use crate::scroll::{ScrollConfigExt, ScrollHandle, ScrollToOptions, Viewport};
use crate::sections::{Section, Sections};
use crate::{Error, Result};

/// Share of a section's height given to its nested panel
const PANEL_HEIGHT_RATIO: f64 = 0.25;
/// Horizontal inset of a panel inside its section
const PANEL_INSET_RATIO: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Page {
    tree: ElementTree,
    viewport: NodeId,
    offset: f64,
    visible_width: f64,
    visible_height: f64,
    content_width: f64,
    line_height: f64,
    layout: Vec<SectionConfig>,
    sections: Sections,
}

impl Page {
    /// A bare viewport with fixed content width and no sections
    pub fn new(visible_width: f64, content_width: f64) -> Self {
        let mut tree = ElementTree::new(Element::new("page").span(0.0, visible_width));
        let viewport = tree.root();
        if let Some(root) = tree.get_mut(viewport) {
            root.width = content_width;
        }
        Self {
            tree,
            viewport,
            offset: 0.0,
            visible_width,
            visible_height: 0.0,
            content_width,
            line_height: 0.0,
            layout: Vec::new(),
            sections: Sections::default(),
        }
    }

    /// Lay `sections` out side by side, each `width` viewports wide
    pub fn from_sections(
        sections: &[SectionConfig],
        visible_width: f64,
        visible_height: f64,
        line_height: f64,
    ) -> Result<Self> {
        let mut page = Self {
            tree: ElementTree::new(Element::new("page")),
            viewport: NodeId::ROOT,
            offset: 0.0,
            visible_width,
            visible_height,
            content_width: 0.0,
            line_height,
            layout: sections.to_vec(),
            sections: Sections::default(),
        };
        page.relayout()?;
        Ok(page)
    }

    fn relayout(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.sections);

        let height = self.visible_height;
        let mut tree = ElementTree::new(
            Element::new("page")
                .span(0.0, self.visible_width)
                .band(0.0, height),
        );
        let viewport = tree.insert(tree.root(), Element::new("viewport").band(0.0, height))?;

        let mut sections = Vec::with_capacity(self.layout.len());
        let mut x = 0.0;
        for config in &self.layout {
            let width = config.width.max(0.0) * self.visible_width;
            let node = tree.insert(
                viewport,
                Element::new(config.id.clone()).span(x, width).band(0.0, height),
            )?;

            let panel = if config.panel.is_empty() {
                None
            } else {
                let client_height = (height * PANEL_HEIGHT_RATIO).max(self.line_height);
                let scroll_height = config.panel.len() as f64 * self.line_height;
                let inset = width * PANEL_INSET_RATIO;
                // Bottom-anchored, one line clear of the section's lower edge
                let top = (height - client_height - self.line_height).max(0.0);
                let mut element = Element::new(format!("{}-panel", config.id))
                    .span(x + inset, width - 2.0 * inset)
                    .band(top, client_height)
                    .scrollable(client_height, scroll_height);
                // Keep the reader's place across resizes
                if let Some(old) = previous
                    .find(&config.id)
                    .and_then(|(_, s)| s.panel)
                    .and_then(|id| self.tree.get(id))
                {
                    element.scroll_top = old.scroll_top.min(element.max_scroll_top());
                }
                Some(tree.insert(node, element)?)
            };

            sections.push(Section {
                id: config.id.clone(),
                label: config.label.clone(),
                offset: x,
                width,
                node,
                panel,
                copy: config.copy.clone(),
                panel_lines: config.panel.clone(),
            });
            x += width;
        }

        if let Some(element) = tree.get_mut(viewport) {
            element.width = x;
        }

        self.tree = tree;
        self.viewport = viewport;
        self.content_width = x;
        self.sections = Sections::new(sections);
        self.offset = self.clamp_offset(self.offset);
        Ok(())
    }

    /// Apply a new visible size, re-laying out sections that scale with it
    ///
    /// The stored offset is clamped into the new range the way a browser
    /// clamps a scroll container; call `ScrollHandle::resize` afterwards.
    pub fn resize(&mut self, visible_width: f64, visible_height: f64) -> Result<()> {
        self.visible_width = visible_width;
        self.visible_height = visible_height;
        if self.layout.is_empty() {
            if let Some(root) = self.tree.get_mut(self.viewport) {
                root.width = self.content_width;
            }
            self.offset = self.clamp_offset(self.offset);
            Ok(())
        } else {
            self.relayout()
        }
    }

    /// Change the content width of a bare page
    pub fn set_content_width(&mut self, content_width: f64) {
        self.content_width = content_width;
        self.offset = self.clamp_offset(self.offset);
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, self.max_scroll())
        }
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn viewport_node(&self) -> NodeId {
        self.viewport
    }

    pub fn visible_width(&self) -> f64 {
        self.visible_width
    }

    pub fn visible_height(&self) -> f64 {
        self.visible_height
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// Start offset of the section named `id`
    pub fn section_offset(&self, id: &str) -> Result<f64> {
        self.sections.offset_of(id)
    }

    /// Section under the middle of the visible window
    pub fn active_section(&self) -> Option<(usize, &Section)> {
        let index = self.sections.active(self.offset, self.visible_width)?;
        self.sections.get(index).map(|s| (index, s))
    }

    /// Element under a point `x` pixels from the left and `y` pixels from
    /// the top of the window
    pub fn hit_test(&self, x: f64, y: f64) -> Option<NodeId> {
        self.tree.hit_test(self.offset + x, y)
    }

    /// Scroll a nested panel natively
    pub fn scroll_panel(&mut self, node: NodeId, delta: f64) -> Result<f64> {
        self.tree.scroll_vertical(node, delta)
    }

    /// Vertical offset of a nested panel
    pub fn panel_scroll_top(&self, node: NodeId) -> Result<f64> {
        self.tree
            .get(node)
            .map(|e| e.scroll_top)
            .ok_or(Error::UnknownNode(node.0))
    }
}

impl Viewport for Page {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = self.clamp_offset(offset);
    }

    fn content_extent(&self) -> f64 {
        self.content_width
    }

    fn visible_extent(&self) -> f64 {
        self.visible_width
    }

    fn vertical_absorber(&self, target: Option<NodeId>, direction: f64) -> Option<NodeId> {
        self.tree.vertical_absorber(target?, direction, self.viewport)
    }
}

impl ScrollHandle<Page> {
    /// Animate to the section named `id`
    ///
    /// Uses the configured section duration unless `duration` is given.
    pub fn scroll_to_section(&self, id: &str, duration: Option<Duration>) -> Result<()> {
        let offset = self.with_viewport(|page| page.section_offset(id))?;
        let duration = duration.unwrap_or_else(|| self.config().section_scroll_duration());
        self.scroll_to(offset, ScrollToOptions::animated(duration));
        Ok(())
    }

    /// Animate to the section at `index`
    pub fn scroll_to_section_index(&self, index: usize) -> Result<()> {
        let id = self
            .with_viewport(|page| page.sections().get(index).map(|s| s.id.clone()))
            .ok_or_else(|| Error::UnknownSection(format!("#{}", index + 1)))?;
        self.scroll_to_section(&id, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::scroll::{attach, ScrollSmoother, WheelEvent, WheelOutcome};
    use crate::ScrollConfig;
    use std::time::Instant;

    fn default_page() -> Page {
        Page::from_sections(&AppConfig::default().sections, 1000.0, 600.0, 40.0).unwrap()
    }

    #[test]
    fn test_sections_laid_out_side_by_side() {
        let page = default_page();
        assert_eq!(page.sections().len(), 7);
        assert_eq!(page.content_extent(), 7000.0);
        assert_eq!(page.max_scroll(), 6000.0);
        assert_eq!(page.section_offset("hero").unwrap(), 0.0);
        assert_eq!(page.section_offset("projects").unwrap(), 2000.0);
        assert!(matches!(page.section_offset("blog"), Err(Error::UnknownSection(_))));
    }

    #[test]
    fn test_offset_writes_are_clamped() {
        let mut page = Page::new(1000.0, 3000.0);
        page.set_scroll_offset(5000.0);
        assert_eq!(page.scroll_offset(), 2000.0);
        page.set_scroll_offset(f64::NAN);
        assert_eq!(page.scroll_offset(), 0.0);
    }

    #[test]
    fn test_resize_rescales_and_clamps() {
        let mut page = default_page();
        page.set_scroll_offset(6000.0);

        page.resize(500.0, 300.0).unwrap();
        assert_eq!(page.content_extent(), 3500.0);
        assert_eq!(page.section_offset("services").unwrap(), 500.0);
        assert_eq!(page.scroll_offset(), 3000.0);
    }

    #[test]
    fn test_bare_page_resize_clamps() {
        let mut page = Page::new(1000.0, 3000.0);
        page.set_scroll_offset(2000.0);
        page.resize(2500.0, 0.0).unwrap();
        assert_eq!(page.max_scroll(), 500.0);
        assert_eq!(page.scroll_offset(), 500.0);
    }

    #[test]
    fn test_panel_scroll_survives_resize() {
        let mut page = default_page();
        let panel = page.sections().find("services").unwrap().1.panel.unwrap();
        page.scroll_panel(panel, 60.0).unwrap();

        page.resize(1200.0, 600.0).unwrap();
        let panel = page.sections().find("services").unwrap().1.panel.unwrap();
        assert_eq!(page.panel_scroll_top(panel).unwrap(), 60.0);
    }

    #[test]
    fn test_active_section_tracks_offset() {
        let mut page = default_page();
        assert_eq!(page.active_section().unwrap().1.id, "hero");
        page.set_scroll_offset(2600.0);
        assert_eq!(page.active_section().unwrap().1.id, "gallery");
    }

    #[test]
    fn test_wheel_over_panel_scrolls_panel_first() {
        let mut page = default_page();
        page.set_scroll_offset(1000.0);
        let mut smoother = ScrollSmoother::new(ScrollConfig::default(), &page);

        // Middle of the services section, inside its panel (410..560px)
        let target = page.hit_test(500.0, 450.0).unwrap();
        let panel = page.sections().find("services").unwrap().1.panel.unwrap();
        assert!(page.tree().contains(panel, target));

        let event = WheelEvent::vertical(100.0).with_target(target);
        assert_eq!(smoother.wheel(&page, &event), WheelOutcome::NestedScroll(panel));
        assert_eq!(smoother.target(), 1000.0);

        // 12 lines * 40px in a 150px panel bottoms out at 330px
        assert_eq!(page.scroll_panel(panel, 1000.0).unwrap(), 330.0);
        assert_eq!(smoother.wheel(&page, &event), WheelOutcome::Mapped);
        assert_eq!(smoother.target(), 1100.0);

        // Outside any panel the page takes the gesture
        let hero_side = page.hit_test(50.0, 450.0).unwrap();
        let event = WheelEvent::vertical(100.0).with_target(hero_side);
        assert_eq!(smoother.wheel(&page, &event), WheelOutcome::Mapped);
    }

    #[test]
    fn test_wheel_above_panel_scrolls_page() {
        let mut page = default_page();
        page.set_scroll_offset(1000.0);
        let mut smoother = ScrollSmoother::new(ScrollConfig::default(), &page);
        let (_, services) = page.sections().find("services").unwrap();
        let (section, panel) = (services.node, services.panel.unwrap());

        let element = page.tree().get(panel).unwrap();
        assert_eq!((element.y, element.height), (410.0, 150.0));

        // Same column as the panel, over the copy above it
        let target = page.hit_test(500.0, 100.0).unwrap();
        assert_eq!(target, section);
        let event = WheelEvent::vertical(100.0).with_target(target);
        assert_eq!(smoother.wheel(&page, &event), WheelOutcome::Mapped);
        assert_eq!(page.panel_scroll_top(panel).unwrap(), 0.0);

        // Below the window there is nothing to hit
        assert_eq!(page.hit_test(500.0, 600.0), None);
    }

    #[test]
    fn test_frame_drives_page_offset() {
        let mut page = default_page();
        let mut smoother = ScrollSmoother::new(ScrollConfig::default(), &page);
        let start = Instant::now();
        smoother.scroll_to(
            &mut page,
            3000.0,
            ScrollToOptions::animated(Duration::from_millis(200)),
            start,
        );
        smoother.frame(&mut page, start + Duration::from_millis(200));
        assert_eq!(page.scroll_offset(), 3000.0);
        assert_eq!(page.active_section().unwrap().1.id, "gallery");
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_to_section_through_handle() {
        let mut handle = attach(default_page(), ScrollConfig::default());

        handle.scroll_to_section("clients", None).unwrap();
        assert!(handle.snapshot().auto_scrolling);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(handle.with_viewport(|p| p.scroll_offset()), 4000.0);

        handle.scroll_to_section_index(0).unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(handle.with_viewport(|p| p.scroll_offset()), 0.0);

        assert!(handle.scroll_to_section("blog", None).is_err());
        assert!(handle.scroll_to_section_index(42).is_err());
        handle.release();
    }
}
