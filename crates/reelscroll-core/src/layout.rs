//! Parent-link element tree
//!
//! Nodes live in an arena and only know their parent. That is all the wheel
//! policy needs: walking up from the element under the pointer and asking
//! each container whether it can absorb a vertical scroll right now.

use crate::{Error, Result};

/// Index of an element in an [`ElementTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// Vertical overflow behaviour of an element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
    Scroll,
}

impl Overflow {
    /// Whether content overflowing on this axis can be scrolled
    #[inline]
    pub fn is_scrollable(&self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub parent: Option<NodeId>,
    pub label: String,
    pub overflow_y: Overflow,
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
    /// Horizontal span in content coordinates
    pub x: f64,
    pub width: f64,
    /// Vertical span from the top of the page
    pub y: f64,
    pub height: f64,
}

impl Element {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Place the element horizontally
    pub fn span(mut self, x: f64, width: f64) -> Self {
        self.x = x;
        self.width = width;
        self
    }

    /// Place the element vertically
    pub fn band(mut self, y: f64, height: f64) -> Self {
        self.y = y;
        self.height = height;
        self
    }

    /// Make the element a vertical scroll container
    pub fn scrollable(mut self, client_height: f64, scroll_height: f64) -> Self {
        self.overflow_y = Overflow::Auto;
        self.client_height = client_height;
        self.scroll_height = scroll_height;
        self
    }

    /// Largest valid vertical offset
    #[inline]
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    fn at_top(&self) -> bool {
        self.scroll_top <= 0.0
    }

    fn at_bottom(&self) -> bool {
        (self.scroll_height - self.client_height - self.scroll_top).abs() < 1.0
    }

    /// Whether a vertical gesture in `direction` would scroll this element
    pub fn can_absorb_vertical(&self, direction: f64) -> bool {
        if !self.overflow_y.is_scrollable() || self.scroll_height <= self.client_height {
            return false;
        }
        (direction < 0.0 && !self.at_top()) || (direction > 0.0 && !self.at_bottom())
    }

    fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Arena of elements linked to their parents
#[derive(Debug, Clone)]
pub struct ElementTree {
    nodes: Vec<Element>,
}

impl ElementTree {
    /// Create a tree whose root is `root`
    pub fn new(root: Element) -> Self {
        Self {
            nodes: vec![Element { parent: None, ..root }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `element` as a child of `parent`
    pub fn insert(&mut self, parent: NodeId, element: Element) -> Result<NodeId> {
        if parent.0 >= self.nodes.len() {
            return Err(Error::UnknownNode(parent.0));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            parent: Some(parent),
            ..element
        });
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|e| e.parent)
    }

    /// Iterate from `id` up to the root, `id` included
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map(|_| id),
        }
    }

    /// Whether `node` is `ancestor` or lies below it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// Nearest element from `target` upward that can absorb a vertical
    /// scroll in `direction`
    ///
    /// The walk stops at `boundary` and at any element containing it, so the
    /// bound viewport and its own containers never count.
    pub fn vertical_absorber(
        &self,
        target: NodeId,
        direction: f64,
        boundary: NodeId,
    ) -> Option<NodeId> {
        for id in self.ancestors(target) {
            if self.contains(id, boundary) {
                return None;
            }
            let element = &self.nodes[id.0];
            if element.can_absorb_vertical(direction) {
                return Some(id);
            }
        }
        None
    }

    /// Scroll a container vertically the way the host would natively
    pub fn scroll_vertical(&mut self, id: NodeId, delta: f64) -> Result<f64> {
        let element = self.get_mut(id).ok_or(Error::UnknownNode(id.0))?;
        let next = (element.scroll_top + delta).clamp(0.0, element.max_scroll_top());
        element.scroll_top = if next.is_nan() { 0.0 } else { next };
        Ok(element.scroll_top)
    }

    /// Deepest element whose box contains the point (`x`, `y`)
    pub fn hit_test(&self, x: f64, y: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, usize)> = None;
        for (index, element) in self.nodes.iter().enumerate() {
            if !element.contains_point(x, y) {
                continue;
            }
            let id = NodeId(index);
            let depth = self.ancestors(id).count();
            if best.map_or(true, |(_, d)| depth > d) {
                best = Some((id, depth));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Iterator returned by [`ElementTree::ancestors`]
pub struct Ancestors<'a> {
    tree: &'a ElementTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root > viewport > section > panel > item
    fn sample_tree() -> (ElementTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree =
            ElementTree::new(Element::new("page").span(0.0, 1000.0).band(0.0, 600.0));
        let viewport = tree
            .insert(tree.root(), Element::new("viewport").span(0.0, 3000.0).band(0.0, 600.0))
            .unwrap();
        let section = tree
            .insert(viewport, Element::new("services").span(1000.0, 1000.0).band(0.0, 600.0))
            .unwrap();
        let panel = tree
            .insert(
                section,
                Element::new("panel")
                    .span(1100.0, 800.0)
                    .band(300.0, 200.0)
                    .scrollable(200.0, 600.0),
            )
            .unwrap();
        let item = tree
            .insert(panel, Element::new("item").span(1100.0, 800.0).band(300.0, 200.0))
            .unwrap();
        (tree, viewport, section, panel, item)
    }

    #[test]
    fn test_ancestors_and_contains() {
        let (tree, viewport, section, panel, item) = sample_tree();
        let chain: Vec<_> = tree.ancestors(item).collect();
        assert_eq!(chain, vec![item, panel, section, viewport, NodeId::ROOT]);
        assert!(tree.contains(viewport, item));
        assert!(tree.contains(item, item));
        assert!(!tree.contains(panel, section));
    }

    #[test]
    fn test_insert_unknown_parent() {
        let mut tree = ElementTree::new(Element::new("page"));
        let err = tree.insert(NodeId(9), Element::new("x")).unwrap_err();
        assert!(matches!(err, Error::UnknownNode(9)));
    }

    #[test]
    fn test_absorber_respects_direction_boundaries() {
        let (mut tree, viewport, _, panel, item) = sample_tree();

        // At the top: can go down, not up
        assert_eq!(tree.vertical_absorber(item, 100.0, viewport), Some(panel));
        assert_eq!(tree.vertical_absorber(item, -100.0, viewport), None);

        // In the middle: both ways
        tree.scroll_vertical(panel, 200.0).unwrap();
        assert_eq!(tree.vertical_absorber(item, 100.0, viewport), Some(panel));
        assert_eq!(tree.vertical_absorber(item, -100.0, viewport), Some(panel));

        // At the bottom: only up
        tree.scroll_vertical(panel, 1000.0).unwrap();
        assert_eq!(tree.get(panel).unwrap().scroll_top, 400.0);
        assert_eq!(tree.vertical_absorber(item, 100.0, viewport), None);
        assert_eq!(tree.vertical_absorber(item, -100.0, viewport), Some(panel));
    }

    #[test]
    fn test_absorber_stops_at_boundary() {
        let (mut tree, viewport, _, _, _) = sample_tree();
        // Even a scrollable root never counts once the walk reaches the viewport
        let root = tree.get_mut(NodeId::ROOT).unwrap();
        root.overflow_y = Overflow::Scroll;
        root.client_height = 100.0;
        root.scroll_height = 5000.0;

        assert_eq!(tree.vertical_absorber(viewport, 50.0, viewport), None);
        assert_eq!(tree.vertical_absorber(NodeId::ROOT, 50.0, viewport), None);
    }

    #[test]
    fn test_hidden_or_short_content_never_absorbs() {
        let mut tree = ElementTree::new(Element::new("page"));
        let viewport = tree.insert(tree.root(), Element::new("viewport")).unwrap();
        let mut hidden = Element::new("hidden").scrollable(100.0, 400.0);
        hidden.overflow_y = Overflow::Hidden;
        let hidden = tree.insert(viewport, hidden).unwrap();
        let short = tree
            .insert(viewport, Element::new("short").scrollable(400.0, 400.0))
            .unwrap();

        assert_eq!(tree.vertical_absorber(hidden, 10.0, viewport), None);
        assert_eq!(tree.vertical_absorber(short, 10.0, viewport), None);
    }

    #[test]
    fn test_hit_test_picks_deepest() {
        let (tree, viewport, section, _, item) = sample_tree();
        assert_eq!(tree.hit_test(1500.0, 400.0), Some(item));
        assert_eq!(tree.hit_test(1050.0, 400.0), Some(section));
        assert_eq!(tree.hit_test(2500.0, 400.0), Some(viewport));
        assert_eq!(tree.hit_test(-5.0, 400.0), None);
    }

    #[test]
    fn test_hit_test_uses_vertical_band() {
        let (tree, _, section, _, item) = sample_tree();
        // Same column as the panel, but above and below it
        assert_eq!(tree.hit_test(1500.0, 100.0), Some(section));
        assert_eq!(tree.hit_test(1500.0, 550.0), Some(section));
        assert_eq!(tree.hit_test(1500.0, 300.0), Some(item));
        assert_eq!(tree.hit_test(1500.0, 500.0), Some(section));
        // Outside the page altogether
        assert_eq!(tree.hit_test(1500.0, -1.0), None);
        assert_eq!(tree.hit_test(1500.0, 600.0), None);
    }
}
