//! Named sections of the horizontal page
//!
//! Navigation jumps to a section by id; the progress HUD asks which section
//! is active at the current offset.

use crate::layout::NodeId;
use crate::{Error, Result};

/// A laid-out section
#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub label: String,
    /// Start offset in content coordinates
    pub offset: f64,
    pub width: f64,
    pub node: NodeId,
    /// Nested vertically scrollable panel, if any
    pub panel: Option<NodeId>,
    pub copy: Vec<String>,
    pub panel_lines: Vec<String>,
}

impl Section {
    pub fn end(&self) -> f64 {
        self.offset + self.width
    }
}

/// Sections in page order
#[derive(Debug, Clone, Default)]
pub struct Sections(Vec<Section>);

impl Sections {
    pub fn new(sections: Vec<Section>) -> Self {
        Self(sections)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.0.get(index)
    }

    pub fn find(&self, id: &str) -> Option<(usize, &Section)> {
        self.0.iter().enumerate().find(|(_, s)| s.id == id)
    }

    /// Start offset of the section named `id`
    pub fn offset_of(&self, id: &str) -> Result<f64> {
        self.find(id)
            .map(|(_, s)| s.offset)
            .ok_or_else(|| Error::UnknownSection(id.to_string()))
    }

    /// Index of the section under the middle of the visible window
    pub fn active(&self, offset: f64, visible_width: f64) -> Option<usize> {
        let probe = offset + visible_width / 2.0;
        let mut active = None;
        for (index, section) in self.0.iter().enumerate() {
            if section.offset <= probe {
                active = Some(index);
            } else {
                break;
            }
        }
        active
    }

    /// Section index `step` places away from `from`, clamped to the ends
    pub fn step(&self, from: usize, step: isize) -> Option<usize> {
        if self.0.is_empty() {
            return None;
        }
        let last = self.0.len() as isize - 1;
        Some((from as isize + step).clamp(0, last) as usize)
    }
}
