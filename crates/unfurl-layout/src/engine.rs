//! Layout engine interface and the column implementation.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::element::{LayoutElement, LayoutHandle};

/// Layout engine consumed by behaviors.
pub trait LayoutEngine {
    /// Preferred height of `element`, honoring its override if set.
    fn preferred_height(&self, element: &LayoutElement) -> f32;

    /// Assign measured heights to `element` and its descendants.
    ///
    /// Returns the height given to `element`.
    fn layout(&self, element: &mut LayoutElement) -> f32;
}

/// Shared handle to an injected layout engine.
pub type SharedLayoutEngine = Rc<dyn LayoutEngine>;

/// Vertical stack: intrinsic content followed by children.
///
/// Padding applies to every element the column measures, so a nested child
/// carries its own padding inside its parent's.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Space above and below the content
    pub padding: f32,
    /// Gap between consecutive children
    pub spacing: f32,
}

impl ColumnLayout {
    /// Create a column layout with no padding or spacing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set vertical padding.
    #[must_use]
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Set the gap between children.
    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Height of `element` ignoring its own override.
    #[must_use]
    pub fn natural_height(&self, element: &LayoutElement) -> f32 {
        let children = element.children();
        let stacked: f32 = children.iter().map(|c| self.child_height(c)).sum();
        let gaps = children.len().saturating_sub(1) as f32 * self.spacing;
        2.0f32.mul_add(self.padding, element.intrinsic_height() + stacked + gaps)
    }

    fn child_height(&self, child: &LayoutHandle) -> f32 {
        match child.try_borrow() {
            Ok(child) => self.preferred_height(&child),
            Err(_) => {
                log::warn!("layout child is mutably borrowed, measuring it as empty");
                0.0
            }
        }
    }
}

impl LayoutEngine for ColumnLayout {
    fn preferred_height(&self, element: &LayoutElement) -> f32 {
        element
            .preferred_height_override()
            .unwrap_or_else(|| self.natural_height(element))
    }

    fn layout(&self, element: &mut LayoutElement) -> f32 {
        for child in element.children() {
            match child.try_borrow_mut() {
                Ok(mut child) => {
                    self.layout(&mut child);
                }
                Err(_) => log::warn!("layout child is borrowed, skipping this pass"),
            };
        }
        let height = self.preferred_height(element);
        element.set_measured_height(height);
        height
    }
}
