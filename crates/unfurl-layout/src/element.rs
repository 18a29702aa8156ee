//! Layout elements and the preferred-height override.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a layout element.
pub type LayoutHandle = Rc<RefCell<LayoutElement>>;

/// A node of the layout tree.
///
/// `preferred_height` is the explicit size override. `None` is the sentinel
/// for "no override": the layout engine computes the natural height from
/// `content_height` and the children.
#[derive(Debug, Clone, Default)]
pub struct LayoutElement {
    preferred_height: Option<f32>,
    content_height: f32,
    children: Vec<LayoutHandle>,
    measured_height: f32,
}

impl LayoutElement {
    /// Create an element with no content and no override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intrinsic content height.
    #[must_use]
    pub fn content_height(mut self, height: f32) -> Self {
        self.set_content_height(height);
        self
    }

    /// Set an explicit preferred height.
    #[must_use]
    pub fn preferred_height(mut self, height: f32) -> Self {
        self.set_preferred_height(height);
        self
    }

    /// Add a child element.
    #[must_use]
    pub fn child(mut self, child: LayoutHandle) -> Self {
        self.children.push(child);
        self
    }

    /// Wrap into a shared handle.
    #[must_use]
    pub fn into_handle(self) -> LayoutHandle {
        Rc::new(RefCell::new(self))
    }

    /// Current override, `None` when the natural height is used.
    #[must_use]
    pub const fn preferred_height_override(&self) -> Option<f32> {
        self.preferred_height
    }

    /// Whether an explicit override is set.
    #[must_use]
    pub const fn has_override(&self) -> bool {
        self.preferred_height.is_some()
    }

    /// Set the override. Negative heights are clamped to zero.
    pub fn set_preferred_height(&mut self, height: f32) {
        self.preferred_height = Some(height.max(0.0));
    }

    /// Clear the override, returning the previous one.
    pub fn clear_preferred_height(&mut self) -> Option<f32> {
        self.preferred_height.take()
    }

    /// Replace the override wholesale, returning the previous one.
    pub fn replace_preferred_height(&mut self, height: Option<f32>) -> Option<f32> {
        std::mem::replace(&mut self.preferred_height, height.map(|h| h.max(0.0)))
    }

    /// Intrinsic content height, excluding children.
    #[must_use]
    pub const fn intrinsic_height(&self) -> f32 {
        self.content_height
    }

    /// Set the intrinsic content height. Negative heights are clamped to zero.
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
    }

    /// Child elements in layout order.
    #[must_use]
    pub fn children(&self) -> &[LayoutHandle] {
        &self.children
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: LayoutHandle) {
        self.children.push(child);
    }

    /// Height assigned by the most recent layout pass.
    #[must_use]
    pub const fn measured_height(&self) -> f32 {
        self.measured_height
    }

    /// Record the height assigned by a layout pass.
    pub fn set_measured_height(&mut self, height: f32) {
        self.measured_height = height.max(0.0);
    }
}
