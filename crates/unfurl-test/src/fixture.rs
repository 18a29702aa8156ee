//! Ready-made collapsible panels.

use std::cell::RefCell;
use std::rc::Rc;

use unfurl_core::Node;
use unfurl_layout::LayoutHandle;
use unfurl_widgets::{Collapsible, Toggle};

/// A node carrying a layout element, a toggle and an attached collapsible.
#[derive(Debug)]
pub struct PanelFixture {
    /// Node the components live on
    pub node: Node,
    /// Attached collapsible
    pub collapsible: Rc<RefCell<Collapsible>>,
    /// Toggle driving the collapsible
    pub toggle: Rc<RefCell<Toggle>>,
    /// Layout element driven by the collapsible
    pub element: LayoutHandle,
}

impl PanelFixture {
    /// Current preferred-height override.
    pub fn height(&self) -> Option<f32> {
        self.element.borrow().preferred_height_override()
    }

    /// Height assigned by the last layout pass.
    pub fn measured_height(&self) -> f32 {
        self.element.borrow().measured_height()
    }

    /// Flip the toggle as a user click would.
    pub fn click_toggle(&self) -> bool {
        self.toggle.borrow_mut().toggle().is_some()
    }
}
