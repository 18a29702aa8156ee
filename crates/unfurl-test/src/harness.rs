//! Frame-driving harness.

use std::cell::RefCell;
use std::rc::Rc;

use unfurl_core::{FrameScheduler, Node, SharedScheduler};
use unfurl_layout::{ColumnLayout, LayoutElement, LayoutEngine, LayoutHandle, SharedLayoutEngine};
use unfurl_widgets::{Collapsible, CollapsibleConfig, Toggle};

use crate::fixture::PanelFixture;

/// Frames run before `run_until_idle` gives up.
const MAX_FRAMES: usize = 10_000;

/// Deterministic host: a frame scheduler, a layout engine and a root element.
pub struct Harness {
    scheduler: Rc<RefCell<FrameScheduler>>,
    engine: Rc<ColumnLayout>,
    root: LayoutHandle,
    frame_time: f32,
}

impl Harness {
    /// Create a harness running at 60 frames per second.
    pub fn new() -> Self {
        Self::with_layout(ColumnLayout::new())
    }

    /// Create a harness with a specific column layout.
    pub fn with_layout(layout: ColumnLayout) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            scheduler: FrameScheduler::shared(),
            engine: Rc::new(layout),
            root: LayoutElement::new().into_handle(),
            frame_time: 1.0 / 60.0,
        }
    }

    /// Set the frame time in seconds.
    #[must_use]
    pub fn frame_time(mut self, seconds: f32) -> Self {
        self.frame_time = seconds.max(0.0);
        self
    }

    // === Frame Driving ===

    /// Run one frame followed by a layout pass. Returns targets ticked.
    pub fn step(&mut self) -> usize {
        let ticked = FrameScheduler::run_frame(&self.scheduler, self.frame_time);
        self.layout_pass();
        ticked
    }

    /// Run `frames` frames.
    pub fn step_n(&mut self, frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.step();
        }
        self
    }

    /// Run enough frames to cover `seconds`.
    pub fn step_for(&mut self, seconds: f32) -> &mut Self {
        if self.frame_time > 0.0 {
            let frames = (seconds / self.frame_time).ceil().max(0.0) as usize;
            self.step_n(frames);
        }
        self
    }

    /// Step until `collapsible` has no tween in flight. Returns frames run.
    pub fn run_until_idle(&mut self, collapsible: &Rc<RefCell<Collapsible>>) -> usize {
        let mut frames = 0;
        while collapsible.borrow().is_animating() && frames < MAX_FRAMES {
            self.step();
            frames += 1;
        }
        frames
    }

    /// Lay out the root tree. Returns the root height.
    pub fn layout_pass(&mut self) -> f32 {
        self.engine.layout(&mut self.root.borrow_mut())
    }

    // === Accessors ===

    /// The concrete frame scheduler.
    pub fn scheduler(&self) -> &Rc<RefCell<FrameScheduler>> {
        &self.scheduler
    }

    /// The scheduler as injected into behaviors.
    pub fn shared_scheduler(&self) -> SharedScheduler {
        self.scheduler.clone()
    }

    /// The layout engine as injected into behaviors.
    pub fn layout_engine(&self) -> SharedLayoutEngine {
        self.engine.clone()
    }

    /// Root layout element.
    pub fn root(&self) -> &LayoutHandle {
        &self.root
    }

    // === Fixtures ===

    /// Build a panel node with `content_height` of content, attach a
    /// collapsible to it, and append its element to the root.
    ///
    /// The toggle starts in the position matching the initial state.
    pub fn panel(&mut self, name: &str, content_height: f32, config: CollapsibleConfig) -> PanelFixture {
        let mut node = Node::new(name);
        let element = node.add_component(LayoutElement::new().content_height(content_height));
        let toggle = node.add_component(
            Toggle::with_state(config.initial_state.is_expanded()).label(name),
        );
        let collapsible = Collapsible::new(config, self.shared_scheduler())
            .with_layout_engine(self.layout_engine())
            .into_shared();
        node.attach_shared(collapsible.clone());
        Collapsible::attach(&collapsible, &node);
        self.root.borrow_mut().add_child(element.clone());

        PanelFixture {
            node,
            collapsible,
            toggle,
            element,
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("scheduler", &self.scheduler)
            .field("engine", &self.engine)
            .field("frame_time", &self.frame_time)
            .finish_non_exhaustive()
    }
}
