//! Recording sink for tween callbacks.

use std::cell::RefCell;
use std::rc::Rc;

/// Collects every value delivered to the callbacks it hands out.
#[derive(Debug, Clone, Default)]
pub struct ValueRecorder {
    values: Rc<RefCell<Vec<f32>>>,
}

impl ValueRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback that appends each value it receives.
    pub fn sink(&self) -> impl FnMut(f32) + 'static {
        let values = Rc::clone(&self.values);
        move |value| values.borrow_mut().push(value)
    }

    /// Snapshot of the recorded values.
    pub fn values(&self) -> Vec<f32> {
        self.values.borrow().clone()
    }

    /// Most recent value.
    pub fn last(&self) -> Option<f32> {
        self.values.borrow().last().copied()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    /// Forget recorded values.
    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }

    /// Whether every step moves from `from` toward `to`, within `tolerance`.
    pub fn is_monotonic(&self, from: f32, to: f32, tolerance: f32) -> bool {
        let direction = (to - from).signum();
        let values = self.values.borrow();
        values
            .windows(2)
            .all(|pair| (pair[1] - pair[0]) * direction >= -tolerance)
    }
}
