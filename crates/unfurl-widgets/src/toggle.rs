//! Toggle control.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message emitted when toggle state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleChanged {
    /// The new toggle state
    pub on: bool,
}

type ToggleListener = Box<dyn FnMut(bool)>;

/// Handle returned by [`Toggle::add_listener`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Boolean on/off control with change listeners.
#[derive(Default, Serialize, Deserialize)]
pub struct Toggle {
    /// Current state
    on: bool,
    /// Whether user interaction is ignored
    disabled: bool,
    /// Label text
    label: String,
    /// Change listeners, in registration order
    #[serde(skip)]
    listeners: Vec<(ListenerId, ToggleListener)>,
    /// Next listener id
    #[serde(skip)]
    next_listener: u64,
}

impl Toggle {
    /// Create a new toggle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a toggle with initial state.
    #[must_use]
    pub fn with_state(on: bool) -> Self {
        Self::default().on(on)
    }

    /// Set the toggle state.
    #[must_use]
    pub const fn on(mut self, on: bool) -> Self {
        self.on = on;
        self
    }

    /// Set whether the toggle is disabled.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Get current state.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Get disabled state.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable user interaction.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Get the label.
    #[must_use]
    pub fn get_label(&self) -> &str {
        &self.label
    }

    /// Subscribe to value changes.
    ///
    /// Listeners run while the toggle is mutably borrowed and must not
    /// reach back into it.
    pub fn add_listener(&mut self, listener: impl FnMut(bool) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unsubscribe a listener. Returns whether it was present.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Number of subscribed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Set the value, notifying listeners if it changed.
    pub fn set_on(&mut self, on: bool) -> Option<ToggleChanged> {
        if self.on == on {
            return None;
        }
        self.on = on;
        for (_, listener) in &mut self.listeners {
            listener(on);
        }
        Some(ToggleChanged { on })
    }

    /// Set the value without notifying listeners.
    pub fn set_on_without_notify(&mut self, on: bool) {
        self.on = on;
    }

    /// Flip the value as a user interaction would. Disabled toggles ignore it.
    pub fn toggle(&mut self) -> Option<ToggleChanged> {
        if self.disabled {
            return None;
        }
        self.set_on(!self.on)
    }
}

impl fmt::Debug for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toggle")
            .field("on", &self.on)
            .field("disabled", &self.disabled)
            .field("label", &self.label)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
