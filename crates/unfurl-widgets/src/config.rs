//! Serializable configuration for collapsible widgets.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a collapsible moves between its states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Write the target size immediately.
    Instant,
    /// Animate the size over the transition duration.
    #[default]
    Tween,
}

/// The two states of a collapsible widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollapseState {
    /// Shrunk to the collapsed height.
    Collapsed,
    /// Sized to its natural content height.
    #[default]
    Expanded,
}

impl CollapseState {
    /// State selected by a toggle value: `true` expands.
    #[must_use]
    pub const fn from_toggle(on: bool) -> Self {
        if on {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    /// Toggle value matching this state.
    #[must_use]
    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }
}

/// Authored settings of a collapsible widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapsibleConfig {
    /// Height while collapsed
    pub min_height: f32,
    /// Transition mode
    pub transition: Transition,
    /// Tween duration in seconds
    pub transition_duration: f32,
    /// State applied when the widget is created
    pub initial_state: CollapseState,
}

impl Default for CollapsibleConfig {
    fn default() -> Self {
        Self {
            min_height: 18.0,
            transition: Transition::Tween,
            transition_duration: 0.3,
            initial_state: CollapseState::Expanded,
        }
    }
}

impl CollapsibleConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML, or a validation
    /// error for out-of-range values.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every numeric field is usable.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_height.is_finite() || self.min_height < 0.0 {
            return Err(ConfigError::InvalidMinHeight(self.min_height));
        }
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(ConfigError::InvalidDuration(self.transition_duration));
        }
        Ok(())
    }

    /// Copy with out-of-range fields clamped instead of rejected.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.min_height = sanitize_non_negative(self.min_height, "min_height");
        self.transition_duration =
            sanitize_non_negative(self.transition_duration, "transition_duration");
        self
    }

    /// Set the collapsed height.
    #[must_use]
    pub const fn min_height(mut self, height: f32) -> Self {
        self.min_height = height;
        self
    }

    /// Set the transition mode.
    #[must_use]
    pub const fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Set the tween duration in seconds.
    #[must_use]
    pub const fn transition_duration(mut self, seconds: f32) -> Self {
        self.transition_duration = seconds;
        self
    }

    /// Set the initial state.
    #[must_use]
    pub const fn initial_state(mut self, state: CollapseState) -> Self {
        self.initial_state = state;
        self
    }
}

pub(crate) fn sanitize_non_negative(value: f32, field: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{field} {value} is out of range, clamping to 0");
        0.0
    }
}
