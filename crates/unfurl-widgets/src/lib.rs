#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
//! Behaviors for Unfurl.
//!
//! - [`Collapsible`]: Collapsed/Expanded state machine driving a layout height
//! - [`Toggle`]: boolean control whose changes can drive a collapsible
//! - [`CollapsibleConfig`]: serde/TOML configuration

pub mod collapsible;
pub mod config;
pub mod error;
pub mod toggle;

pub use collapsible::Collapsible;
pub use config::{CollapseState, CollapsibleConfig, Transition};
pub use error::ConfigError;
pub use toggle::{ListenerId, Toggle, ToggleChanged};
