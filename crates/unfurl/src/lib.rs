//! Unfurl: animated collapsible panels and tweened layout properties.
//!
//! A [`Collapsible`](widgets::Collapsible) moves a layout element between a
//! collapsed height and its natural height, either instantly or through a
//! [`TweenRunner`] driven once per frame by the host's [`Scheduler`].
//!
//! ```
//! use std::rc::Rc;
//! use unfurl::layout::{ColumnLayout, LayoutElement, LayoutEngine};
//! use unfurl::widgets::{CollapseState, Collapsible, CollapsibleConfig};
//! use unfurl::{FrameScheduler, SharedScheduler};
//!
//! let scheduler = FrameScheduler::shared();
//! let shared: SharedScheduler = scheduler.clone();
//! let element = LayoutElement::new().content_height(120.0).into_handle();
//! ColumnLayout::new().layout(&mut element.borrow_mut());
//!
//! let mut panel = Collapsible::new(CollapsibleConfig::new(), shared)
//!     .with_layout_engine(Rc::new(ColumnLayout::new()))
//!     .with_layout(element.clone());
//! panel.request_state(CollapseState::Collapsed);
//!
//! while panel.is_animating() {
//!     FrameScheduler::run_frame(&scheduler, 1.0 / 60.0);
//! }
//! assert_eq!(element.borrow().preferred_height_override(), Some(18.0));
//! ```

#![allow(clippy::missing_const_for_fn, clippy::module_name_repetitions)]

pub use unfurl_core::*;
pub use unfurl_layout as layout;
pub use unfurl_widgets as widgets;
