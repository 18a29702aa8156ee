#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
//! Testing harness for Unfurl behaviors.
//!
//! Drives a [`FrameScheduler`](unfurl_core::FrameScheduler) at a fixed frame
//! time and runs layout passes between frames, the way a host would.
//!
//! # Example
//!
//! ```
//! use unfurl_test::Harness;
//! use unfurl_widgets::{CollapseState, CollapsibleConfig};
//!
//! let mut harness = Harness::new();
//! let panel = harness.panel("details", 120.0, CollapsibleConfig::new());
//! harness.layout_pass();
//!
//! panel.collapsible.borrow_mut().request_state(CollapseState::Collapsed);
//! harness.run_until_idle(&panel.collapsible);
//! assert_eq!(panel.height(), Some(18.0));
//! ```

mod fixture;
mod harness;
mod recorder;

pub use fixture::PanelFixture;
pub use harness::Harness;
pub use recorder::ValueRecorder;
