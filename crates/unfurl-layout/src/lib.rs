#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
//! Layout elements and engine for Unfurl.
//!
//! A [`LayoutElement`] exposes a preferred-height override whose `None`
//! state means "use the natural height". The [`LayoutEngine`] trait is the
//! seam behaviors query; [`ColumnLayout`] stacks content and children
//! vertically.

mod element;
mod engine;

pub use element::{LayoutElement, LayoutHandle};
pub use engine::{ColumnLayout, LayoutEngine, SharedLayoutEngine};
