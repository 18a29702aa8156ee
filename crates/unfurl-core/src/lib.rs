#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
//! Core types for Unfurl UI behaviors.
//!
//! This crate provides the pieces every behavior builds on:
//! - Tween engine: [`Tween`], [`TweenRunner`], [`Interpolate`]
//! - Frame scheduling: [`Scheduler`], [`FrameScheduler`], [`Tick`]
//! - Scene attachment: [`Node`] with by-type component lookup
//! - Host hooks: [`Lifecycle`]

pub mod animation;
pub mod lifecycle;
pub mod node;
pub mod scheduler;

pub use animation::{lerp, ChangedCallback, CompleteCallback, Interpolate, Tween, TweenRunner};
pub use lifecycle::{dispatch, Lifecycle, LifecyclePhase};
pub use node::{Node, NodeActivity};
pub use scheduler::{FrameScheduler, Scheduler, SharedScheduler, Tick, TickId};
