//! Tween engine: one active interpolation, delivered once per tick.
//!
//! A [`Tween`] describes a single interpolation request. A [`TweenRunner`]
//! owns at most one active tween and is registered with the injected
//! [`Scheduler`] only while that tween runs. Observation is push-based:
//! every tick the interpolated value is handed to the tween's `on_changed`
//! callbacks, there is no progress query.
//!
//! Starting a new tween replaces the active one immediately. The replaced
//! tween receives no further values and its completion callbacks never run.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::scheduler::{SharedScheduler, Tick, TickId};

// =============================================================================
// Interpolate Trait
// =============================================================================

/// Trait for types that can be linearly interpolated.
pub trait Interpolate: Clone {
    /// Interpolate between two values, `t` in `[0, 1]`.
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        (*to - *from).mul_add(t, *from)
    }
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        (*to - *from).mul_add(f64::from(t), *from)
    }
}

/// Linear interpolation helper.
#[must_use]
pub fn lerp<T: Interpolate>(from: &T, to: &T, t: f32) -> T {
    T::interpolate(from, to, t.clamp(0.0, 1.0))
}

// =============================================================================
// Tween - Interpolation Request
// =============================================================================

/// Callback receiving each interpolated value.
pub type ChangedCallback<T> = Box<dyn FnMut(T)>;

/// Callback run once when a tween reaches its target.
pub type CompleteCallback = Box<dyn FnMut()>;

/// Clamp a requested duration to a usable, non-negative number of seconds.
fn sanitize_duration(duration: f32) -> f32 {
    if duration.is_finite() && duration >= 0.0 {
        duration
    } else {
        log::warn!("tween duration {duration} is invalid, running as zero-duration");
        0.0
    }
}

/// A single interpolation request.
pub struct Tween<T: Interpolate> {
    start_value: T,
    target_value: T,
    duration: f32,
    elapsed: f32,
    ignore_time_scale: bool,
    on_changed: Vec<ChangedCallback<T>>,
    on_complete: Vec<CompleteCallback>,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween from `start_value` to `target_value`.
    ///
    /// Negative or non-finite durations are clamped to zero, which delivers
    /// the target on the first tick.
    #[must_use]
    pub fn new(start_value: T, target_value: T, duration_seconds: f32) -> Self {
        Self {
            start_value,
            target_value,
            duration: sanitize_duration(duration_seconds),
            elapsed: 0.0,
            ignore_time_scale: false,
            on_changed: Vec::new(),
            on_complete: Vec::new(),
        }
    }

    /// Advance with the unscaled frame delta instead of the scaled one.
    #[must_use]
    pub const fn ignore_time_scale(mut self, ignore: bool) -> Self {
        self.ignore_time_scale = ignore;
        self
    }

    /// Append a value callback.
    #[must_use]
    pub fn on_changed(mut self, callback: impl FnMut(T) + 'static) -> Self {
        self.add_on_changed(callback);
        self
    }

    /// Append a value callback in place.
    pub fn add_on_changed(&mut self, callback: impl FnMut(T) + 'static) {
        self.on_changed.push(Box::new(callback));
    }

    /// Append a completion callback.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete.push(Box::new(callback));
        self
    }

    /// Start value.
    #[must_use]
    pub const fn start_value(&self) -> &T {
        &self.start_value
    }

    /// Target value.
    #[must_use]
    pub const fn target_value(&self) -> &T {
        &self.target_value
    }

    /// Duration in seconds.
    #[must_use]
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds advanced so far.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the tween advances on unscaled time.
    #[must_use]
    pub const fn ignores_time_scale(&self) -> bool {
        self.ignore_time_scale
    }

    fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    fn value_at(&self, t: f32) -> T {
        // The final delivery is the target verbatim, not a rounded lerp.
        if t >= 1.0 {
            self.target_value.clone()
        } else {
            lerp(&self.start_value, &self.target_value, t)
        }
    }
}

impl<T: Interpolate + fmt::Debug> fmt::Debug for Tween<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("start_value", &self.start_value)
            .field("target_value", &self.target_value)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("ignore_time_scale", &self.ignore_time_scale)
            .field("on_changed", &self.on_changed.len())
            .field("on_complete", &self.on_complete.len())
            .finish()
    }
}

// =============================================================================
// TweenRunner - Single-Slot Engine
// =============================================================================

/// Runs at most one [`Tween`] at a time on behalf of a single owner.
///
/// Callbacks run while the runner is mutably borrowed, so they must not
/// call back into the same runner.
pub struct TweenRunner<T: Interpolate + 'static> {
    id: TickId,
    scheduler: SharedScheduler,
    this: Weak<RefCell<Self>>,
    active: Option<Tween<T>>,
}

impl<T: Interpolate + 'static> TweenRunner<T> {
    /// Create an idle runner bound to `scheduler`.
    #[must_use]
    pub fn new(scheduler: SharedScheduler) -> Rc<RefCell<Self>> {
        let id = scheduler.borrow_mut().allocate_id();
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                id,
                scheduler,
                this: this.clone(),
                active: None,
            })
        })
    }

    /// Start `tween`, replacing any active one.
    ///
    /// The replaced tween is dropped without delivering further values or
    /// completion callbacks.
    pub fn start(&mut self, tween: Tween<T>) {
        log::trace!("{} starting tween over {}s", self.id, tween.duration);
        if self.active.replace(tween).is_some() {
            log::trace!("{} superseded its active tween", self.id);
        }

        let mut scheduler = self.scheduler.borrow_mut();
        if !scheduler.is_registered(self.id) {
            let target: Weak<RefCell<dyn Tick>> = self.this.clone();
            scheduler.register_per_tick(self.id, target);
        }
    }

    /// Drop the active tween without delivering its target or completion.
    ///
    /// Used by owners that write the animated property directly and must
    /// keep a running tween from overwriting it on the next tick.
    pub fn stop(&mut self) {
        if self.active.take().is_some() {
            log::trace!("{} stopped its active tween", self.id);
            self.release();
        }
    }

    /// Whether no tween is active.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Registration id used with the scheduler.
    #[must_use]
    pub const fn id(&self) -> TickId {
        self.id
    }

    fn release(&self) {
        match self.scheduler.try_borrow_mut() {
            Ok(mut scheduler) => scheduler.deregister_per_tick(self.id),
            // Still registered while idle; the next tick retries.
            Err(_) => log::warn!("{} could not reach the scheduler to deregister", self.id),
        }
    }
}

impl<T: Interpolate + 'static> Tick for TweenRunner<T> {
    fn tick(&mut self) {
        let Some(tween) = self.active.as_mut() else {
            self.release();
            return;
        };

        let dt = self.scheduler.borrow().delta(tween.ignore_time_scale);
        tween.advance(dt);
        let t = tween.progress();
        let value = tween.value_at(t);
        for callback in &mut tween.on_changed {
            callback(value.clone());
        }

        if t >= 1.0 {
            self.release();
            if let Some(mut finished) = self.active.take() {
                log::trace!("{} finished tween", self.id);
                for callback in &mut finished.on_complete {
                    callback();
                }
            }
        }
    }
}

impl<T: Interpolate + 'static> Drop for TweenRunner<T> {
    fn drop(&mut self) {
        if let Ok(mut scheduler) = self.scheduler.try_borrow_mut() {
            scheduler.deregister_per_tick(self.id);
        }
    }
}

impl<T: Interpolate + 'static> fmt::Debug for TweenRunner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenRunner")
            .field("id", &self.id)
            .field("active", &self.active.is_some())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests - TDD Style
// =============================================================================
