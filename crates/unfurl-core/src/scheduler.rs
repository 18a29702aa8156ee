//! Per-frame scheduling for tick-driven components.
//!
//! A [`Scheduler`] hands out per-tick registrations and reports the frame
//! delta. Targets are held weakly: dropping a registered component is enough
//! to release its slot, the next frame prunes it.
//!
//! [`FrameScheduler`] is the deterministic implementation used by hosts and
//! tests. Each call to [`FrameScheduler::run_frame`] advances the clock once
//! and ticks every target that was registered when the frame began.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier for a per-tick registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// Create a new tick ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// A component that receives one callback per frame while registered.
pub trait Tick {
    /// Per-frame update entry point.
    fn tick(&mut self);
}

/// Host scheduler interface.
pub trait Scheduler {
    /// Allocate an identifier for a future registration.
    fn allocate_id(&mut self) -> TickId;

    /// Register `target` for per-tick callbacks under `id`.
    ///
    /// Registering an id that is already present replaces its target.
    fn register_per_tick(&mut self, id: TickId, target: Weak<RefCell<dyn Tick>>);

    /// Remove the registration for `id`. Unknown ids are ignored.
    fn deregister_per_tick(&mut self, id: TickId);

    /// Whether `id` currently holds a registration.
    fn is_registered(&self, id: TickId) -> bool;

    /// Delta of the current frame in seconds.
    ///
    /// With `unscaled` set the raw frame time is returned, otherwise the
    /// frame time multiplied by the global time scale.
    fn delta(&self, unscaled: bool) -> f32;
}

/// Shared handle to an injected scheduler.
pub type SharedScheduler = Rc<RefCell<dyn Scheduler>>;

struct Registration {
    id: TickId,
    target: Weak<RefCell<dyn Tick>>,
}

/// Deterministic frame scheduler.
pub struct FrameScheduler {
    next_id: u64,
    registrations: Vec<Registration>,
    time_scale: f32,
    delta: f32,
    unscaled_delta: f32,
    frame: u64,
}

impl FrameScheduler {
    /// Create a scheduler with a time scale of 1.0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            registrations: Vec::new(),
            time_scale: 1.0,
            delta: 0.0,
            unscaled_delta: 0.0,
            frame: 0,
        }
    }

    /// Create a scheduler wrapped in a shared handle.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Set the global time scale. Negative scales are clamped to zero.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    /// Current global time scale.
    #[must_use]
    pub const fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Number of frames run so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of live registrations.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.target.strong_count() > 0)
            .count()
    }

    /// Whether any live target is registered.
    #[must_use]
    pub fn has_registrations(&self) -> bool {
        self.registered_count() > 0
    }

    /// Start a new frame of `dt` seconds without ticking anything.
    pub fn begin_frame(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.unscaled_delta = dt;
        self.delta = dt * self.time_scale;
        self.frame += 1;
        self.registrations.retain(|r| r.target.strong_count() > 0);
    }

    /// Run one frame: advance the clock by `dt` and tick every target that
    /// was registered when the frame began.
    ///
    /// Targets registered during the frame are first ticked on the next one.
    /// A target that was already registered still ticks this frame, even if
    /// an earlier target replaced its work.
    /// Returns the number of targets ticked.
    pub fn run_frame(this: &Rc<RefCell<Self>>, dt: f32) -> usize {
        let targets: Vec<(TickId, Weak<RefCell<dyn Tick>>)> = {
            let mut scheduler = this.borrow_mut();
            scheduler.begin_frame(dt);
            scheduler
                .registrations
                .iter()
                .map(|r| (r.id, r.target.clone()))
                .collect()
        };

        let mut ticked = 0;
        for (id, target) in targets {
            // An earlier target may have released this one during the frame.
            if !this.borrow().is_registered(id) {
                continue;
            }
            let Some(target) = target.upgrade() else {
                continue;
            };
            match target.try_borrow_mut() {
                Ok(mut target) => {
                    target.tick();
                    ticked += 1;
                }
                Err(_) => log::warn!("{id} is borrowed elsewhere, skipping this frame"),
            };
        }
        ticked
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for FrameScheduler {
    fn allocate_id(&mut self) -> TickId {
        let id = TickId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn register_per_tick(&mut self, id: TickId, target: Weak<RefCell<dyn Tick>>) {
        if let Some(existing) = self.registrations.iter_mut().find(|r| r.id == id) {
            existing.target = target;
        } else {
            log::trace!("registering {id}");
            self.registrations.push(Registration { id, target });
        }
    }

    fn deregister_per_tick(&mut self, id: TickId) {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        if self.registrations.len() != before {
            log::trace!("deregistered {id}");
        }
    }

    fn is_registered(&self, id: TickId) -> bool {
        self.registrations
            .iter()
            .any(|r| r.id == id && r.target.strong_count() > 0)
    }

    fn delta(&self, unscaled: bool) -> f32 {
        if unscaled {
            self.unscaled_delta
        } else {
            self.delta
        }
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("next_id", &self.next_id)
            .field("registered", &self.registered_count())
            .field("time_scale", &self.time_scale)
            .field("delta", &self.delta)
            .field("unscaled_delta", &self.unscaled_delta)
            .field("frame", &self.frame)
            .finish()
    }
}
