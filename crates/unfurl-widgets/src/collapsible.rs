//! Collapsible behavior: a two-state widget that animates its height.
//!
//! The widget drives the preferred-height override of its [`LayoutElement`].
//! Collapsing targets the configured collapsed height. Expanding targets the
//! natural height, measured by briefly clearing the override and asking the
//! layout engine, then restoring it before anything else observes the handle.
//!
//! With [`Transition::Tween`] the height is interpolated by a [`TweenRunner`]
//! owned by the widget; a new request supersedes the running tween and starts
//! from whatever height the handle currently shows.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use unfurl_core::{
    dispatch, Lifecycle, LifecyclePhase, Node, NodeActivity, SharedScheduler, Tween, TweenRunner,
};
use unfurl_layout::{LayoutElement, LayoutHandle, SharedLayoutEngine};

use crate::config::{sanitize_non_negative, CollapseState, CollapsibleConfig, Transition};
use crate::toggle::{ListenerId, Toggle};

/// Collapsible widget state machine.
pub struct Collapsible {
    config: CollapsibleConfig,
    state: CollapseState,
    enabled: bool,
    activity: Option<NodeActivity>,
    layout: Option<LayoutHandle>,
    layout_engine: Option<SharedLayoutEngine>,
    runner: Rc<RefCell<TweenRunner<f32>>>,
    toggle: Option<Rc<RefCell<Toggle>>>,
    subscription: Option<(Weak<RefCell<Toggle>>, ListenerId)>,
}

impl Collapsible {
    /// Create a widget in its configured initial state.
    ///
    /// Out-of-range configuration values are clamped.
    #[must_use]
    pub fn new(config: CollapsibleConfig, scheduler: SharedScheduler) -> Self {
        let config = config.sanitized();
        Self {
            state: config.initial_state,
            config,
            enabled: true,
            activity: None,
            layout: None,
            layout_engine: None,
            runner: TweenRunner::new(scheduler),
            toggle: None,
            subscription: None,
        }
    }

    /// Use `engine` to measure natural heights.
    #[must_use]
    pub fn with_layout_engine(mut self, engine: SharedLayoutEngine) -> Self {
        self.layout_engine = Some(engine);
        self
    }

    /// Drive `layout` instead of looking it up on attach.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutHandle) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Wrap into a shared handle.
    #[must_use]
    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Attach to `node` and subscribe to its toggle, if any.
    ///
    /// The subscription holds the widget weakly, so dropping the widget
    /// silences it. Attaching again keeps a single subscription: the same
    /// toggle is not subscribed twice, and a previous toggle is released.
    pub fn attach(this: &Rc<RefCell<Self>>, node: &Node) {
        let (toggle, previous) = {
            let mut widget = this.borrow_mut();
            dispatch(&mut *widget, LifecyclePhase::Attach, node);
            (widget.toggle.clone(), widget.subscription.take())
        };

        if let Some((old, id)) = previous {
            if let Some(old) = old.upgrade() {
                if toggle.as_ref().is_some_and(|t| Rc::ptr_eq(t, &old)) {
                    this.borrow_mut().subscription = Some((Rc::downgrade(&old), id));
                    return;
                }
                match old.try_borrow_mut() {
                    Ok(mut old) => {
                        old.remove_listener(id);
                    }
                    Err(_) => log::warn!("previous toggle is busy, leaving its listener"),
                };
            }
        }

        let Some(toggle) = toggle else {
            return;
        };
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        let id = toggle.borrow_mut().add_listener(move |on| {
            let Some(widget) = weak.upgrade() else {
                return;
            };
            match widget.try_borrow_mut() {
                Ok(mut widget) => widget.on_toggle_changed(on),
                Err(_) => log::warn!("collapsible is busy, dropping toggle change to {on}"),
            };
        });
        this.borrow_mut().subscription = Some((Rc::downgrade(&toggle), id));
    }

    /// Toggle notification: `true` expands, `false` collapses.
    ///
    /// Ignored while the widget is disabled or its node is inactive in the
    /// hierarchy at the time of the change.
    pub fn on_toggle_changed(&mut self, on: bool) {
        if !self.enabled || !self.is_active() {
            log::debug!("collapsible ignoring toggle change to {on} while inactive");
            return;
        }
        self.request_state(CollapseState::from_toggle(on));
    }

    /// Transition to `target`.
    ///
    /// The state flag always updates. Without a layout handle and engine the
    /// request has no visual effect.
    pub fn request_state(&mut self, target: CollapseState) {
        log::trace!("collapsible {:?} -> {target:?}", self.state);
        self.state = target;

        let layout = match (&self.layout, &self.layout_engine) {
            (Some(layout), Some(_)) => Rc::clone(layout),
            _ => {
                log::debug!("collapsible has no layout to drive, recording {target:?} only");
                return;
            }
        };

        match self.config.transition {
            Transition::Instant => self.apply_static(),
            Transition::Tween => self.start_tween(&layout, target),
        }
    }

    fn start_tween(&mut self, layout: &LayoutHandle, target: CollapseState) {
        let end = match target {
            CollapseState::Expanded => self.natural_height(),
            CollapseState::Collapsed => Some(self.collapsed_target()),
        };
        let Some(end) = end else {
            log::debug!("natural height unavailable, skipping transition");
            return;
        };
        let start = match layout.try_borrow() {
            Ok(element) => current_height(&element),
            Err(_) => {
                log::warn!("layout handle is borrowed, skipping transition");
                return;
            }
        };

        let handle = Rc::downgrade(layout);
        let tween = Tween::new(start, end, self.config.transition_duration)
            .ignore_time_scale(true)
            .on_changed(move |height| write_height(&handle, height))
            .on_complete(move || log::trace!("collapsible settled at {end}"));

        match self.runner.try_borrow_mut() {
            Ok(mut runner) => runner.start(tween),
            Err(_) => log::warn!("tween runner is busy, skipping transition"),
        };
    }

    /// Write the height for the recorded state without animating.
    ///
    /// Expanded clears the override so the layout engine uses the natural
    /// height; Collapsed writes the collapsed target. Any running tween is
    /// stopped first.
    pub fn apply_static(&mut self) {
        if let Ok(mut runner) = self.runner.try_borrow_mut() {
            runner.stop();
        }
        let Some(layout) = self.layout.clone() else {
            log::debug!("collapsible has no layout handle, nothing to sync");
            return;
        };
        let height = match self.state {
            CollapseState::Expanded => None,
            CollapseState::Collapsed => Some(self.collapsed_target()),
        };
        match layout.try_borrow_mut() {
            Ok(mut element) => {
                element.replace_preferred_height(height);
            }
            Err(_) => log::warn!("layout handle is borrowed, static sync skipped"),
        };
    }

    /// Natural height of the driven element, ignoring its current override.
    ///
    /// The override is cleared and restored under one borrow, so no other
    /// reader can observe the cleared state.
    #[must_use]
    pub fn natural_height(&self) -> Option<f32> {
        let layout = self.layout.as_ref()?;
        let engine = self.layout_engine.as_ref()?;
        let Ok(mut element) = layout.try_borrow_mut() else {
            log::warn!("layout handle is borrowed, cannot measure natural height");
            return None;
        };
        let prior = element.clear_preferred_height();
        let natural = engine.preferred_height(&element);
        element.replace_preferred_height(prior);
        Some(natural)
    }

    /// Height used for the collapsed state.
    ///
    /// Never negative, and never taller than the natural height when that
    /// can be measured, so collapsing does not grow the widget.
    #[must_use]
    pub fn collapsed_target(&self) -> f32 {
        let min = self.config.min_height.max(0.0);
        match self.natural_height() {
            Some(natural) if natural < min => {
                log::warn!("min height {min} exceeds natural height {natural}, using {natural}");
                natural
            }
            _ => min,
        }
    }

    /// Recorded state.
    #[must_use]
    pub const fn state(&self) -> CollapseState {
        self.state
    }

    /// Whether the recorded state is Expanded.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    /// Whether a height tween is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.runner.try_borrow().map_or(true, |runner| !runner.is_idle())
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &CollapsibleConfig {
        &self.config
    }

    /// Transition mode.
    #[must_use]
    pub const fn transition(&self) -> Transition {
        self.config.transition
    }

    /// Change the transition mode. The recorded state is kept.
    pub fn set_transition(&mut self, transition: Transition) {
        self.config.transition = transition;
    }

    /// Tween duration in seconds.
    #[must_use]
    pub const fn transition_duration(&self) -> f32 {
        self.config.transition_duration
    }

    /// Change the tween duration. Invalid values are clamped to zero.
    pub fn set_transition_duration(&mut self, seconds: f32) {
        self.config.transition_duration = sanitize_non_negative(seconds, "transition_duration");
    }

    /// Configured collapsed height.
    #[must_use]
    pub const fn min_height(&self) -> f32 {
        self.config.min_height
    }

    /// Change the collapsed height. Invalid values are clamped to zero.
    pub fn set_min_height(&mut self, height: f32) {
        self.config.min_height = sanitize_non_negative(height, "min_height");
    }

    /// Whether toggle changes are honored.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable toggle handling.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the attached node and its ancestors are active. A widget
    /// that was never attached counts as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activity
            .as_ref()
            .map_or(true, NodeActivity::is_active_in_hierarchy)
    }

    /// Driven layout handle, once located.
    #[must_use]
    pub const fn layout(&self) -> Option<&LayoutHandle> {
        self.layout.as_ref()
    }

    /// Toggle found on attach.
    #[must_use]
    pub const fn toggle(&self) -> Option<&Rc<RefCell<Toggle>>> {
        self.toggle.as_ref()
    }
}

impl Lifecycle for Collapsible {
    fn on_attach(&mut self, node: &Node) {
        self.activity = Some(node.activity());
        if let Some(layout) = node.component::<LayoutElement>() {
            self.layout = Some(layout);
        } else if self.layout.is_none() {
            log::debug!("no layout element on '{}', collapsible has no effect", node.name());
        }
        self.toggle = node.component::<Toggle>();
        if self.toggle.is_none() {
            log::debug!("no toggle on '{}', collapsible follows direct requests only", node.name());
        }
        self.apply_static();
    }

    fn on_config_validate(&mut self) {
        self.config = self.config.sanitized();
        self.apply_static();
    }
}

impl fmt::Debug for Collapsible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collapsible")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("enabled", &self.enabled)
            .field("active", &self.is_active())
            .field("has_layout", &self.layout.is_some())
            .field("has_layout_engine", &self.layout_engine.is_some())
            .field("animating", &self.is_animating())
            .finish_non_exhaustive()
    }
}

/// Explicit override, or the last measured height when unconstrained.
fn current_height(element: &LayoutElement) -> f32 {
    element
        .preferred_height_override()
        .unwrap_or_else(|| element.measured_height())
}

fn write_height(handle: &Weak<RefCell<LayoutElement>>, height: f32) {
    let Some(layout) = handle.upgrade() else {
        return;
    };
    match layout.try_borrow_mut() {
        Ok(mut element) => element.set_preferred_height(height),
        Err(_) => log::warn!("layout handle is borrowed, dropping height {height}"),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use unfurl_core::FrameScheduler;
    use unfurl_layout::{ColumnLayout, LayoutEngine};

    const NATURAL: f32 = 100.0;

    struct Fixture {
        scheduler: Rc<RefCell<FrameScheduler>>,
        widget: Collapsible,
        layout: LayoutHandle,
    }

    fn fixture(config: CollapsibleConfig) -> Fixture {
        let scheduler = FrameScheduler::shared();
        let shared: SharedScheduler = scheduler.clone();
        let layout = LayoutElement::new().content_height(NATURAL).into_handle();
        ColumnLayout::new().layout(&mut layout.borrow_mut());
        let widget = Collapsible::new(config, shared)
            .with_layout_engine(Rc::new(ColumnLayout::new()))
            .with_layout(layout.clone());
        Fixture {
            scheduler,
            widget,
            layout,
        }
    }

    fn tween_config(duration: f32) -> CollapsibleConfig {
        CollapsibleConfig::new().transition_duration(duration)
    }

    fn override_of(layout: &LayoutHandle) -> Option<f32> {
        layout.borrow().preferred_height_override()
    }

    fn settle(f: &Fixture, dt: f32) -> usize {
        let mut frames = 0;
        while f.widget.is_animating() && frames < 1_000 {
            FrameScheduler::run_frame(&f.scheduler, dt);
            frames += 1;
        }
        frames
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_new_uses_initial_state() {
        let f = fixture(CollapsibleConfig::new().initial_state(CollapseState::Collapsed));
        assert_eq!(f.widget.state(), CollapseState::Collapsed);
        assert!(!f.widget.is_expanded());
        assert!(!f.widget.is_animating());
    }

    #[test]
    fn test_new_sanitizes_config() {
        let f = fixture(CollapsibleConfig::new().min_height(-3.0).transition_duration(-1.0));
        assert_eq!(f.widget.min_height(), 0.0);
        assert_eq!(f.widget.transition_duration(), 0.0);
    }

    // =========================================================================
    // Tween transitions
    // =========================================================================

    #[test]
    fn test_collapse_tweens_from_measured_height() {
        let mut f = fixture(tween_config(0.5));
        f.widget.request_state(CollapseState::Collapsed);
        assert!(f.widget.is_animating());
        assert_eq!(override_of(&f.layout), None);

        FrameScheduler::run_frame(&f.scheduler, 0.25);
        let mid = override_of(&f.layout).unwrap();
        assert!((mid - 59.0).abs() < 1e-3);

        FrameScheduler::run_frame(&f.scheduler, 0.25);
        assert_eq!(override_of(&f.layout), Some(18.0));
        assert!(!f.widget.is_animating());
    }

    #[test]
    fn test_expand_tweens_to_natural_height() {
        let mut f = fixture(tween_config(0.5).initial_state(CollapseState::Collapsed));
        f.widget.apply_static();
        assert_eq!(override_of(&f.layout), Some(18.0));

        f.widget.request_state(CollapseState::Expanded);
        settle(&f, 0.125);
        assert_eq!(override_of(&f.layout), Some(NATURAL));
    }

    #[test]
    fn test_tween_ignores_time_scale() {
        let mut f = fixture(tween_config(0.5));
        f.scheduler.borrow_mut().set_time_scale(0.0);
        f.widget.request_state(CollapseState::Collapsed);
        FrameScheduler::run_frame(&f.scheduler, 0.5);
        assert_eq!(override_of(&f.layout), Some(18.0));
    }

    #[test]
    fn test_zero_duration_tween_lands_in_one_frame() {
        let mut f = fixture(tween_config(0.0));
        f.widget.request_state(CollapseState::Collapsed);
        assert_eq!(settle(&f, 0.016), 1);
        assert_eq!(override_of(&f.layout), Some(18.0));
    }

    #[test]
    fn test_reentrant_request_continues_from_current_value() {
        let mut f = fixture(tween_config(1.0).initial_state(CollapseState::Collapsed));
        f.widget.apply_static();
        f.widget.request_state(CollapseState::Expanded);
        FrameScheduler::run_frame(&f.scheduler, 0.25);
        let last = override_of(&f.layout).unwrap();
        assert!((last - 38.5).abs() < 1e-3);

        f.widget.request_state(CollapseState::Collapsed);
        FrameScheduler::run_frame(&f.scheduler, 0.5);
        let next = override_of(&f.layout).unwrap();
        // Halfway from 38.5 back to 18, not from 18 or 100.
        assert!((next - 28.25).abs() < 1e-3);

        settle(&f, 0.25);
        assert_eq!(override_of(&f.layout), Some(18.0));
    }

    #[test]
    fn test_same_state_request_settles_unchanged() {
        let mut f = fixture(tween_config(0.25));
        f.widget.request_state(CollapseState::Expanded);
        settle(&f, 0.125);
        let engine = ColumnLayout::new();
        assert!((engine.preferred_height(&f.layout.borrow()) - NATURAL).abs() < 1e-4);
    }

    #[test]
    fn test_natural_query_restores_override() {
        let mut f = fixture(tween_config(1.0));
        f.layout.borrow_mut().set_preferred_height(40.0);

        assert_eq!(f.widget.natural_height(), Some(NATURAL));
        assert_eq!(override_of(&f.layout), Some(40.0));

        f.widget.request_state(CollapseState::Expanded);
        assert_eq!(override_of(&f.layout), Some(40.0));
        FrameScheduler::run_frame(&f.scheduler, 0.5);
        assert!((override_of(&f.layout).unwrap() - 70.0).abs() < 1e-3);
    }

    // =========================================================================
    // Instant transitions
    // =========================================================================

    #[test]
    fn test_instant_collapse_writes_immediately() {
        let mut f = fixture(CollapsibleConfig::new().transition(Transition::Instant));
        f.widget.request_state(CollapseState::Collapsed);
        assert_eq!(override_of(&f.layout), Some(18.0));
        assert!(!f.widget.is_animating());
        assert!(!f.scheduler.borrow().has_registrations());
    }

    #[test]
    fn test_instant_expand_clears_override() {
        let mut f = fixture(CollapsibleConfig::new().transition(Transition::Instant));
        f.widget.request_state(CollapseState::Collapsed);
        f.widget.request_state(CollapseState::Expanded);
        assert_eq!(override_of(&f.layout), None);
    }

    #[test]
    fn test_instant_request_stops_running_tween() {
        let mut f = fixture(tween_config(1.0));
        f.widget.request_state(CollapseState::Collapsed);
        FrameScheduler::run_frame(&f.scheduler, 0.25);

        f.widget.set_transition(Transition::Instant);
        f.widget.request_state(CollapseState::Expanded);
        FrameScheduler::run_frame(&f.scheduler, 0.25);

        assert_eq!(override_of(&f.layout), None);
        assert!(!f.widget.is_animating());
    }

    // =========================================================================
    // Collapsed height policy
    // =========================================================================

    #[test]
    fn test_collapsed_target_capped_at_natural() {
        let mut f = fixture(
            CollapsibleConfig::new()
                .min_height(250.0)
                .transition(Transition::Instant),
        );
        f.widget.request_state(CollapseState::Collapsed);
        assert_eq!(override_of(&f.layout), Some(NATURAL));
    }

    #[test]
    fn test_collapsed_target_without_engine_uses_min_height() {
        let scheduler: SharedScheduler = FrameScheduler::shared();
        let widget = Collapsible::new(CollapsibleConfig::new().min_height(250.0), scheduler);
        assert_eq!(widget.collapsed_target(), 250.0);
    }

    #[test]
    fn test_runtime_setters_keep_state() {
        let mut f = fixture(CollapsibleConfig::new().initial_state(CollapseState::Collapsed));
        f.widget.set_min_height(-5.0);
        f.widget.set_transition_duration(2.0);
        f.widget.set_transition(Transition::Instant);
        assert_eq!(f.widget.state(), CollapseState::Collapsed);
        assert_eq!(f.widget.min_height(), 0.0);
        assert_eq!(f.widget.transition_duration(), 2.0);
        assert_eq!(f.widget.transition(), Transition::Instant);
    }

    // =========================================================================
    // Degraded operation
    // =========================================================================

    #[test]
    fn test_missing_layout_records_state_only() {
        let scheduler = FrameScheduler::shared();
        let shared: SharedScheduler = scheduler.clone();
        let mut widget = Collapsible::new(CollapsibleConfig::new(), shared)
            .with_layout_engine(Rc::new(ColumnLayout::new()));
        widget.request_state(CollapseState::Collapsed);
        assert_eq!(widget.state(), CollapseState::Collapsed);
        assert!(!widget.is_animating());
        assert!(!scheduler.borrow().has_registrations());
    }

    #[test]
    fn test_missing_engine_records_state_only() {
        let scheduler: SharedScheduler = FrameScheduler::shared();
        let layout = LayoutElement::new().content_height(NATURAL).into_handle();
        let mut widget = Collapsible::new(CollapsibleConfig::new(), scheduler).with_layout(layout.clone());
        widget.request_state(CollapseState::Collapsed);
        assert_eq!(widget.state(), CollapseState::Collapsed);
        assert_eq!(layout.borrow().preferred_height_override(), None);
        assert_eq!(widget.natural_height(), None);
    }

    // =========================================================================
    // Toggle gating and lifecycle
    // =========================================================================

    fn attached_panel(config: CollapsibleConfig) -> (Node, Rc<RefCell<Collapsible>>, Rc<RefCell<Toggle>>) {
        let scheduler: SharedScheduler = FrameScheduler::shared();
        let mut node = Node::new("panel");
        node.add_component(LayoutElement::new().content_height(NATURAL));
        let toggle = node.add_component(Toggle::with_state(true));
        let widget = Collapsible::new(config, scheduler)
            .with_layout_engine(Rc::new(ColumnLayout::new()))
            .into_shared();
        Collapsible::attach(&widget, &node);
        (node, widget, toggle)
    }

    #[test]
    fn test_toggle_ignored_while_disabled_or_inactive() {
        let (node, widget, _toggle) =
            attached_panel(CollapsibleConfig::new().transition(Transition::Instant));
        widget.borrow_mut().set_enabled(false);
        widget.borrow_mut().on_toggle_changed(false);
        assert!(widget.borrow().is_expanded());

        widget.borrow_mut().set_enabled(true);
        node.set_active(false);
        widget.borrow_mut().on_toggle_changed(false);
        assert!(widget.borrow().is_expanded());

        node.set_active(true);
        widget.borrow_mut().on_toggle_changed(false);
        assert_eq!(widget.borrow().state(), CollapseState::Collapsed);
    }

    #[test]
    fn test_unattached_widget_counts_as_active() {
        let f = fixture(CollapsibleConfig::new());
        assert!(f.widget.is_active());
    }

    #[test]
    fn test_node_deactivated_after_attach_gates_toggle() {
        let (node, widget, toggle) =
            attached_panel(CollapsibleConfig::new().transition(Transition::Instant));
        node.set_active(false);

        toggle.borrow_mut().set_on(false);
        assert!(widget.borrow().is_expanded());

        node.set_active(true);
        toggle.borrow_mut().set_on(true);
        toggle.borrow_mut().set_on(false);
        assert_eq!(widget.borrow().state(), CollapseState::Collapsed);
    }

    #[test]
    fn test_inactive_parent_gates_toggle() {
        let scheduler: SharedScheduler = FrameScheduler::shared();
        let mut panel = Node::new("panel");
        panel.add_component(LayoutElement::new().content_height(NATURAL));
        let toggle = panel.add_component(Toggle::with_state(true));
        let root = Node::new("root").with_child(panel);
        let panel = root.find_child("panel").expect("panel node");
        let widget = Collapsible::new(CollapsibleConfig::new(), scheduler)
            .with_layout_engine(Rc::new(ColumnLayout::new()))
            .into_shared();
        Collapsible::attach(&widget, panel);

        root.set_active(false);
        toggle.borrow_mut().set_on(false);
        assert!(widget.borrow().is_expanded());
        assert!(!widget.borrow().is_active());
    }

    #[test]
    fn test_reattach_keeps_single_subscription() {
        let (node, widget, toggle) =
            attached_panel(CollapsibleConfig::new().transition(Transition::Instant));
        Collapsible::attach(&widget, &node);
        assert_eq!(toggle.borrow().listener_count(), 1);

        let changes = Rc::new(RefCell::new(0));
        let sink = changes.clone();
        toggle.borrow_mut().add_listener(move |_| *sink.borrow_mut() += 1);
        toggle.borrow_mut().set_on(false);
        assert_eq!(widget.borrow().state(), CollapseState::Collapsed);
        assert_eq!(*changes.borrow(), 1);
    }

    #[test]
    fn test_reattach_to_other_node_moves_subscription() {
        let (_first, widget, first_toggle) =
            attached_panel(CollapsibleConfig::new().transition(Transition::Instant));
        let mut second = Node::new("other");
        second.add_component(LayoutElement::new().content_height(NATURAL));
        let second_toggle = second.add_component(Toggle::with_state(true));

        Collapsible::attach(&widget, &second);
        assert_eq!(first_toggle.borrow().listener_count(), 0);
        assert_eq!(second_toggle.borrow().listener_count(), 1);

        first_toggle.borrow_mut().set_on(false);
        assert!(widget.borrow().is_expanded());
        second_toggle.borrow_mut().set_on(false);
        assert_eq!(widget.borrow().state(), CollapseState::Collapsed);
    }

    #[test]
    fn test_config_validate_syncs_without_animating() {
        let mut f = fixture(tween_config(1.0).initial_state(CollapseState::Collapsed));
        f.widget.on_config_validate();
        assert_eq!(override_of(&f.layout), Some(18.0));
        assert!(!f.widget.is_animating());
    }

    #[test]
    fn test_config_validate_before_attach_is_harmless() {
        let scheduler: SharedScheduler = FrameScheduler::shared();
        let mut widget = Collapsible::new(CollapsibleConfig::new(), scheduler);
        widget.on_config_validate();
        assert!(widget.layout().is_none());
    }

    #[test]
    fn test_attach_finds_components_and_subscribes() {
        let scheduler: SharedScheduler = FrameScheduler::shared();
        let mut node = Node::new("panel");
        let layout = node.add_component(LayoutElement::new().content_height(NATURAL));
        let toggle = node.add_component(Toggle::with_state(true));
        let widget = Collapsible::new(CollapsibleConfig::new().transition(Transition::Instant), scheduler)
            .with_layout_engine(Rc::new(ColumnLayout::new()))
            .into_shared();

        Collapsible::attach(&widget, &node);
        assert!(widget.borrow().layout().is_some());
        assert!(widget.borrow().toggle().is_some());
        assert_eq!(toggle.borrow().listener_count(), 1);

        toggle.borrow_mut().set_on(false);
        assert_eq!(widget.borrow().state(), CollapseState::Collapsed);
        assert_eq!(layout.borrow().preferred_height_override(), Some(18.0));
    }

    #[test]
    fn test_attach_to_inactive_node_gates_toggle() {
        let scheduler: SharedScheduler = FrameScheduler::shared();
        let mut node = Node::new("panel");
        node.add_component(LayoutElement::new());
        let toggle = node.add_component(Toggle::with_state(true));
        node.set_active(false);
        let widget = Collapsible::new(CollapsibleConfig::new(), scheduler)
            .with_layout_engine(Rc::new(ColumnLayout::new()))
            .into_shared();

        Collapsible::attach(&widget, &node);
        toggle.borrow_mut().set_on(false);
        assert!(widget.borrow().is_expanded());
    }

    #[test]
    fn test_dropped_widget_silences_toggle() {
        let scheduler: SharedScheduler = FrameScheduler::shared();
        let mut node = Node::new("panel");
        let toggle = node.add_component(Toggle::with_state(true));
        let widget = Collapsible::new(CollapsibleConfig::new(), scheduler).into_shared();
        Collapsible::attach(&widget, &node);
        drop(widget);
        assert!(toggle.borrow_mut().set_on(false).is_some());
    }

    #[test]
    fn test_debug_output() {
        let f = fixture(CollapsibleConfig::new());
        let debug = format!("{:?}", f.widget);
        assert!(debug.contains("Collapsible"));
        assert!(debug.contains("animating: false"));
    }
}
