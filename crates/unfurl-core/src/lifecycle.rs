//! Host lifecycle hooks for node-attached behaviors.
//!
//! The host calls [`Lifecycle::on_attach`] once the behavior sits on a live
//! node, and [`Lifecycle::on_config_validate`] whenever configuration fields
//! are edited. Validation may run before attach, so implementations must
//! cope with dependencies that have not been located yet.

use crate::node::Node;

/// Lifecycle phase reported to hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// The behavior was attached to a node.
    Attach,
    /// Configuration was edited and re-validated.
    Validate,
}

/// Hooks invoked by the host at defined points.
pub trait Lifecycle {
    /// Locate collaborators on `node`.
    fn on_attach(&mut self, node: &Node);

    /// Re-synchronize static state after a configuration edit.
    fn on_config_validate(&mut self) {}
}

/// Run a lifecycle phase against a behavior.
pub fn dispatch(behavior: &mut dyn Lifecycle, phase: LifecyclePhase, node: &Node) {
    log::trace!("{phase:?} on '{}'", node.name());
    match phase {
        LifecyclePhase::Attach => behavior.on_attach(node),
        LifecyclePhase::Validate => behavior.on_config_validate(),
    }
}
