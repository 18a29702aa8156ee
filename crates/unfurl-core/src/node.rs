//! Scene nodes and component lookup.
//!
//! A [`Node`] carries named children and a bag of shared components. Lookups
//! never fail loudly: a missing child or component is logged at debug level
//! and reported as `None`, since behaviors are often attached before the
//! scene around them is complete.
//!
//! Activity is hierarchical. A node is active in the hierarchy only while it
//! and every ancestor are active; [`NodeActivity`] lets a behavior query that
//! later without holding the node.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared view of a node's activity and that of its ancestors.
#[derive(Debug, Clone)]
pub struct NodeActivity {
    own: Rc<Cell<bool>>,
    ancestors: Vec<Rc<Cell<bool>>>,
}

impl NodeActivity {
    fn new() -> Self {
        Self {
            own: Rc::new(Cell::new(true)),
            ancestors: Vec::new(),
        }
    }

    /// Whether the node itself is active.
    #[must_use]
    pub fn is_active_self(&self) -> bool {
        self.own.get()
    }

    /// Whether the node and all of its ancestors are active.
    #[must_use]
    pub fn is_active_in_hierarchy(&self) -> bool {
        self.own.get() && self.ancestors.iter().all(|flag| flag.get())
    }
}

/// A node in the scene hierarchy.
pub struct Node {
    name: String,
    activity: NodeActivity,
    components: Vec<Rc<dyn Any>>,
    children: Vec<Node>,
}

impl Node {
    /// Create an active node with no components.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activity: NodeActivity::new(),
            components: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a component, builder style.
    #[must_use]
    pub fn with_component<T: 'static>(mut self, component: T) -> Self {
        self.add_component(component);
        self
    }

    /// Add a child node, builder style.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.add_child(child);
        self
    }

    /// Add a component and return its shared handle.
    pub fn add_component<T: 'static>(&mut self, component: T) -> Rc<RefCell<T>> {
        let handle = Rc::new(RefCell::new(component));
        self.attach_shared(handle.clone());
        handle
    }

    /// Attach an existing shared component.
    pub fn attach_shared<T: 'static>(&mut self, handle: Rc<RefCell<T>>) {
        self.components.push(handle);
    }

    /// Add a child node. The child and its subtree inherit this node's
    /// activity chain.
    pub fn add_child(&mut self, mut child: Self) {
        let mut chain = self.activity.ancestors.clone();
        chain.push(Rc::clone(&self.activity.own));
        child.inherit(&chain);
        self.children.push(child);
    }

    fn inherit(&mut self, chain: &[Rc<Cell<bool>>]) {
        self.activity.ancestors.extend(chain.iter().cloned());
        for child in &mut self.children {
            child.inherit(chain);
        }
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the node itself is active, ignoring its ancestors.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activity.is_active_self()
    }

    /// Whether the node and every ancestor are active.
    #[must_use]
    pub fn is_active_in_hierarchy(&self) -> bool {
        self.activity.is_active_in_hierarchy()
    }

    /// Activate or deactivate the node. Descendants observe the change.
    pub fn set_active(&self, active: bool) {
        self.activity.own.set(active);
    }

    /// Shared activity handle, live across later `set_active` calls.
    #[must_use]
    pub fn activity(&self) -> NodeActivity {
        self.activity.clone()
    }

    /// Direct children.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Depth-first search for a descendant named `name`.
    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.find_child(name)
            }
        })
    }

    /// First component of type `T` on this node.
    #[must_use]
    pub fn component<T: 'static>(&self) -> Option<Rc<RefCell<T>>> {
        let component = self
            .components
            .iter()
            .find_map(|c| Rc::clone(c).downcast::<RefCell<T>>().ok());
        if component.is_none() {
            log::debug!(
                "no component of type {} found on '{}'",
                std::any::type_name::<T>(),
                self.name
            );
        }
        component
    }

    /// Component of type `T` on the descendant named `name`.
    #[must_use]
    pub fn component_in_child<T: 'static>(&self, name: &str) -> Option<Rc<RefCell<T>>> {
        let Some(child) = self.find_child(name) else {
            log::debug!("no node named '{name}' found under '{}'", self.name);
            return None;
        };
        child.component::<T>()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("active", &self.is_active())
            .field("components", &self.components.len())
            .field("children", &self.children)
            .finish()
    }
}
