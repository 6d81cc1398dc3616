//! Item visibility
//!
//! The engine never assumes it is the only thing hiding items. It asks a
//! [`VisibilityProvider`] whether an item is shown, and it is told about
//! changes through a [`VisibilityBus`] that external filtering code (or the
//! mutation-observer adapter standing in for it) publishes on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::HostDocument;

/// Answers "is this item currently visible?"
pub trait VisibilityProvider<D: HostDocument> {
    fn is_visible(&self, doc: &D, node: &D::Node) -> bool;
}

/// Visibility as the page renders it
///
/// An item counts as visible only when its inline display is not `none`,
/// its computed display is not `none`, it does not carry the external
/// hidden marker, and its bounding box has a non-zero area. External list
/// libraries use any mix of these to hide entries.
#[derive(Debug, Clone)]
pub struct RenderedVisibility {
    hidden_marker: String,
}

impl RenderedVisibility {
    pub fn new(hidden_marker_selector: impl Into<String>) -> Self {
        Self {
            hidden_marker: hidden_marker_selector.into(),
        }
    }
}

impl<D: HostDocument> VisibilityProvider<D> for RenderedVisibility {
    fn is_visible(&self, doc: &D, node: &D::Node) -> bool {
        doc.inline_style(node, "display") != "none"
            && doc.computed_style(node, "display") != "none"
            && !doc.matches(node, &self.hidden_marker)
            && doc.bounding_area(node) > 0.0
    }
}

/// Visibility when the engine owns all filtering: only its own inline
/// `display` toggles count
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineVisibility;

impl<D: HostDocument> VisibilityProvider<D> for InlineVisibility {
    fn is_visible(&self, doc: &D, node: &D::Node) -> bool {
        doc.inline_style(node, "display") != "none"
    }
}

/// Handle returned by [`VisibilityBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Single-threaded publish/subscribe channel for "visibility changed"
#[derive(Default)]
pub struct VisibilityBus {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Rc<dyn Fn()>)>>,
}

impl VisibilityBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    /// Notify every subscriber; returns how many were called
    pub fn publish(&self) -> usize {
        // Snapshot first so callbacks may (un)subscribe while running
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl std::fmt::Debug for VisibilityBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
