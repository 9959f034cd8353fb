//! Actor notification channel
//!
//! A minimal typed publish/subscribe channel owned by every actor:
//! - Listeners register per event type and only hear about that type
//! - Registration hands back a [`ListenerId`] used to unsubscribe
//! - Delivery is immediate and synchronous, in registration order
//!
//! Listeners may subscribe or unsubscribe while an event is being delivered.
//! Delivery works on a snapshot of the registered listeners; a listener that
//! is removed mid-delivery is not called afterwards.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ecs::{Actor, Component};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorEvent {
    /// A component joined the actor
    ComponentAttached,
    /// A component left the actor
    ComponentDetached,
}

/// Receiver of actor notifications
pub trait ActorListener {
    /// Handle `event` raised by `actor` about `component`
    fn on_actor_event(&self, event: ActorEvent, actor: &Actor, component: &Component);
}

impl<F> ActorListener for F
where
    F: Fn(ActorEvent, &Actor, &Component),
{
    fn on_actor_event(&self, event: ActorEvent, actor: &Actor, component: &Component) {
        self(event, actor, component);
    }
}

/// Handle returned by [`ActorEvents::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Registration = (ListenerId, Rc<dyn ActorListener>);

/// Per-actor listener registry
#[derive(Default)]
pub struct ActorEvents {
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<ActorEvent, Vec<Registration>>>,
}

impl fmt::Debug for ActorEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorEvents")
            .field("attached", &self.listener_count(ActorEvent::ComponentAttached))
            .field("detached", &self.listener_count(ActorEvent::ComponentDetached))
            .finish()
    }
}

impl ActorEvents {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event`
    pub fn subscribe(&self, event: ActorEvent, listener: Rc<dyn ActorListener>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .entry(event)
            .or_default()
            .push((id, listener));
        id
    }

    /// Remove a registration; returns false if `id` was not registered for `event`
    pub fn unsubscribe(&self, event: ActorEvent, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(registered) = listeners.get_mut(&event) else {
            return false;
        };
        let before = registered.len();
        registered.retain(|(existing, _)| *existing != id);
        let removed = registered.len() != before;
        if registered.is_empty() {
            listeners.remove(&event);
        }
        removed
    }

    /// Number of listeners registered for `event`
    pub fn listener_count(&self, event: ActorEvent) -> usize {
        self.listeners.borrow().get(&event).map_or(0, Vec::len)
    }

    fn is_registered(&self, event: ActorEvent, id: ListenerId) -> bool {
        self.listeners
            .borrow()
            .get(&event)
            .is_some_and(|registered| registered.iter().any(|(existing, _)| *existing == id))
    }

    /// Deliver `event` to every listener registered for it
    pub fn emit(&self, event: ActorEvent, actor: &Actor, component: &Component) {
        let snapshot: Vec<Registration> = self
            .listeners
            .borrow()
            .get(&event)
            .cloned()
            .unwrap_or_default();

        for (id, listener) in snapshot {
            if self.is_registered(event, id) {
                listener.on_actor_event(event, actor, component);
            }
        }
    }
}
