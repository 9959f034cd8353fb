//! Component membership of a single actor
//!
//! Component changes are also written through to the component index of the
//! scene the actor belongs to, before any component hook runs.

use std::cell::RefCell;

use super::{Component, ComponentBehavior, Kind, WeakActor};
use crate::foundation::collections::Roster;
use crate::lifecycle::{rejected, Labeled, LifecycleError};

/// Owns an actor's components and their exact-kind index
#[derive(Debug)]
pub struct ComponentManager {
    actor: WeakActor,
    components: RefCell<Roster<Component>>,
}

impl ComponentManager {
    pub(crate) fn new(actor: WeakActor) -> Self {
        Self {
            actor,
            components: RefCell::new(Roster::new()),
        }
    }

    fn owner_label(&self) -> String {
        self.actor
            .upgrade()
            .map_or_else(|| "ComponentManager".to_string(), |actor| actor.label())
    }

    /// Take `component` in, moving it away from its previous actor first
    pub(crate) fn attach(&self, component: &Component) -> Result<(), LifecycleError> {
        let Some(actor) = self.actor.upgrade() else {
            return rejected(LifecycleError::OwnerDropped(component.label()));
        };
        if self.has(component) {
            return rejected(LifecycleError::AlreadyMember {
                owner: actor.label(),
                child: component.label(),
            });
        }

        if let Some(previous) = component.actor() {
            previous.detach_component(component)?;
        }

        self.components.borrow_mut().insert(component.clone());
        let scene = actor.scene();
        if let Some(scene) = &scene {
            scene.actor_manager().index_component(&actor, component.kind());
        }

        if let Err(error) = component.attach(&actor) {
            self.components.borrow_mut().remove(component);
            if let Some(scene) = &scene {
                scene.actor_manager().unindex_component(&actor, component.kind());
            }
            return Err(error);
        }
        Ok(())
    }

    /// Let `component` go after running its detach transition
    pub(crate) fn detach(&self, component: &Component) -> Result<(), LifecycleError> {
        if !self.has(component) {
            return rejected(LifecycleError::UnknownChild {
                owner: self.owner_label(),
                child: component.label(),
            });
        }

        component.detach()?;
        self.components.borrow_mut().remove(component);

        if let Some(actor) = self.actor.upgrade() {
            if let Some(scene) = actor.scene() {
                scene.actor_manager().unindex_component(&actor, component.kind());
            }
        }
        Ok(())
    }

    /// Visit current members; members removed during the walk are skipped
    pub(crate) fn for_each(&self, mut visit: impl FnMut(&Component)) {
        let snapshot = self.components.borrow().all();
        for component in &snapshot {
            if self.has(component) {
                visit(component);
            }
        }
    }

    /// All components in attachment order
    pub fn all(&self) -> Vec<Component> {
        self.components.borrow().all()
    }

    /// Whether `component` is a member
    pub fn has(&self, component: &Component) -> bool {
        self.components.borrow().contains(component)
    }

    /// Whether any member has `kind`
    pub fn has_with_kind(&self, kind: Kind) -> bool {
        self.components.borrow().contains_kind(kind)
    }

    /// Members of `kind` in attachment order
    pub fn get_with_kind(&self, kind: Kind) -> Vec<Component> {
        self.components.borrow().with_kind(kind)
    }

    /// First member of `kind`
    pub fn first_with_kind(&self, kind: Kind) -> Option<Component> {
        self.components.borrow().first_with_kind(kind)
    }

    /// First member whose behavior is `B`
    pub fn get_with_type<B: ComponentBehavior>(&self) -> Option<Component> {
        self.first_with_kind(Kind::of::<B>())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.components.borrow().len()
    }

    /// Whether there are no members
    pub fn is_empty(&self) -> bool {
        self.components.borrow().is_empty()
    }
}
