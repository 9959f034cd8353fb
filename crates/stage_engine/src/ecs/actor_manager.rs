//! Actor membership of a single scene
//!
//! Besides the primary set and the exact-kind index, the actor manager keeps
//! a component index: for every component kind, the actors currently holding
//! at least one component of that kind. It is filled from an actor's
//! components when the actor joins, and the actor's component manager writes
//! every later component change straight into it before the component's own
//! hooks run.

use std::cell::RefCell;

use super::{Actor, ActorBehavior, Kind, WeakScene};
use crate::foundation::collections::{KindIndex, Roster};
use crate::lifecycle::{rejected, Labeled, LifecycleError};

/// Owns a scene's actors, their exact-kind index and the component index
pub struct ActorManager {
    scene: WeakScene,
    actors: RefCell<Roster<Actor>>,
    by_component: RefCell<KindIndex<Actor>>,
}

impl std::fmt::Debug for ActorManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorManager")
            .field("actors", &self.len())
            .field("component_kinds", &self.by_component.borrow().kind_count())
            .finish()
    }
}

impl ActorManager {
    pub(crate) fn new(scene: WeakScene) -> Self {
        Self {
            scene,
            actors: RefCell::new(Roster::new()),
            by_component: RefCell::new(KindIndex::new()),
        }
    }

    fn owner_label(&self) -> String {
        self.scene
            .upgrade()
            .map_or_else(|| "ActorManager".to_string(), |scene| scene.label())
    }

    /// Take `actor` in, moving it away from its previous scene first
    pub(crate) fn attach(&self, actor: &Actor) -> Result<(), LifecycleError> {
        let Some(scene) = self.scene.upgrade() else {
            return rejected(LifecycleError::OwnerDropped(actor.label()));
        };
        if self.has(actor) {
            return rejected(LifecycleError::AlreadyMember {
                owner: scene.label(),
                child: actor.label(),
            });
        }

        if let Some(previous) = actor.scene() {
            previous.detach_actor(actor)?;
        }

        self.actors.borrow_mut().insert(actor.clone());
        self.index_components(actor);

        if let Err(error) = actor.attach(&scene) {
            self.actors.borrow_mut().remove(actor);
            self.unindex_components(actor);
            return Err(error);
        }
        Ok(())
    }

    /// Let `actor` go after running its detach transition
    pub(crate) fn detach(&self, actor: &Actor) -> Result<(), LifecycleError> {
        if !self.has(actor) {
            return rejected(LifecycleError::UnknownChild {
                owner: self.owner_label(),
                child: actor.label(),
            });
        }

        actor.detach()?;
        self.actors.borrow_mut().remove(actor);
        self.unindex_components(actor);
        Ok(())
    }

    /// Record that member `actor` now holds a component of `kind`
    pub(crate) fn index_component(&self, actor: &Actor, kind: Kind) {
        if self.has(actor) {
            self.by_component.borrow_mut().insert(kind, actor.clone());
        }
    }

    /// Drop `actor` from the `kind` bucket unless it still holds that kind
    pub(crate) fn unindex_component(&self, actor: &Actor, kind: Kind) {
        if !actor.has_component_with_kind(kind) {
            self.by_component.borrow_mut().remove(kind, actor);
        }
    }

    fn index_components(&self, actor: &Actor) {
        let mut index = self.by_component.borrow_mut();
        for component in actor.components() {
            index.insert(component.kind(), actor.clone());
        }
    }

    fn unindex_components(&self, actor: &Actor) {
        let mut index = self.by_component.borrow_mut();
        for component in actor.components() {
            index.remove(component.kind(), actor);
        }
    }

    /// Visit current members; members removed during the walk are skipped
    pub(crate) fn for_each(&self, mut visit: impl FnMut(&Actor)) {
        let snapshot = self.actors.borrow().all();
        for actor in &snapshot {
            if self.has(actor) {
                visit(actor);
            }
        }
    }

    /// All actors in attachment order
    pub fn all(&self) -> Vec<Actor> {
        self.actors.borrow().all()
    }

    /// Whether `actor` is a member
    pub fn has(&self, actor: &Actor) -> bool {
        self.actors.borrow().contains(actor)
    }

    /// Whether any member has `kind`
    pub fn has_with_kind(&self, kind: Kind) -> bool {
        self.actors.borrow().contains_kind(kind)
    }

    /// Members of exactly `kind`
    pub fn get_with_kind(&self, kind: Kind) -> Vec<Actor> {
        self.actors.borrow().with_kind(kind)
    }

    /// Members whose behavior is `B`
    pub fn get_with_type<B: ActorBehavior>(&self) -> Vec<Actor> {
        self.get_with_kind(Kind::of::<B>())
    }

    /// Members holding at least one component of every kind in `kinds`
    ///
    /// Ordered like the actors indexed under the first kind. Empty when
    /// `kinds` is empty or any kind is held by no member.
    pub fn get_with_components(&self, kinds: &[Kind]) -> Vec<Actor> {
        let Some((first, rest)) = kinds.split_first() else {
            return Vec::new();
        };

        let index = self.by_component.borrow();
        let Some(candidates) = index.bucket(*first) else {
            return Vec::new();
        };
        let mut required = Vec::with_capacity(rest.len());
        for kind in rest {
            match index.bucket(*kind) {
                Some(bucket) => required.push(bucket),
                None => return Vec::new(),
            }
        }

        candidates
            .iter()
            .filter(|actor| required.iter().all(|bucket| bucket.contains(actor)))
            .cloned()
            .collect()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.actors.borrow().len()
    }

    /// Whether there are no members
    pub fn is_empty(&self) -> bool {
        self.actors.borrow().is_empty()
    }
}
