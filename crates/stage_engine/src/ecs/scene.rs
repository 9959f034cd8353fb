//! Scenes: groups of actors and systems that are activated together
//!
//! A scene is enabled exactly while it is the active scene of its world.
//! Enabling cascades down to its actors (and their components) and then to
//! its systems; disabling reverses the same set before the scene itself
//! reports `on_disable`.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use super::{
    Actor, ActorManager, EntityId, Kind, System, SystemBehavior, SystemManager, WeakSystemHost,
    World,
};
use crate::foundation::collections::Member;
use crate::lifecycle::{
    AttachmentHooks, AttachmentLifecycle, EnabledHooks, EnabledLifecycle, Labeled,
    LifecycleError, ParentHandle, UpdateHooks, UpdateLifecycle,
};

/// User behavior of a scene
#[allow(unused_variables)]
pub trait SceneBehavior: Any {
    /// Scene was attached to `world`
    fn on_attach(&self, scene: &Scene, world: &World) {}
    /// Scene is about to leave `world`
    fn on_detach(&self, scene: &Scene, world: &World) {}
    /// Scene became the active scene
    fn on_enable(&self, scene: &Scene) {}
    /// Scene is about to stop being active
    fn on_disable(&self, scene: &Scene) {}
    /// Per-frame update, after actors and systems have updated
    fn on_update(&self, scene: &Scene, delta_time: f32) {}
    /// Per-frame post-update
    fn on_post_update(&self, scene: &Scene, delta_time: f32) {}
}

struct SceneInner {
    id: EntityId,
    kind: Kind,
    attachment: AttachmentLifecycle<World>,
    enabled: EnabledLifecycle,
    update: UpdateLifecycle,
    actors: ActorManager,
    systems: SystemManager,
    behavior: Rc<dyn SceneBehavior>,
    any: Rc<dyn Any>,
}

/// Shared handle to a scene
#[derive(Clone)]
pub struct Scene(Rc<SceneInner>);

impl Scene {
    /// Wrap `behavior` in a new scene outside of any world
    pub fn new<B: SceneBehavior>(behavior: B) -> Self {
        Self::from_rc(Rc::new(behavior))
    }

    /// Wrap a shared behavior
    pub fn from_rc<B: SceneBehavior>(behavior: Rc<B>) -> Self {
        Self(Rc::new_cyclic(|weak: &Weak<SceneInner>| SceneInner {
            id: EntityId::next(),
            kind: Kind::of::<B>(),
            attachment: AttachmentLifecycle::new(),
            enabled: EnabledLifecycle::new(),
            update: UpdateLifecycle,
            actors: ActorManager::new(WeakScene(weak.clone())),
            systems: SystemManager::new(WeakSystemHost::Scene(WeakScene(weak.clone()))),
            behavior: Rc::clone(&behavior) as Rc<dyn SceneBehavior>,
            any: behavior,
        }))
    }

    /// Identity
    pub fn id(&self) -> EntityId {
        self.0.id
    }

    /// Behavior type
    pub fn kind(&self) -> Kind {
        self.0.kind
    }

    /// World the scene belongs to
    pub fn world(&self) -> Option<World> {
        self.0.attachment.parent()
    }

    /// Whether the scene belongs to a world
    pub fn is_attached(&self) -> bool {
        self.0.attachment.is_attached()
    }

    /// Whether the scene is active
    pub fn is_enabled(&self) -> bool {
        self.0.enabled.is_enabled()
    }

    /// Typed access to the behavior
    pub fn behavior<B: Any>(&self) -> Option<Rc<B>> {
        Rc::clone(&self.0.any).downcast::<B>().ok()
    }

    /// Add `actor`, taking it away from any other scene first
    pub fn attach_actor(&self, actor: &Actor) -> Result<(), LifecycleError> {
        self.0.actors.attach(actor)
    }

    /// Remove `actor`
    pub fn detach_actor(&self, actor: &Actor) -> Result<(), LifecycleError> {
        self.0.actors.detach(actor)
    }

    /// Actors in attachment order
    pub fn actors(&self) -> Vec<Actor> {
        self.0.actors.all()
    }

    /// Whether `actor` belongs to this scene
    pub fn has_actor(&self, actor: &Actor) -> bool {
        self.0.actors.has(actor)
    }

    /// Actors of exactly `kind`
    pub fn actors_with_kind(&self, kind: Kind) -> Vec<Actor> {
        self.0.actors.get_with_kind(kind)
    }

    /// Actors holding components of every kind in `kinds`
    pub fn actors_with_components(&self, kinds: &[Kind]) -> Vec<Actor> {
        self.0.actors.get_with_components(kinds)
    }

    /// Actor manager of this scene
    pub fn actor_manager(&self) -> &ActorManager {
        &self.0.actors
    }

    /// Add a scene-scoped `system`, taking it away from its previous host
    pub fn attach_system(&self, system: &System) -> Result<(), LifecycleError> {
        self.0.systems.attach(system)
    }

    /// Remove `system`
    pub fn detach_system(&self, system: &System) -> Result<(), LifecycleError> {
        self.0.systems.detach(system)
    }

    /// Scene-scoped systems in attachment order
    pub fn systems(&self) -> Vec<System> {
        self.0.systems.all()
    }

    /// Scene-scoped systems of exactly `kind`
    pub fn systems_with_kind(&self, kind: Kind) -> Vec<System> {
        self.0.systems.get_with_kind(kind)
    }

    /// First scene-scoped system whose behavior is `B`
    pub fn system_of<B: SystemBehavior>(&self) -> Option<System> {
        self.0.systems.get_with_type::<B>()
    }

    /// System manager of this scene
    pub fn system_manager(&self) -> &SystemManager {
        &self.0.systems
    }

    pub(crate) fn attach(&self, world: &World) -> Result<(), LifecycleError> {
        self.0.attachment.attach(world, self)
    }

    pub(crate) fn detach(&self) -> Result<(), LifecycleError> {
        self.0.attachment.detach(self)
    }

    pub(crate) fn enable(&self) -> Result<(), LifecycleError> {
        self.0.enabled.enable(self)
    }

    pub(crate) fn disable(&self) -> Result<(), LifecycleError> {
        self.0.enabled.disable(self)
    }

    pub(crate) fn update(&self, delta_time: f32) -> Result<(), LifecycleError> {
        self.0.update.update(&self.0.enabled, delta_time, self)
    }

    pub(crate) fn post_update(&self, delta_time: f32) -> Result<(), LifecycleError> {
        self.0.update.post_update(&self.0.enabled, delta_time, self)
    }

    /// Non-owning handle
    pub fn downgrade(&self) -> WeakScene {
        WeakScene(Rc::downgrade(&self.0))
    }
}

/// Non-owning scene handle
#[derive(Debug, Clone)]
pub struct WeakScene(Weak<SceneInner>);

impl WeakScene {
    /// Recover the scene if it is still alive
    pub fn upgrade(&self) -> Option<Scene> {
        self.0.upgrade().map(Scene)
    }
}

impl ParentHandle for Scene {
    type Weak = WeakScene;

    fn downgrade(&self) -> WeakScene {
        WeakScene(Rc::downgrade(&self.0))
    }

    fn upgrade(weak: &WeakScene) -> Option<Self> {
        weak.upgrade()
    }
}

impl Labeled for Scene {
    fn label(&self) -> String {
        format!("{}{}", self.0.kind, self.0.id)
    }
}

impl AttachmentHooks<World> for Scene {
    fn on_attach(&self, world: &World) {
        self.0.behavior.on_attach(self, world);
    }

    fn before_detach(&self, _world: &World) {
        if self.is_enabled() && !self.0.enabled.is_in_transition() {
            let _ = self.disable();
        }
    }

    fn on_detach(&self, world: &World) {
        self.0.behavior.on_detach(self, world);
    }
}

impl EnabledHooks for Scene {
    fn on_enable(&self) {
        self.0.behavior.on_enable(self);
    }

    fn after_enable(&self) {
        self.0.actors.for_each(|actor| {
            if !actor.is_enabled() {
                let _ = actor.enable();
            }
        });
        self.0.systems.for_each(|system| {
            if !system.is_enabled() {
                let _ = system.enable();
            }
        });
    }

    fn before_disable(&self) {
        self.0.actors.for_each(|actor| {
            if actor.is_enabled() {
                let _ = actor.disable();
            }
        });
        self.0.systems.for_each(|system| {
            if system.is_enabled() {
                let _ = system.disable();
            }
        });
    }

    fn on_disable(&self) {
        self.0.behavior.on_disable(self);
    }
}

impl UpdateHooks for Scene {
    fn before_update(&self, delta_time: f32) {
        self.0.actors.for_each(|actor| {
            if actor.is_enabled() {
                let _ = actor.update(delta_time);
            }
        });
        self.0.systems.for_each(|system| {
            if system.is_enabled() {
                let _ = system.update(delta_time);
            }
        });
    }

    fn on_update(&self, delta_time: f32) {
        self.0.behavior.on_update(self, delta_time);
    }

    fn before_post_update(&self, delta_time: f32) {
        self.0.actors.for_each(|actor| {
            if actor.is_enabled() {
                let _ = actor.post_update(delta_time);
            }
        });
        self.0.systems.for_each(|system| {
            if system.is_enabled() {
                let _ = system.post_update(delta_time);
            }
        });
    }

    fn on_post_update(&self, delta_time: f32) {
        self.0.behavior.on_post_update(self, delta_time);
    }
}

impl Member for Scene {
    fn id(&self) -> EntityId {
        self.0.id
    }

    fn kind(&self) -> Kind {
        self.0.kind
    }
}

impl PartialEq for Scene {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Scene {}

impl Hash for Scene {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("label", &self.label())
            .field("attached", &self.is_attached())
            .field("enabled", &self.is_enabled())
            .field("actors", &self.0.actors.len())
            .field("systems", &self.0.systems.len())
            .finish()
    }
}
