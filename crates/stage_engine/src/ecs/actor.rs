//! Actors: scene members that own components

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use super::{Component, ComponentBehavior, ComponentManager, EntityId, Kind, Scene};
use crate::events::{ActorEvent, ActorEvents, ActorListener, ListenerId};
use crate::foundation::collections::Member;
use crate::lifecycle::{
    AttachmentHooks, AttachmentLifecycle, EnabledHooks, EnabledLifecycle, Labeled,
    LifecycleError, ParentHandle, UpdateHooks, UpdateLifecycle,
};

/// User behavior of an actor
#[allow(unused_variables)]
pub trait ActorBehavior: Any {
    /// Actor was attached to `scene`
    fn on_attach(&self, actor: &Actor, scene: &Scene) {}
    /// Actor is about to leave `scene`
    fn on_detach(&self, actor: &Actor, scene: &Scene) {}
    /// Actor became enabled
    fn on_enable(&self, actor: &Actor) {}
    /// Actor is about to be disabled
    fn on_disable(&self, actor: &Actor) {}
    /// Per-frame update, after the actor's components have updated
    fn on_update(&self, actor: &Actor, delta_time: f32) {}
    /// Per-frame post-update
    fn on_post_update(&self, actor: &Actor, delta_time: f32) {}
}

struct ActorInner {
    id: EntityId,
    kind: Kind,
    attachment: AttachmentLifecycle<Scene>,
    enabled: EnabledLifecycle,
    update: UpdateLifecycle,
    components: ComponentManager,
    events: ActorEvents,
    behavior: Rc<dyn ActorBehavior>,
    any: Rc<dyn Any>,
}

/// Shared handle to an actor
#[derive(Clone)]
pub struct Actor(Rc<ActorInner>);

impl Actor {
    /// Wrap `behavior` in a new actor outside of any scene
    pub fn new<B: ActorBehavior>(behavior: B) -> Self {
        Self::from_rc(Rc::new(behavior))
    }

    /// Wrap a shared behavior
    pub fn from_rc<B: ActorBehavior>(behavior: Rc<B>) -> Self {
        Self(Rc::new_cyclic(|weak| ActorInner {
            id: EntityId::next(),
            kind: Kind::of::<B>(),
            attachment: AttachmentLifecycle::new(),
            enabled: EnabledLifecycle::new(),
            update: UpdateLifecycle,
            components: ComponentManager::new(WeakActor(weak.clone())),
            events: ActorEvents::new(),
            behavior: Rc::clone(&behavior) as Rc<dyn ActorBehavior>,
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

    /// Scene the actor belongs to
    pub fn scene(&self) -> Option<Scene> {
        self.0.attachment.parent()
    }

    /// Whether the actor belongs to a scene
    pub fn is_attached(&self) -> bool {
        self.0.attachment.is_attached()
    }

    /// Whether the actor is enabled
    pub fn is_enabled(&self) -> bool {
        self.0.enabled.is_enabled()
    }

    /// Typed access to the behavior
    pub fn behavior<B: Any>(&self) -> Option<Rc<B>> {
        Rc::clone(&self.0.any).downcast::<B>().ok()
    }

    /// Add `component`, taking it away from any other actor first
    ///
    /// Emits [`ActorEvent::ComponentAttached`] once the component is attached.
    pub fn attach_component(&self, component: &Component) -> Result<(), LifecycleError> {
        self.0.components.attach(component)?;
        self.0
            .events
            .emit(ActorEvent::ComponentAttached, self, component);
        Ok(())
    }

    /// Remove `component`
    ///
    /// Emits [`ActorEvent::ComponentDetached`] once the component is detached.
    pub fn detach_component(&self, component: &Component) -> Result<(), LifecycleError> {
        self.0.components.detach(component)?;
        self.0
            .events
            .emit(ActorEvent::ComponentDetached, self, component);
        Ok(())
    }

    /// Owned components in attachment order
    pub fn components(&self) -> Vec<Component> {
        self.0.components.all()
    }

    /// Whether `component` belongs to this actor
    pub fn has_component(&self, component: &Component) -> bool {
        self.0.components.has(component)
    }

    /// Whether any owned component has `kind`
    pub fn has_component_with_kind(&self, kind: Kind) -> bool {
        self.0.components.has_with_kind(kind)
    }

    /// Owned components of `kind`
    pub fn components_with_kind(&self, kind: Kind) -> Vec<Component> {
        self.0.components.get_with_kind(kind)
    }

    /// First owned component of `kind`
    pub fn component_with_kind(&self, kind: Kind) -> Option<Component> {
        self.0.components.first_with_kind(kind)
    }

    /// First owned component whose behavior is `B`
    pub fn component_of<B: ComponentBehavior>(&self) -> Option<Component> {
        self.0.components.get_with_type::<B>()
    }

    /// Behavior of the first owned component whose behavior is `B`
    pub fn component_behavior<B: ComponentBehavior>(&self) -> Option<Rc<B>> {
        self.component_of::<B>()
            .and_then(|component| component.behavior::<B>())
    }

    /// Listen for component changes on this actor
    pub fn subscribe(&self, event: ActorEvent, listener: Rc<dyn ActorListener>) -> ListenerId {
        self.0.events.subscribe(event, listener)
    }

    /// Stop listening; returns false if `id` was not registered for `event`
    pub fn unsubscribe(&self, event: ActorEvent, id: ListenerId) -> bool {
        self.0.events.unsubscribe(event, id)
    }

    /// Listener registry of this actor
    pub fn events(&self) -> &ActorEvents {
        &self.0.events
    }

    pub(crate) fn attach(&self, scene: &Scene) -> Result<(), LifecycleError> {
        self.0.attachment.attach(scene, self)
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
    pub fn downgrade(&self) -> WeakActor {
        WeakActor(Rc::downgrade(&self.0))
    }
}

/// Non-owning actor handle
#[derive(Debug, Clone)]
pub struct WeakActor(Weak<ActorInner>);

impl WeakActor {
    /// Recover the actor if it is still alive
    pub fn upgrade(&self) -> Option<Actor> {
        self.0.upgrade().map(Actor)
    }
}

impl ParentHandle for Actor {
    type Weak = WeakActor;

    fn downgrade(&self) -> WeakActor {
        WeakActor(Rc::downgrade(&self.0))
    }

    fn upgrade(weak: &WeakActor) -> Option<Self> {
        weak.upgrade()
    }
}

impl Labeled for Actor {
    fn label(&self) -> String {
        format!("{}{}", self.0.kind, self.0.id)
    }
}

impl AttachmentHooks<Scene> for Actor {
    fn before_attach(&self, scene: &Scene) {
        self.0.components.for_each(|component| {
            if component.scene().as_ref() != Some(scene) {
                let _ = component.attach_to_scene(scene);
            }
        });
    }

    fn on_attach(&self, scene: &Scene) {
        self.0.behavior.on_attach(self, scene);
    }

    fn after_attach(&self, scene: &Scene) {
        if scene.is_enabled() && !self.is_enabled() {
            let _ = self.enable();
        }
    }

    fn before_detach(&self, _scene: &Scene) {
        self.0.components.for_each(|component| {
            if component.is_attached_to_scene() {
                let _ = component.detach_from_scene();
            }
        });
        if self.is_enabled() && !self.0.enabled.is_in_transition() {
            let _ = self.disable();
        }
    }

    fn on_detach(&self, scene: &Scene) {
        self.0.behavior.on_detach(self, scene);
    }
}

impl EnabledHooks for Actor {
    fn on_enable(&self) {
        self.0.behavior.on_enable(self);
    }

    fn after_enable(&self) {
        self.0.components.for_each(|component| {
            if !component.is_enabled() {
                let _ = component.enable();
            }
        });
    }

    fn before_disable(&self) {
        self.0.components.for_each(|component| {
            if component.is_enabled() {
                let _ = component.disable();
            }
        });
    }

    fn on_disable(&self) {
        self.0.behavior.on_disable(self);
    }
}

impl UpdateHooks for Actor {
    fn before_update(&self, delta_time: f32) {
        self.0.components.for_each(|component| {
            if component.is_enabled() {
                let _ = component.update(delta_time);
            }
        });
    }

    fn on_update(&self, delta_time: f32) {
        self.0.behavior.on_update(self, delta_time);
    }

    fn before_post_update(&self, delta_time: f32) {
        self.0.components.for_each(|component| {
            if component.is_enabled() {
                let _ = component.post_update(delta_time);
            }
        });
    }

    fn on_post_update(&self, delta_time: f32) {
        self.0.behavior.on_post_update(self, delta_time);
    }
}

impl Member for Actor {
    fn id(&self) -> EntityId {
        self.0.id
    }

    fn kind(&self) -> Kind {
        self.0.kind
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("label", &self.label())
            .field("attached", &self.is_attached())
            .field("enabled", &self.is_enabled())
            .field("components", &self.0.components.len())
            .finish()
    }
}
