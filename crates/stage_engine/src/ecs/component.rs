//! Components: behavior units owned by an actor
//!
//! A component is attached to exactly one [`Actor`] and mirrors that actor's
//! scene membership. It is enabled while its scene is active and receives
//! update passes from its actor.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use super::{Actor, EntityId, Kind, Scene};
use crate::foundation::collections::Member;
use crate::lifecycle::{
    AttachmentHooks, AttachmentLifecycle, EnabledHooks, EnabledLifecycle, Labeled,
    LifecycleError, SceneAttachmentHooks, SceneAttachmentLifecycle, UpdateHooks,
    UpdateLifecycle,
};

/// User behavior of a component
///
/// Every hook receives the component handle so it can query or re-enter the
/// engine. Hooks take `&self`; keep mutable state behind `Cell`/`RefCell`.
#[allow(unused_variables)]
pub trait ComponentBehavior: Any {
    /// Component was attached to `actor`
    fn on_attach(&self, component: &Component, actor: &Actor) {}
    /// Component is about to leave `actor`
    fn on_detach(&self, component: &Component, actor: &Actor) {}
    /// Component entered `scene` through its actor
    fn on_attach_to_scene(&self, component: &Component, scene: &Scene) {}
    /// Component is about to leave `scene`
    fn on_detach_from_scene(&self, component: &Component, scene: &Scene) {}
    /// Component became enabled
    fn on_enable(&self, component: &Component) {}
    /// Component is about to be disabled
    fn on_disable(&self, component: &Component) {}
    /// Per-frame update
    fn on_update(&self, component: &Component, delta_time: f32) {}
    /// Per-frame post-update, after every update of the frame
    fn on_post_update(&self, component: &Component, delta_time: f32) {}
}

struct ComponentInner {
    id: EntityId,
    kind: Kind,
    attachment: AttachmentLifecycle<Actor>,
    scene: SceneAttachmentLifecycle,
    enabled: EnabledLifecycle,
    update: UpdateLifecycle,
    behavior: Rc<dyn ComponentBehavior>,
    any: Rc<dyn Any>,
}

/// Shared handle to a component; clones refer to the same component
#[derive(Clone)]
pub struct Component(Rc<ComponentInner>);

impl Component {
    /// Wrap `behavior` in a new, detached component
    pub fn new<B: ComponentBehavior>(behavior: B) -> Self {
        Self::from_rc(Rc::new(behavior))
    }

    /// Wrap a shared behavior, keeping the caller's handle to it usable
    pub fn from_rc<B: ComponentBehavior>(behavior: Rc<B>) -> Self {
        Self(Rc::new(ComponentInner {
            id: EntityId::next(),
            kind: Kind::of::<B>(),
            attachment: AttachmentLifecycle::new(),
            scene: SceneAttachmentLifecycle::new(),
            enabled: EnabledLifecycle::new(),
            update: UpdateLifecycle,
            behavior: Rc::clone(&behavior) as Rc<dyn ComponentBehavior>,
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

    /// Owning actor
    pub fn actor(&self) -> Option<Actor> {
        self.0.attachment.parent()
    }

    /// Scene of the owning actor
    pub fn scene(&self) -> Option<Scene> {
        self.0.scene.scene()
    }

    /// Whether the component belongs to an actor
    pub fn is_attached(&self) -> bool {
        self.0.attachment.is_attached()
    }

    /// Whether the component is inside a scene
    pub fn is_attached_to_scene(&self) -> bool {
        self.0.scene.is_attached_to_scene()
    }

    /// Whether the component is enabled
    pub fn is_enabled(&self) -> bool {
        self.0.enabled.is_enabled()
    }

    /// Typed access to the behavior
    pub fn behavior<B: Any>(&self) -> Option<Rc<B>> {
        Rc::clone(&self.0.any).downcast::<B>().ok()
    }

    pub(crate) fn attach(&self, actor: &Actor) -> Result<(), LifecycleError> {
        self.0.attachment.attach(actor, self)
    }

    pub(crate) fn detach(&self) -> Result<(), LifecycleError> {
        self.0.attachment.detach(self)
    }

    pub(crate) fn attach_to_scene(&self, scene: &Scene) -> Result<(), LifecycleError> {
        self.0.scene.attach_to_scene(scene, self)
    }

    pub(crate) fn detach_from_scene(&self) -> Result<(), LifecycleError> {
        self.0.scene.detach_from_scene(self)
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
    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent(Rc::downgrade(&self.0))
    }
}

/// Non-owning component handle
#[derive(Debug, Clone)]
pub struct WeakComponent(Weak<ComponentInner>);

impl WeakComponent {
    /// Recover the component if it is still alive
    pub fn upgrade(&self) -> Option<Component> {
        self.0.upgrade().map(Component)
    }
}

impl Labeled for Component {
    fn label(&self) -> String {
        format!("{}{}", self.0.kind, self.0.id)
    }
}

impl AttachmentHooks<Actor> for Component {
    fn on_attach(&self, actor: &Actor) {
        self.0.behavior.on_attach(self, actor);
    }

    fn after_attach(&self, actor: &Actor) {
        if let Some(scene) = actor.scene() {
            if self.scene().as_ref() != Some(&scene) {
                let _ = self.attach_to_scene(&scene);
            }
        }
    }

    fn before_detach(&self, _actor: &Actor) {
        if self.is_attached_to_scene() {
            let _ = self.detach_from_scene();
        }
    }

    fn on_detach(&self, actor: &Actor) {
        self.0.behavior.on_detach(self, actor);
    }
}

impl SceneAttachmentHooks for Component {
    fn on_attach_to_scene(&self, scene: &Scene) {
        self.0.behavior.on_attach_to_scene(self, scene);
    }

    fn after_attach_to_scene(&self, scene: &Scene) {
        if scene.is_enabled() && !self.is_enabled() {
            let _ = self.enable();
        }
    }

    fn before_detach_from_scene(&self, _scene: &Scene) {
        if self.is_enabled() && !self.0.enabled.is_in_transition() {
            let _ = self.disable();
        }
    }

    fn on_detach_from_scene(&self, scene: &Scene) {
        self.0.behavior.on_detach_from_scene(self, scene);
    }
}

impl EnabledHooks for Component {
    fn on_enable(&self) {
        self.0.behavior.on_enable(self);
    }

    fn on_disable(&self) {
        self.0.behavior.on_disable(self);
    }
}

impl UpdateHooks for Component {
    fn on_update(&self, delta_time: f32) {
        self.0.behavior.on_update(self, delta_time);
    }

    fn on_post_update(&self, delta_time: f32) {
        self.0.behavior.on_post_update(self, delta_time);
    }
}

impl Member for Component {
    fn id(&self) -> EntityId {
        self.0.id
    }

    fn kind(&self) -> Kind {
        self.0.kind
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("label", &self.label())
            .field("attached", &self.is_attached())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter {
        updates: Cell<u32>,
    }

    impl ComponentBehavior for Counter {
        fn on_update(&self, _component: &Component, _delta_time: f32) {
            self.updates.set(self.updates.get() + 1);
        }
    }

    struct Marker;
    impl ComponentBehavior for Marker {}

    #[test]
    fn test_new_component_is_detached_and_disabled() {
        let component = Component::new(Marker);

        assert!(component.actor().is_none());
        assert!(component.scene().is_none());
        assert!(!component.is_enabled());
        assert_eq!(component.kind(), Kind::of::<Marker>());
        assert!(component.label().starts_with("Marker#"));
    }

    #[test]
    fn test_typed_behavior_lookup() {
        let shared = Rc::new(Counter::default());
        let component = Component::from_rc(Rc::clone(&shared));

        let found = component.behavior::<Counter>().unwrap();
        assert!(Rc::ptr_eq(&found, &shared));
        assert!(component.behavior::<Marker>().is_none());
    }

    #[test]
    fn test_update_requires_enabled() {
        let component = Component::new(Counter::default());
        let counter = component.behavior::<Counter>().unwrap();

        assert!(component.update(0.016).is_err());
        component.enable().unwrap();
        component.update(0.016).unwrap();
        assert_eq!(counter.updates.get(), 1);
    }

    #[test]
    fn test_handle_equality_is_identity() {
        let a = Component::new(Marker);
        let b = Component::new(Marker);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.downgrade().upgrade(), Some(a));
    }
}
