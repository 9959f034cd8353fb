//! Systems: per-frame logic owned by a world or a scene
//!
//! A world-scoped system is enabled for as long as it is attached. A
//! scene-scoped system follows its scene: enabled while the scene is active.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::{EntityId, Kind, Scene, WeakScene, WeakWorld, World};
use crate::foundation::collections::Member;
use crate::lifecycle::{
    AttachmentHooks, AttachmentLifecycle, EnabledHooks, EnabledLifecycle, Labeled,
    LifecycleError, ParentHandle, UpdateHooks, UpdateLifecycle,
};

/// User behavior of a system
#[allow(unused_variables)]
pub trait SystemBehavior: Any {
    /// System was attached to `host`
    fn on_attach(&self, system: &System, host: &SystemHost) {}
    /// System is about to leave `host`
    fn on_detach(&self, system: &System, host: &SystemHost) {}
    /// System became enabled
    fn on_enable(&self, system: &System) {}
    /// System is about to be disabled
    fn on_disable(&self, system: &System) {}
    /// Per-frame update
    fn on_update(&self, system: &System, delta_time: f32) {}
    /// Per-frame post-update
    fn on_post_update(&self, system: &System, delta_time: f32) {}
}

/// Owner of a system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemHost {
    /// World-scoped system
    World(World),
    /// Scene-scoped system
    Scene(Scene),
}

/// Non-owning form of [`SystemHost`]
#[derive(Debug, Clone)]
pub enum WeakSystemHost {
    /// World-scoped system
    World(WeakWorld),
    /// Scene-scoped system
    Scene(WeakScene),
}

impl WeakSystemHost {
    /// Recover the host if it is still alive
    pub fn upgrade(&self) -> Option<SystemHost> {
        match self {
            Self::World(world) => world.upgrade().map(SystemHost::World),
            Self::Scene(scene) => scene.upgrade().map(SystemHost::Scene),
        }
    }
}

impl SystemHost {
    /// Whether systems attached here should run
    ///
    /// A world is always live; a scene only while it is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::World(_) => true,
            Self::Scene(scene) => scene.is_enabled(),
        }
    }

    /// Detach `system` through the host's manager
    pub fn detach_system(&self, system: &System) -> Result<(), LifecycleError> {
        match self {
            Self::World(world) => world.detach_system(system),
            Self::Scene(scene) => scene.detach_system(system),
        }
    }

    /// World this host belongs to
    pub fn world(&self) -> Option<World> {
        match self {
            Self::World(world) => Some(world.clone()),
            Self::Scene(scene) => scene.world(),
        }
    }
}

impl ParentHandle for SystemHost {
    type Weak = WeakSystemHost;

    fn downgrade(&self) -> WeakSystemHost {
        match self {
            Self::World(world) => WeakSystemHost::World(world.downgrade()),
            Self::Scene(scene) => WeakSystemHost::Scene(scene.downgrade()),
        }
    }

    fn upgrade(weak: &WeakSystemHost) -> Option<Self> {
        weak.upgrade()
    }
}

impl Labeled for SystemHost {
    fn label(&self) -> String {
        match self {
            Self::World(world) => world.label(),
            Self::Scene(scene) => scene.label(),
        }
    }
}

impl From<World> for SystemHost {
    fn from(world: World) -> Self {
        Self::World(world)
    }
}

impl From<Scene> for SystemHost {
    fn from(scene: Scene) -> Self {
        Self::Scene(scene)
    }
}

struct SystemInner {
    id: EntityId,
    kind: Kind,
    attachment: AttachmentLifecycle<SystemHost>,
    enabled: EnabledLifecycle,
    update: UpdateLifecycle,
    behavior: Rc<dyn SystemBehavior>,
    any: Rc<dyn Any>,
}

/// Shared handle to a system
#[derive(Clone)]
pub struct System(Rc<SystemInner>);

impl System {
    /// Wrap `behavior` in a new, detached system
    pub fn new<B: SystemBehavior>(behavior: B) -> Self {
        Self::from_rc(Rc::new(behavior))
    }

    /// Wrap a shared behavior
    pub fn from_rc<B: SystemBehavior>(behavior: Rc<B>) -> Self {
        Self(Rc::new(SystemInner {
            id: EntityId::next(),
            kind: Kind::of::<B>(),
            attachment: AttachmentLifecycle::new(),
            enabled: EnabledLifecycle::new(),
            update: UpdateLifecycle,
            behavior: Rc::clone(&behavior) as Rc<dyn SystemBehavior>,
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

    /// World or scene the system is attached to
    pub fn host(&self) -> Option<SystemHost> {
        self.0.attachment.parent()
    }

    /// Whether the system is attached
    pub fn is_attached(&self) -> bool {
        self.0.attachment.is_attached()
    }

    /// Whether the system is enabled
    pub fn is_enabled(&self) -> bool {
        self.0.enabled.is_enabled()
    }

    /// Typed access to the behavior
    pub fn behavior<B: Any>(&self) -> Option<Rc<B>> {
        Rc::clone(&self.0.any).downcast::<B>().ok()
    }

    pub(crate) fn attach(&self, host: &SystemHost) -> Result<(), LifecycleError> {
        self.0.attachment.attach(host, self)
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
}

impl Labeled for System {
    fn label(&self) -> String {
        format!("{}{}", self.0.kind, self.0.id)
    }
}

impl AttachmentHooks<SystemHost> for System {
    fn on_attach(&self, host: &SystemHost) {
        self.0.behavior.on_attach(self, host);
    }

    fn after_attach(&self, host: &SystemHost) {
        if host.is_enabled() && !self.is_enabled() {
            let _ = self.enable();
        }
    }

    fn before_detach(&self, _host: &SystemHost) {
        if self.is_enabled() && !self.0.enabled.is_in_transition() {
            let _ = self.disable();
        }
    }

    fn on_detach(&self, host: &SystemHost) {
        self.0.behavior.on_detach(self, host);
    }
}

impl EnabledHooks for System {
    fn on_enable(&self) {
        self.0.behavior.on_enable(self);
    }

    fn on_disable(&self) {
        self.0.behavior.on_disable(self);
    }
}

impl UpdateHooks for System {
    fn on_update(&self, delta_time: f32) {
        self.0.behavior.on_update(self, delta_time);
    }

    fn on_post_update(&self, delta_time: f32) {
        self.0.behavior.on_post_update(self, delta_time);
    }
}

impl Member for System {
    fn id(&self) -> EntityId {
        self.0.id
    }

    fn kind(&self) -> Kind {
        self.0.kind
    }
}

impl PartialEq for System {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for System {}

impl Hash for System {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("label", &self.label())
            .field("attached", &self.is_attached())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
