//! World: root of the entity tree and the per-frame entry point

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use super::{
    EntityId, Kind, Scene, SceneBehavior, SceneManager, System, SystemBehavior, SystemManager,
    WeakSystemHost,
};
use crate::lifecycle::{Labeled, LifecycleError, ParentHandle};

struct WorldInner {
    id: EntityId,
    scenes: SceneManager,
    systems: SystemManager,
}

/// Root container owning scenes and world-scoped systems
///
/// The world has no lifecycle of its own. [`World::update`] is the single
/// entry point a frame driver calls.
#[derive(Clone)]
pub struct World(Rc<WorldInner>);

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self(Rc::new_cyclic(|weak: &Weak<WorldInner>| WorldInner {
            id: EntityId::next(),
            scenes: SceneManager::new(WeakWorld(weak.clone())),
            systems: SystemManager::new(WeakSystemHost::World(WeakWorld(weak.clone()))),
        }))
    }

    /// Identity
    pub fn id(&self) -> EntityId {
        self.0.id
    }

    /// Add `scene`, taking it away from any other world first
    pub fn attach_scene(&self, scene: &Scene) -> Result<(), LifecycleError> {
        self.0.scenes.attach(scene)
    }

    /// Remove `scene`; the active scene reference is cleared if it was active
    pub fn detach_scene(&self, scene: &Scene) -> Result<(), LifecycleError> {
        self.0.scenes.detach(scene)
    }

    /// Switch the active scene, or clear it with `None`
    pub fn set_active_scene(&self, scene: Option<&Scene>) -> Result<(), LifecycleError> {
        self.0.scenes.set_active(scene)
    }

    /// Currently active scene
    pub fn active_scene(&self) -> Option<Scene> {
        self.0.scenes.active()
    }

    /// Scenes in attachment order
    pub fn scenes(&self) -> Vec<Scene> {
        self.0.scenes.all()
    }

    /// Scenes of exactly `kind`
    pub fn scenes_with_kind(&self, kind: Kind) -> Vec<Scene> {
        self.0.scenes.get_with_kind(kind)
    }

    /// First scene whose behavior is `B`
    pub fn scene_of<B: SceneBehavior>(&self) -> Option<Scene> {
        self.0.scenes.get_with_type::<B>()
    }

    /// Scene manager of this world
    pub fn scene_manager(&self) -> &SceneManager {
        &self.0.scenes
    }

    /// Add a world-scoped `system`, taking it away from its previous host
    pub fn attach_system(&self, system: &System) -> Result<(), LifecycleError> {
        self.0.systems.attach(system)
    }

    /// Remove `system`
    pub fn detach_system(&self, system: &System) -> Result<(), LifecycleError> {
        self.0.systems.detach(system)
    }

    /// World-scoped systems in attachment order
    pub fn systems(&self) -> Vec<System> {
        self.0.systems.all()
    }

    /// World-scoped systems of exactly `kind`
    pub fn systems_with_kind(&self, kind: Kind) -> Vec<System> {
        self.0.systems.get_with_kind(kind)
    }

    /// First world-scoped system whose behavior is `B`
    pub fn system_of<B: SystemBehavior>(&self) -> Option<System> {
        self.0.systems.get_with_type::<B>()
    }

    /// System manager of this world
    pub fn system_manager(&self) -> &SystemManager {
        &self.0.systems
    }

    /// Run one frame
    ///
    /// World systems update, then the active scene, then world systems
    /// post-update, then the active scene post-updates. Without an active
    /// scene only the systems run.
    pub fn update(&self, delta_time: f32) {
        log::trace!("{}: update dt={delta_time}", self.label());

        self.0.systems.for_each(|system| {
            if system.is_enabled() {
                let _ = system.update(delta_time);
            }
        });
        if let Some(scene) = self.active_scene().filter(Scene::is_enabled) {
            let _ = scene.update(delta_time);
        }

        self.0.systems.for_each(|system| {
            if system.is_enabled() {
                let _ = system.post_update(delta_time);
            }
        });
        if let Some(scene) = self.active_scene().filter(Scene::is_enabled) {
            let _ = scene.post_update(delta_time);
        }
    }

    /// Non-owning handle
    pub fn downgrade(&self) -> WeakWorld {
        WeakWorld(Rc::downgrade(&self.0))
    }
}

/// Non-owning world handle
#[derive(Debug, Clone)]
pub struct WeakWorld(Weak<WorldInner>);

impl WeakWorld {
    /// Recover the world if it is still alive
    pub fn upgrade(&self) -> Option<World> {
        self.0.upgrade().map(World)
    }
}

impl ParentHandle for World {
    type Weak = WeakWorld;

    fn downgrade(&self) -> WeakWorld {
        WeakWorld(Rc::downgrade(&self.0))
    }

    fn upgrade(weak: &WeakWorld) -> Option<Self> {
        weak.upgrade()
    }
}

impl Labeled for World {
    fn label(&self) -> String {
        format!("World{}", self.0.id)
    }
}

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for World {}

impl Hash for World {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("label", &self.label())
            .field("scenes", &self.0.scenes.len())
            .field("systems", &self.0.systems.len())
            .field("active", &self.active_scene().map(|scene| scene.label()))
            .finish()
    }
}
