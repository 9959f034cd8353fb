//! # Scene Manager
//!
//! Scene membership of a world and the single active scene. Activating a
//! scene disables the previous one before enabling the new one, so at most
//! one scene per world is ever enabled. A world that goes away disables its
//! active scene on the way out.

use std::cell::RefCell;

use super::{Kind, Scene, SceneBehavior, WeakWorld};
use crate::foundation::collections::Roster;
use crate::lifecycle::{rejected, Labeled, LifecycleError};

/// Owns a world's scenes and tracks which one is active
#[derive(Debug)]
pub struct SceneManager {
    world: WeakWorld,
    scenes: RefCell<Roster<Scene>>,
    active: RefCell<Option<Scene>>,
}

impl SceneManager {
    pub(crate) fn new(world: WeakWorld) -> Self {
        Self {
            world,
            scenes: RefCell::new(Roster::new()),
            active: RefCell::new(None),
        }
    }

    fn owner_label(&self) -> String {
        self.world
            .upgrade()
            .map_or_else(|| "SceneManager".to_string(), |world| world.label())
    }

    /// Take `scene` in, moving it away from its previous world first
    pub(crate) fn attach(&self, scene: &Scene) -> Result<(), LifecycleError> {
        let Some(world) = self.world.upgrade() else {
            return rejected(LifecycleError::OwnerDropped(scene.label()));
        };
        if self.has(scene) {
            return rejected(LifecycleError::AlreadyMember {
                owner: world.label(),
                child: scene.label(),
            });
        }

        if let Some(previous) = scene.world() {
            previous.detach_scene(scene)?;
        }

        self.scenes.borrow_mut().insert(scene.clone());
        if let Err(error) = scene.attach(&world) {
            self.scenes.borrow_mut().remove(scene);
            return Err(error);
        }
        Ok(())
    }

    /// Let `scene` go; clears the active reference if `scene` was active
    pub(crate) fn detach(&self, scene: &Scene) -> Result<(), LifecycleError> {
        if !self.has(scene) {
            return rejected(LifecycleError::UnknownChild {
                owner: self.owner_label(),
                child: scene.label(),
            });
        }

        scene.detach()?;
        self.scenes.borrow_mut().remove(scene);

        let mut active = self.active.borrow_mut();
        if active.as_ref() == Some(scene) {
            log::debug!("{}: active scene {} detached", self.owner_label(), scene.label());
            *active = None;
        }
        Ok(())
    }

    /// Make `scene` the active scene, or clear the active scene with `None`
    pub(crate) fn set_active(&self, scene: Option<&Scene>) -> Result<(), LifecycleError> {
        let current = self.active.borrow().clone();
        if current.as_ref() == scene {
            return rejected(LifecycleError::AlreadyActive {
                owner: self.owner_label(),
                scene: scene.map_or_else(|| "none".to_string(), Labeled::label),
            });
        }
        if let Some(scene) = scene {
            if !self.has(scene) {
                return rejected(LifecycleError::UnknownChild {
                    owner: self.owner_label(),
                    child: scene.label(),
                });
            }
        }

        if let Some(previous) = current {
            if previous.is_enabled() {
                let _ = previous.disable();
            }
        }

        *self.active.borrow_mut() = scene.cloned();
        log::debug!(
            "{}: active scene is {}",
            self.owner_label(),
            scene.map_or_else(|| "none".to_string(), Labeled::label)
        );

        if let Some(scene) = scene {
            if !scene.is_enabled() {
                let _ = scene.enable();
            }
        }
        Ok(())
    }

    /// Active scene, if any
    pub fn active(&self) -> Option<Scene> {
        self.active.borrow().clone()
    }

    /// All scenes in attachment order
    pub fn all(&self) -> Vec<Scene> {
        self.scenes.borrow().all()
    }

    /// Whether `scene` is a member
    pub fn has(&self, scene: &Scene) -> bool {
        self.scenes.borrow().contains(scene)
    }

    /// Whether any member has `kind`
    pub fn has_with_kind(&self, kind: Kind) -> bool {
        self.scenes.borrow().contains_kind(kind)
    }

    /// Members of exactly `kind`
    pub fn get_with_kind(&self, kind: Kind) -> Vec<Scene> {
        self.scenes.borrow().with_kind(kind)
    }

    /// First member whose behavior is `B`
    pub fn get_with_type<B: SceneBehavior>(&self) -> Option<Scene> {
        self.scenes.borrow().first_with_kind(Kind::of::<B>())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.scenes.borrow().len()
    }

    /// Whether there are no members
    pub fn is_empty(&self) -> bool {
        self.scenes.borrow().is_empty()
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        if let Some(scene) = self.active.get_mut().take() {
            if scene.is_enabled() {
                let _ = scene.disable();
            }
        }
    }
}
