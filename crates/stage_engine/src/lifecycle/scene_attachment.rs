//! Scene membership state machine
//!
//! Same shape as [`AttachmentLifecycle`](super::AttachmentLifecycle), but
//! tracks which scene an entity lives in independently of its direct parent.
//! Components use it to follow the scene of the actor that owns them.

use std::cell::{Cell, RefCell};

use super::{rejected, Labeled, LifecycleError, ParentHandle};
use crate::ecs::Scene;

/// Hook points around scene attach and detach transitions
pub trait SceneAttachmentHooks: Labeled {
    /// Runs before the scene is recorded
    fn before_attach_to_scene(&self, _scene: &Scene) {}
    /// Runs right after the scene is recorded
    fn on_attach_to_scene(&self, _scene: &Scene) {}
    /// Runs last in a scene attach transition
    fn after_attach_to_scene(&self, _scene: &Scene) {}
    /// Runs first in a scene detach transition
    fn before_detach_from_scene(&self, _scene: &Scene) {}
    /// Runs right before the scene is cleared
    fn on_detach_from_scene(&self, _scene: &Scene) {}
    /// Runs last in a scene detach transition
    fn after_detach_from_scene(&self, _scene: &Scene) {}
}

/// Detached ⇄ Attached(scene)
#[derive(Debug, Default)]
pub struct SceneAttachmentLifecycle {
    scene: RefCell<Option<<Scene as ParentHandle>::Weak>>,
    in_transition: Cell<bool>,
}

impl SceneAttachmentLifecycle {
    /// Create a machine outside of any scene
    pub const fn new() -> Self {
        Self {
            scene: RefCell::new(None),
            in_transition: Cell::new(false),
        }
    }

    /// Scene currently recorded, if any
    pub fn scene(&self) -> Option<Scene> {
        self.scene.borrow().as_ref().and_then(Scene::upgrade)
    }

    /// Whether a live scene is recorded
    pub fn is_attached_to_scene(&self) -> bool {
        self.scene().is_some()
    }

    /// Enter `scene`, leaving any previous scene first
    pub fn attach_to_scene<H>(&self, scene: &Scene, hooks: &H) -> Result<(), LifecycleError>
    where
        H: SceneAttachmentHooks + ?Sized,
    {
        if self.in_transition.get() {
            return rejected(LifecycleError::InTransition(hooks.label()));
        }
        if let Some(current) = self.scene() {
            if current == *scene {
                return rejected(LifecycleError::AlreadyAttachedToScene(hooks.label()));
            }
            self.detach_from_scene(hooks)?;
        }

        self.in_transition.set(true);
        hooks.before_attach_to_scene(scene);
        *self.scene.borrow_mut() = Some(scene.downgrade());
        log::debug!("{}: entered {}", hooks.label(), scene.label());
        hooks.on_attach_to_scene(scene);
        hooks.after_attach_to_scene(scene);
        self.in_transition.set(false);
        Ok(())
    }

    /// Leave the current scene
    pub fn detach_from_scene<H>(&self, hooks: &H) -> Result<(), LifecycleError>
    where
        H: SceneAttachmentHooks + ?Sized,
    {
        if self.in_transition.get() {
            return rejected(LifecycleError::InTransition(hooks.label()));
        }
        let Some(scene) = self.scene() else {
            self.scene.borrow_mut().take();
            return rejected(LifecycleError::NotAttachedToScene(hooks.label()));
        };

        self.in_transition.set(true);
        hooks.before_detach_from_scene(&scene);
        hooks.on_detach_from_scene(&scene);
        self.scene.borrow_mut().take();
        log::debug!("{}: left {}", hooks.label(), scene.label());
        hooks.after_detach_from_scene(&scene);
        self.in_transition.set(false);
        Ok(())
    }
}
