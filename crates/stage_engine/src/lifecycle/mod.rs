//! Lifecycle state machines
//!
//! Every entity in the engine is assembled from the same small set of
//! independent state machines:
//!
//! - [`EnabledLifecycle`]: Disabled ⇄ Enabled
//! - [`AttachmentLifecycle`]: Detached ⇄ Attached(parent)
//! - [`SceneAttachmentLifecycle`]: Detached ⇄ Attached(scene), tracked apart
//!   from the direct parent
//! - [`UpdateLifecycle`]: stateless, gated by the enabled machine
//!
//! Each machine is embedded by value in the entity that owns it. The entity
//! implements the matching hooks trait and passes itself in on every
//! transition, so the before/on/after hook points fire in a fixed order.
//!
//! Illegal transitions never panic. They log a warning and come back as a
//! [`LifecycleError`] without touching state or firing any hook. A machine
//! also refuses to start a transition while one of its own is still running,
//! so a hook that re-enters its entity cannot fire the same hooks twice.

pub mod attachment;
pub mod enabled;
pub mod scene_attachment;
pub mod update;

pub use attachment::{AttachmentHooks, AttachmentLifecycle, ParentHandle};
pub use enabled::{EnabledHooks, EnabledLifecycle};
pub use scene_attachment::{SceneAttachmentHooks, SceneAttachmentLifecycle};
pub use update::{UpdateHooks, UpdateLifecycle};

use thiserror::Error;

/// Human readable identity used in lifecycle log lines and errors
pub trait Labeled {
    /// Label of the form `KindName#id`
    fn label(&self) -> String;
}

/// Rejected lifecycle transitions
///
/// Every variant is a no-op: no state changed and no hook fired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Attach called with the parent the entity is already attached to
    #[error("{0}: already attached")]
    AlreadyAttached(String),

    /// Detach called on an entity that has no parent
    #[error("{0}: not attached")]
    NotAttached(String),

    /// Scene attach called with the scene the entity already belongs to
    #[error("{0}: already attached to scene")]
    AlreadyAttachedToScene(String),

    /// Scene detach called on an entity outside of any scene
    #[error("{0}: not attached to scene")]
    NotAttachedToScene(String),

    /// Enable called on an enabled entity
    #[error("{0}: already enabled")]
    AlreadyEnabled(String),

    /// Disable or update called on a disabled entity
    #[error("{0}: not enabled")]
    NotEnabled(String),

    /// Transition requested from a hook of the same machine's running transition
    #[error("{0}: transition already in progress")]
    InTransition(String),

    /// Manager attach called with a child that is already a member
    #[error("{owner}: {child} already attached")]
    AlreadyMember {
        /// Owning entity
        owner: String,
        /// Rejected child
        child: String,
    },

    /// Manager detach called with a child that was never attached
    #[error("{owner}: {child} not attached")]
    UnknownChild {
        /// Owning entity
        owner: String,
        /// Rejected child
        child: String,
    },

    /// Scene activation requested for the scene that is already active
    #[error("{owner}: {scene} already active")]
    AlreadyActive {
        /// Owning world
        owner: String,
        /// Requested scene, `none` for clearing
        scene: String,
    },

    /// Manager used after its owner was dropped
    #[error("{0}: owner no longer exists")]
    OwnerDropped(String),
}

/// Log a rejected transition and hand it back to the caller
pub(crate) fn rejected(error: LifecycleError) -> Result<(), LifecycleError> {
    log::warn!("{error}");
    Err(error)
}
