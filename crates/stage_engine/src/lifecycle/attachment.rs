//! Exclusive parent attachment state machine

use std::cell::{Cell, RefCell};
use std::fmt;

use super::{rejected, Labeled, LifecycleError};

/// Strong handle that can be stored as a non-owning back-reference
///
/// Equality must be identity: two handles are equal when they point at the
/// same entity.
pub trait ParentHandle: Clone + PartialEq {
    /// Non-owning form of the handle
    type Weak: Clone;

    /// Create the non-owning form
    fn downgrade(&self) -> Self::Weak;

    /// Recover the strong handle if the parent is still alive
    fn upgrade(weak: &Self::Weak) -> Option<Self>;
}

/// Hook points around attach and detach transitions
pub trait AttachmentHooks<P>: Labeled {
    /// Runs before the parent is recorded
    fn before_attach(&self, _parent: &P) {}
    /// Runs right after the parent is recorded
    fn on_attach(&self, _parent: &P) {}
    /// Runs last in an attach transition
    fn after_attach(&self, _parent: &P) {}
    /// Runs first in a detach transition, while still attached
    fn before_detach(&self, _parent: &P) {}
    /// Runs while still attached, right before the parent is cleared
    fn on_detach(&self, _parent: &P) {}
    /// Runs last in a detach transition
    fn after_detach(&self, _parent: &P) {}
}

/// Detached ⇄ Attached(parent)
///
/// The parent is held weakly; a parent that has been dropped reads as
/// detached.
pub struct AttachmentLifecycle<P: ParentHandle> {
    parent: RefCell<Option<P::Weak>>,
    in_transition: Cell<bool>,
}

impl<P: ParentHandle> fmt::Debug for AttachmentLifecycle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachmentLifecycle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl<P: ParentHandle> Default for AttachmentLifecycle<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ParentHandle> AttachmentLifecycle<P> {
    /// Create a detached machine
    pub const fn new() -> Self {
        Self {
            parent: RefCell::new(None),
            in_transition: Cell::new(false),
        }
    }

    /// Current parent, if attached
    pub fn parent(&self) -> Option<P> {
        self.parent.borrow().as_ref().and_then(P::upgrade)
    }

    /// Whether a live parent is recorded
    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    /// Whether an attach or detach transition is running
    pub fn is_in_transition(&self) -> bool {
        self.in_transition.get()
    }

    /// Attach to `parent`, detaching from any previous parent first
    pub fn attach<H>(&self, parent: &P, hooks: &H) -> Result<(), LifecycleError>
    where
        H: AttachmentHooks<P> + ?Sized,
    {
        if self.in_transition.get() {
            return rejected(LifecycleError::InTransition(hooks.label()));
        }
        if let Some(current) = self.parent() {
            if current == *parent {
                return rejected(LifecycleError::AlreadyAttached(hooks.label()));
            }
            self.detach(hooks)?;
        }

        self.in_transition.set(true);
        hooks.before_attach(parent);
        *self.parent.borrow_mut() = Some(parent.downgrade());
        log::debug!("{}: attached", hooks.label());
        hooks.on_attach(parent);
        hooks.after_attach(parent);
        self.in_transition.set(false);
        Ok(())
    }

    /// Detach from the current parent
    pub fn detach<H>(&self, hooks: &H) -> Result<(), LifecycleError>
    where
        H: AttachmentHooks<P> + ?Sized,
    {
        if self.in_transition.get() {
            return rejected(LifecycleError::InTransition(hooks.label()));
        }
        let Some(parent) = self.parent() else {
            self.parent.borrow_mut().take();
            return rejected(LifecycleError::NotAttached(hooks.label()));
        };

        self.in_transition.set(true);
        hooks.before_detach(&parent);
        hooks.on_detach(&parent);
        self.parent.borrow_mut().take();
        log::debug!("{}: detached", hooks.label());
        hooks.after_detach(&parent);
        self.in_transition.set(false);
        Ok(())
    }
}
