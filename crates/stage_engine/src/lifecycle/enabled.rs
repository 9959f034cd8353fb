//! Enabled/disabled state machine

use std::cell::Cell;

use super::{rejected, Labeled, LifecycleError};

/// Hook points around enable and disable transitions
///
/// `before_*` and `after_*` are used by the engine to cascade state to
/// children; `on_*` is forwarded to user behavior.
pub trait EnabledHooks: Labeled {
    /// Runs before the flag flips to enabled
    fn before_enable(&self) {}
    /// Runs right after the flag flips to enabled
    fn on_enable(&self) {}
    /// Runs last in an enable transition
    fn after_enable(&self) {}
    /// Runs first in a disable transition, while still enabled
    fn before_disable(&self) {}
    /// Runs while still enabled, right before the flag flips
    fn on_disable(&self) {}
    /// Runs last in a disable transition
    fn after_disable(&self) {}
}

/// Disabled ⇄ Enabled
#[derive(Debug, Default)]
pub struct EnabledLifecycle {
    enabled: Cell<bool>,
    in_transition: Cell<bool>,
}

impl EnabledLifecycle {
    /// Create a machine in the disabled state
    pub const fn new() -> Self {
        Self {
            enabled: Cell::new(false),
            in_transition: Cell::new(false),
        }
    }

    /// Whether the machine is currently enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Whether an enable or disable transition is running
    pub fn is_in_transition(&self) -> bool {
        self.in_transition.get()
    }

    /// Disabled → Enabled
    pub fn enable<H: EnabledHooks + ?Sized>(&self, hooks: &H) -> Result<(), LifecycleError> {
        if self.in_transition.get() {
            return rejected(LifecycleError::InTransition(hooks.label()));
        }
        if self.enabled.get() {
            return rejected(LifecycleError::AlreadyEnabled(hooks.label()));
        }

        self.in_transition.set(true);
        hooks.before_enable();
        self.enabled.set(true);
        log::debug!("{}: enabled", hooks.label());
        hooks.on_enable();
        hooks.after_enable();
        self.in_transition.set(false);
        Ok(())
    }

    /// Enabled → Disabled
    pub fn disable<H: EnabledHooks + ?Sized>(&self, hooks: &H) -> Result<(), LifecycleError> {
        if self.in_transition.get() {
            return rejected(LifecycleError::InTransition(hooks.label()));
        }
        if !self.enabled.get() {
            return rejected(LifecycleError::NotEnabled(hooks.label()));
        }

        self.in_transition.set(true);
        hooks.before_disable();
        hooks.on_disable();
        self.enabled.set(false);
        log::debug!("{}: disabled", hooks.label());
        hooks.after_disable();
        self.in_transition.set(false);
        Ok(())
    }
}
