//! Per-frame update pass, gated by the enabled state

use super::{rejected, EnabledLifecycle, Labeled, LifecycleError};

/// Hook points around the update and post-update passes
pub trait UpdateHooks: Labeled {
    /// Runs first in the update pass
    fn before_update(&self, _delta_time: f32) {}
    /// User update
    fn on_update(&self, _delta_time: f32) {}
    /// Runs last in the update pass
    fn after_update(&self, _delta_time: f32) {}
    /// Runs first in the post-update pass
    fn before_post_update(&self, _delta_time: f32) {}
    /// User post-update
    fn on_post_update(&self, _delta_time: f32) {}
    /// Runs last in the post-update pass
    fn after_post_update(&self, _delta_time: f32) {}
}

/// Stateless update machine; only runs while the paired enabled machine is on
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateLifecycle;

impl UpdateLifecycle {
    /// First pass of a frame
    pub fn update<H>(
        self,
        gate: &EnabledLifecycle,
        delta_time: f32,
        hooks: &H,
    ) -> Result<(), LifecycleError>
    where
        H: UpdateHooks + ?Sized,
    {
        if !gate.is_enabled() {
            return rejected(LifecycleError::NotEnabled(hooks.label()));
        }

        hooks.before_update(delta_time);
        hooks.on_update(delta_time);
        hooks.after_update(delta_time);
        Ok(())
    }

    /// Second pass of a frame, after every update has run
    pub fn post_update<H>(
        self,
        gate: &EnabledLifecycle,
        delta_time: f32,
        hooks: &H,
    ) -> Result<(), LifecycleError>
    where
        H: UpdateHooks + ?Sized,
    {
        if !gate.is_enabled() {
            return rejected(LifecycleError::NotEnabled(hooks.label()));
        }

        hooks.before_post_update(delta_time);
        hooks.on_post_update(delta_time);
        hooks.after_post_update(delta_time);
        Ok(())
    }
}
