//! System membership of a world or a scene

use std::cell::RefCell;

use super::{Kind, System, SystemBehavior, WeakSystemHost};
use crate::foundation::collections::Roster;
use crate::lifecycle::{rejected, Labeled, LifecycleError};

/// Owns the systems of one host
#[derive(Debug)]
pub struct SystemManager {
    host: WeakSystemHost,
    systems: RefCell<Roster<System>>,
}

impl SystemManager {
    pub(crate) fn new(host: WeakSystemHost) -> Self {
        Self {
            host,
            systems: RefCell::new(Roster::new()),
        }
    }

    fn owner_label(&self) -> String {
        self.host
            .upgrade()
            .map_or_else(|| "SystemManager".to_string(), |host| host.label())
    }

    /// Take `system` in, moving it away from its previous host first
    pub(crate) fn attach(&self, system: &System) -> Result<(), LifecycleError> {
        let Some(host) = self.host.upgrade() else {
            return rejected(LifecycleError::OwnerDropped(system.label()));
        };
        if self.has(system) {
            return rejected(LifecycleError::AlreadyMember {
                owner: host.label(),
                child: system.label(),
            });
        }

        if let Some(previous) = system.host() {
            previous.detach_system(system)?;
        }

        self.systems.borrow_mut().insert(system.clone());
        if let Err(error) = system.attach(&host) {
            self.systems.borrow_mut().remove(system);
            return Err(error);
        }
        Ok(())
    }

    /// Let `system` go after running its detach transition
    pub(crate) fn detach(&self, system: &System) -> Result<(), LifecycleError> {
        if !self.has(system) {
            return rejected(LifecycleError::UnknownChild {
                owner: self.owner_label(),
                child: system.label(),
            });
        }

        system.detach()?;
        self.systems.borrow_mut().remove(system);
        Ok(())
    }

    /// Visit current members; members removed during the walk are skipped
    pub(crate) fn for_each(&self, mut visit: impl FnMut(&System)) {
        let snapshot = self.systems.borrow().all();
        for system in &snapshot {
            if self.has(system) {
                visit(system);
            }
        }
    }

    /// All systems in attachment order
    pub fn all(&self) -> Vec<System> {
        self.systems.borrow().all()
    }

    /// Whether `system` is a member
    pub fn has(&self, system: &System) -> bool {
        self.systems.borrow().contains(system)
    }

    /// Whether any member has `kind`
    pub fn has_with_kind(&self, kind: Kind) -> bool {
        self.systems.borrow().contains_kind(kind)
    }

    /// Members of exactly `kind`
    pub fn get_with_kind(&self, kind: Kind) -> Vec<System> {
        self.systems.borrow().with_kind(kind)
    }

    /// First member whose behavior is `B`
    pub fn get_with_type<B: SystemBehavior>(&self) -> Option<System> {
        self.systems.borrow().first_with_kind(Kind::of::<B>())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.systems.borrow().len()
    }

    /// Whether there are no members
    pub fn is_empty(&self) -> bool {
        self.systems.borrow().is_empty()
    }
}

impl Drop for SystemManager {
    fn drop(&mut self) {
        for system in self.systems.get_mut().all() {
            if system.is_enabled() {
                let _ = system.disable();
            }
        }
    }
}
