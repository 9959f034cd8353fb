//! Entity identity

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique entity identifier, assigned at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate the next identifier
    pub(crate) fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable type identifier of an entity's behavior
///
/// Assigned once when the entity is built and used as the key of every
/// by-type index. Two entities share a kind exactly when their behaviors are
/// the same Rust type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind {
    id: TypeId,
    name: &'static str,
}

impl Kind {
    /// Kind of behavior type `T`
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name(type_name::<T>()),
        }
    }

    /// Short type name, without module path or generic arguments
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lantern;
    struct Wrapper<T>(T);

    #[test]
    fn test_entity_ids_are_unique_and_increasing() {
        let a = EntityId::next();
        let b = EntityId::next();
        assert!(b > a);
        assert_eq!(format!("{b}"), format!("#{}", b.value()));
    }

    #[test]
    fn test_kind_identity_follows_type() {
        assert_eq!(Kind::of::<Lantern>(), Kind::of::<Lantern>());
        assert_ne!(Kind::of::<Lantern>(), Kind::of::<Wrapper<Lantern>>());
        assert_ne!(Kind::of::<Wrapper<u8>>(), Kind::of::<Wrapper<u16>>());
    }

    #[test]
    fn test_kind_name_strips_path_and_generics() {
        assert_eq!(Kind::of::<Lantern>().name(), "Lantern");
        assert_eq!(Kind::of::<Wrapper<Lantern>>().name(), "Wrapper");
    }
}
