//! Membership collections backing the entity managers

use std::collections::{HashMap, HashSet};

use crate::ecs::{EntityId, Kind};

/// Anything that can be stored in a manager
pub trait Member: Clone {
    /// Identity of the member
    fn id(&self) -> EntityId;

    /// Exact type of the member
    fn kind(&self) -> Kind;
}

/// Insertion-ordered set with O(1) membership tests
#[derive(Debug, Clone)]
pub struct MemberSet<T> {
    items: Vec<T>,
    ids: HashSet<EntityId>,
}

impl<T> Default for MemberSet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
        }
    }
}

impl<T: Member> MemberSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item`; returns false if it was already present
    pub fn insert(&mut self, item: T) -> bool {
        if !self.ids.insert(item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove `item`; returns false if it was not present
    pub fn remove(&mut self, item: &T) -> bool {
        let id = item.id();
        if !self.ids.remove(&id) {
            return false;
        }
        self.items.retain(|existing| existing.id() != id);
        true
    }

    /// Whether `item` is present
    pub fn contains(&self, item: &T) -> bool {
        self.ids.contains(&item.id())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set has no members
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First member in insertion order
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Snapshot of the members in insertion order
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

/// Kind → members of that kind; empty buckets are dropped
#[derive(Debug, Clone)]
pub struct KindIndex<T> {
    buckets: HashMap<Kind, MemberSet<T>>,
}

impl<T> Default for KindIndex<T> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }
}

impl<T: Member> KindIndex<T> {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// File `item` under `kind`
    pub fn insert(&mut self, kind: Kind, item: T) -> bool {
        self.buckets.entry(kind).or_default().insert(item)
    }

    /// Remove `item` from the `kind` bucket, dropping the bucket when empty
    pub fn remove(&mut self, kind: Kind, item: &T) -> bool {
        let Some(bucket) = self.buckets.get_mut(&kind) else {
            return false;
        };
        let removed = bucket.remove(item);
        if bucket.is_empty() {
            self.buckets.remove(&kind);
        }
        removed
    }

    /// Bucket for `kind`, if any member is filed under it
    pub fn bucket(&self, kind: Kind) -> Option<&MemberSet<T>> {
        self.buckets.get(&kind)
    }

    /// Whether any member is filed under `kind`
    pub fn contains_kind(&self, kind: Kind) -> bool {
        self.buckets.contains_key(&kind)
    }

    /// Snapshot of the `kind` bucket
    pub fn get(&self, kind: Kind) -> Vec<T> {
        self.bucket(kind).map(MemberSet::to_vec).unwrap_or_default()
    }

    /// Number of non-empty buckets
    pub fn kind_count(&self) -> usize {
        self.buckets.len()
    }
}

/// Primary member set plus its exact-kind index, kept in lockstep
#[derive(Debug, Clone)]
pub struct Roster<T> {
    members: MemberSet<T>,
    by_kind: KindIndex<T>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self {
            members: MemberSet::default(),
            by_kind: KindIndex::default(),
        }
    }
}

impl<T: Member> Roster<T> {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` to both the member set and the kind index
    pub fn insert(&mut self, item: T) -> bool {
        if !self.members.insert(item.clone()) {
            return false;
        }
        self.by_kind.insert(item.kind(), item);
        true
    }

    /// Remove `item` from both the member set and the kind index
    pub fn remove(&mut self, item: &T) -> bool {
        if !self.members.remove(item) {
            return false;
        }
        self.by_kind.remove(item.kind(), item);
        true
    }

    /// Whether `item` is a member
    pub fn contains(&self, item: &T) -> bool {
        self.members.contains(item)
    }

    /// Whether any member has `kind`
    pub fn contains_kind(&self, kind: Kind) -> bool {
        self.by_kind.contains_kind(kind)
    }

    /// Snapshot of all members in insertion order
    pub fn all(&self) -> Vec<T> {
        self.members.to_vec()
    }

    /// Snapshot of the members of `kind`
    pub fn with_kind(&self, kind: Kind) -> Vec<T> {
        self.by_kind.get(kind)
    }

    /// First member of `kind` in insertion order
    pub fn first_with_kind(&self, kind: Kind) -> Option<T> {
        self.by_kind.bucket(kind).and_then(|bucket| bucket.first().cloned())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        id: EntityId,
        kind: Kind,
    }

    struct Red;
    struct Blue;

    impl Tag {
        fn new<K: 'static>() -> Self {
            Self {
                id: EntityId::next(),
                kind: Kind::of::<K>(),
            }
        }
    }

    impl Member for Tag {
        fn id(&self) -> EntityId {
            self.id
        }

        fn kind(&self) -> Kind {
            self.kind
        }
    }

    #[test]
    fn test_member_set_keeps_insertion_order_and_rejects_duplicates() {
        let (a, b, c) = (Tag::new::<Red>(), Tag::new::<Red>(), Tag::new::<Blue>());
        let mut set = MemberSet::new();

        assert!(set.insert(a.clone()));
        assert!(set.insert(b.clone()));
        assert!(set.insert(c.clone()));
        assert!(!set.insert(b.clone()));
        assert_eq!(set.to_vec(), vec![a.clone(), b.clone(), c.clone()]);

        assert!(set.remove(&b));
        assert!(!set.remove(&b));
        assert_eq!(set.to_vec(), vec![a, c]);
    }

    #[test]
    fn test_kind_index_drops_empty_buckets() {
        let red = Tag::new::<Red>();
        let mut index = KindIndex::new();

        index.insert(red.kind(), red.clone());
        assert!(index.contains_kind(Kind::of::<Red>()));

        index.remove(red.kind(), &red);
        assert!(!index.contains_kind(Kind::of::<Red>()));
        assert_eq!(index.kind_count(), 0);
        assert!(index.get(Kind::of::<Red>()).is_empty());
    }

    #[test]
    fn test_roster_stays_consistent_across_reinsert() {
        let red = Tag::new::<Red>();
        let blue = Tag::new::<Blue>();
        let mut roster = Roster::new();

        roster.insert(red.clone());
        roster.insert(blue.clone());
        roster.remove(&red);
        roster.insert(red.clone());

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.all(), vec![blue.clone(), red.clone()]);
        assert_eq!(roster.with_kind(Kind::of::<Red>()), vec![red.clone()]);
        assert_eq!(roster.first_with_kind(Kind::of::<Blue>()), Some(blue));
    }

    #[test]
    fn test_snapshots_are_detached_from_the_roster() {
        let red = Tag::new::<Red>();
        let mut roster = Roster::new();
        roster.insert(red.clone());

        let snapshot = roster.all();
        roster.remove(&red);

        assert_eq!(snapshot.len(), 1);
        assert!(roster.is_empty());
    }
}
