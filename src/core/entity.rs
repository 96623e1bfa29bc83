//! Typed entity ids
//!
//! Cards and battlefield instances get plain integer ids. The phantom type
//! parameter keeps a `CardId` from being mixed up with an `InstanceId`, while
//! the wire form stays a bare `u32`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Integer id tagged with the entity type it names
pub struct EntityId<T> {
    id: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    pub const fn new(id: u32) -> Self {
        EntityId {
            id,
            _marker: PhantomData,
        }
    }

    pub fn as_u32(&self) -> u32 {
        self.id
    }
}

// Manual impls: derives would demand the same traits of `T`.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> PartialOrd for EntityId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EntityId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.id)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(EntityId::new)
    }
}

/// Hands out contiguous ids, shared across entity types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start allocating at `first` (used when resuming from existing ids)
    pub fn starting_at(first: u32) -> Self {
        IdAllocator { next: first }
    }

    pub fn next_id<T>(&mut self) -> EntityId<T> {
        let id = EntityId::new(self.next);
        self.next += 1;
        id
    }

    pub fn peek(&self) -> u32 {
        self.next
    }
}
