//! # Prototype & Instance Identity
//!
//! Pooled objects are identified at two levels:
//! - A [`PrototypeId`] names the template a pool constructs from
//! - An [`InstanceId`] names one concrete host-side object
//!
//! Both are lightweight `u64` newtypes so they can be copied freely
//! through the hot path without touching the heap.

use std::fmt;
use std::sync::Arc;

/// Unique identity of a prototype (the template instances are built from).
///
/// The value is assigned by the host application; the pooling engine only
/// requires it to be stable and unique for the lifetime of the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PrototypeId(u64);

impl PrototypeId {
    /// Creates a prototype ID from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PrototypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proto:{}", self.0)
    }
}

/// Unique identity of one concrete instance, assigned by the host when
/// the instance is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Creates an instance ID from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Null/invalid instance ID.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this instance ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inst:{}", self.0)
    }
}

/// A template from which pooled instances are constructed.
///
/// Prototype names must be unique across a registry because despawn
/// routes an instance back to its pool by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prototype {
    /// Stable identity of this prototype.
    pub id: PrototypeId,
    /// Display/lookup name, inherited by every instance built from it.
    pub name: String,
}

impl Prototype {
    /// Creates a new prototype.
    #[must_use]
    pub fn new(id: PrototypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Handle to one concrete reusable instance.
///
/// An instance is exclusively owned by exactly one container at a time:
/// either its pool's available stack, or the caller that spawned it.
/// The handle itself is a cheap clone (the name is shared via [`Arc`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instance {
    /// Host-assigned identity of this instance.
    pub id: InstanceId,
    /// The prototype this instance was constructed from.
    pub prototype: PrototypeId,
    /// Name inherited from the prototype; used to route despawns.
    name: Arc<str>,
}

impl Instance {
    /// Creates a new instance handle.
    pub(crate) fn new(id: InstanceId, prototype: PrototypeId, name: Arc<str>) -> Self {
        Self {
            id,
            prototype,
            name,
        }
    }

    /// Returns the instance's name (inherited from its prototype).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
