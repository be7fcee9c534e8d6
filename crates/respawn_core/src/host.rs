//! # Host Collaborator Contract
//!
//! The pooling engine never creates, destroys, or moves objects itself.
//! All of that is delegated to the host (the scene-graph / entity system
//! that actually owns instances), through this trait.
//!
//! Time is injected the same way: the engine has no clock of its own and
//! only learns the current time through [`Registry::tick`].
//!
//! [`Registry::tick`]: crate::registry::Registry::tick

use crate::error::HostError;
use crate::ids::{Instance, InstanceId, Prototype};
use crate::math::{Quat, Vec3};

/// Operations the pooling engine requires from its host.
///
/// # Contract
///
/// - [`construct`](Host::construct) returns instances in the inactive
///   presentation state.
/// - [`destroy`](Host::destroy) is only ever called on instances the
///   engine currently owns (available instances during culling and
///   shutdown, or never-pooled instances on fail-soft despawn).
/// - The presentation methods are infallible from the engine's point of
///   view; a host that can fail them should absorb or log the failure.
pub trait Host {
    /// Creates a new instance from a prototype, inactive by default.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the host cannot construct the
    /// instance (resource exhaustion, destroyed prototype, ...).
    fn construct(&mut self, prototype: &Prototype) -> Result<InstanceId, HostError>;

    /// Releases an instance permanently.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the instance cannot be destroyed.
    /// The engine does not retry; the error surfaces to the caller of
    /// the operation that triggered the destruction.
    fn destroy(&mut self, instance: &Instance) -> Result<(), HostError>;

    /// Shows or hides an instance.
    fn set_active(&mut self, instance: &Instance, active: bool);

    /// Positions an instance in world space.
    fn set_transform(&mut self, instance: &Instance, position: Vec3, rotation: Quat);

    /// Reparents an instance administratively (`None` detaches it into
    /// the world).
    fn set_parent(&mut self, instance: &Instance, parent: Option<InstanceId>);
}
