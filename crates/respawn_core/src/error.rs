//! # Pooling Error Types
//!
//! All errors that can surface from pool and registry operations.
//! None of them are fatal: a failed spawn or despawn leaves the registry
//! and every other pool in a consistent state.

use thiserror::Error;

use crate::ids::InstanceId;

/// Error raised by the host collaborator when constructing or destroying
/// an instance fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("host operation failed: {message}")]
pub struct HostError {
    /// Human-readable failure description from the host.
    pub message: String,
}

impl HostError {
    /// Creates a host error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur in the pooling engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    /// Hard limit reached and no instance is available.
    ///
    /// Recoverable: the caller decides whether to wait, skip, or degrade.
    #[error("pool '{name}' exhausted: hard limit {limit} reached")]
    PoolExhausted {
        /// Name of the exhausted pool.
        name: String,
        /// The configured hard limit.
        limit: usize,
    },

    /// Spawn or despawn referenced a prototype no pool manages.
    #[error("no pool registered for prototype '{name}'")]
    UnknownPrototype {
        /// The unresolved prototype name.
        name: String,
    },

    /// Two different prototypes were registered under the same name.
    ///
    /// Configuration error: registration is aborted, the registry is
    /// unchanged.
    #[error("a pool named '{name}' is already registered")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// The same prototype identity was registered twice.
    #[error("prototype '{name}' already has a pool")]
    DuplicatePrototype {
        /// Name of the already-pooled prototype.
        name: String,
    },

    /// An instance was returned twice without an intervening spawn, or a
    /// foreign instance was handed to a pool that never issued it.
    ///
    /// Accepting it would corrupt the outstanding count and allow the
    /// same instance to be issued to two callers at once.
    #[error("instance {instance} of '{name}' is not outstanding (double despawn?)")]
    DoubleDespawn {
        /// Name of the pool that rejected the return.
        name: String,
        /// The offending instance.
        instance: InstanceId,
    },

    /// A pool policy failed validation at registration/load time.
    #[error("invalid pool configuration: {0}")]
    InvalidConfig(String),

    /// The host collaborator failed an operation.
    #[error(transparent)]
    Host(#[from] HostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PoolError::PoolExhausted {
            name: "Coin".to_string(),
            limit: 3,
        };
        assert_eq!(format!("{err}"), "pool 'Coin' exhausted: hard limit 3 reached");

        let err = PoolError::from(HostError::new("out of handles"));
        assert_eq!(format!("{err}"), "host operation failed: out of handles");
    }
}
