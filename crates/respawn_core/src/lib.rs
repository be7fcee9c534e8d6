//! # RESPAWN Core
//!
//! Object-reuse engine for entities with expensive creation/destruction
//! cost in a real-time loop. Instead of constructing and destroying on
//! demand, a fixed set of pre-allocated instances cycles between an
//! available stack and the callers currently using them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  spawn/despawn  ┌──────────┐  issue/return  ┌────────┐
//! │  caller  │ ──────────────> │ Registry │ ─────────────> │  Pool  │
//! └──────────┘                 └────┬─────┘                └───┬────┘
//!                                   │ construct/destroy        │ events
//!                                   v                          v
//!                              ┌────────┐               ┌────────────┐
//!                              │  Host  │               │ subscribers│
//!                              └────────┘               └────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **No instance double-issued** - an instance is owned by exactly
//!    one container at a time
//! 2. **Bounded growth** - hard limits clamp growth and fail the spawn
//!    that would exceed them
//! 3. **Passive time** - the engine never reads a clock; the host
//!    drives [`Registry::tick`] with its own timestamps
//! 4. **External construction** - instances are created and destroyed
//!    only by the injected [`Host`] collaborator
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut registry = Registry::new(my_host);
//! registry.register(Prototype::new(COIN, "Coin"), PoolConfig::default())?;
//!
//! let coin = registry.spawn_named("Coin", Placement::at(position))?;
//! registry.despawn_after(coin, 3.0);
//!
//! // every frame:
//! registry.tick(now)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod ids;
pub mod math;
pub mod pool;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use config::{CullPolicy, PoolConfig, PoolManifest};
pub use error::{HostError, PoolError};
pub use events::{PoolEvent, PoolEventReceiver};
pub use host::Host;
pub use ids::{Instance, InstanceId, Prototype, PrototypeId};
pub use math::{Placement, Quat, Vec3};
pub use pool::{Pool, PoolStats, DEFAULT_EVENT_CAPACITY};
pub use registry::{DespawnHandle, FallbackPolicy, Registry, TickReport};
