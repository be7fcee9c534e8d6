//! # RESPAWN Integration
//!
//! Wires the pooling engine ([`respawn_core`]) to a host:
//!
//! - [`SimulatedHost`]: an in-memory scene standing in for the real
//!   entity system, used by the verification tests and the demo
//! - [`LoopDriver`]: a fixed-step scheduler feeding synthetic time into
//!   [`Registry::tick`](respawn_core::Registry::tick)
//!
//! The `pool_demo` binary runs an end-to-end spawn/despawn/cull
//! scenario on top of both.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod driver;
pub mod sim;

pub use driver::{DriverReport, LoopDriver};
pub use sim::{SceneObject, SimulatedHost};
