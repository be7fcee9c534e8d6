//! # Instance Pool
//!
//! A pool owns the reusable instances of exactly one prototype and
//! cycles them between an available stack and the callers currently
//! holding them. The stack is LIFO so the most-recently-returned
//! instance is reissued first (cache locality, not correctness).
//!
//! Pools never touch world-space placement or activation-on-spawn; that
//! is the registry's concern. They do own the growth, hard-limit, and
//! culling policy.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::events::{PoolEvent, PoolEventBus, PoolEventReceiver};
use crate::host::Host;
use crate::ids::{Instance, InstanceId, Prototype};

/// Undelivered spawn/despawn events held per pool before dropping.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Cumulative per-pool counters.
///
/// The core count invariant:
/// `outstanding + available == total_created - total_destroyed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances ever constructed by this pool.
    pub total_created: u64,
    /// Instances ever destroyed (culling + shutdown).
    pub total_destroyed: u64,
    /// Successful spawns served.
    pub total_spawned: u64,
    /// Instances destroyed specifically by cull passes.
    pub total_culled: u64,
}

/// Reusable-instance pool for a single prototype.
pub struct Pool {
    /// The template this pool constructs from.
    prototype: Prototype,
    /// Shared copy of the prototype name, stamped onto every instance.
    name: Arc<str>,
    /// Growth/limit/culling policy.
    config: PoolConfig,
    /// Instances not currently in use (LIFO).
    available: Vec<Instance>,
    /// Identities of instances currently issued and not yet returned.
    outstanding: HashSet<InstanceId>,
    /// Monotonic time of the last cull pass, if any.
    last_cull: Option<f64>,
    /// Administrative parent for pooled instances.
    root: Option<InstanceId>,
    /// Cumulative counters.
    stats: PoolStats,
    /// Spawn/despawn notification channel.
    events: PoolEventBus,
}

impl Pool {
    /// Creates a pool for a prototype with the given policy.
    ///
    /// No instances exist until [`initialize`](Pool::initialize) runs;
    /// the registry calls it exactly once at registration.
    #[must_use]
    pub(crate) fn new(prototype: Prototype, config: PoolConfig) -> Self {
        let name: Arc<str> = Arc::from(prototype.name.as_str());
        let preallocate = config.preallocate;
        Self {
            prototype,
            name,
            config,
            available: Vec::with_capacity(preallocate),
            outstanding: HashSet::with_capacity(preallocate),
            last_cull: None,
            root: None,
            stats: PoolStats::default(),
            events: PoolEventBus::new(DEFAULT_EVENT_CAPACITY),
        }
    }

    /// Sets the administrative parent newly pooled instances are
    /// attached to.
    pub(crate) fn set_root(&mut self, root: Option<InstanceId>) {
        self.root = root;
    }

    /// Preallocates the configured number of instances (hard-limit
    /// clamped).
    pub(crate) fn initialize<H: Host>(&mut self, host: &mut H) -> Result<(), PoolError> {
        let created = self.grow(host, self.config.preallocate)?;
        tracing::debug!(pool = %self.name, created, "pool initialized");
        Ok(())
    }

    /// Constructs up to `requested` new instances and pushes them onto
    /// the available stack. Returns how many were actually created
    /// after hard-limit clamping; partial growth is a valid state.
    fn grow<H: Host>(&mut self, host: &mut H, requested: usize) -> Result<usize, PoolError> {
        let actual = match self.config.hard_limit {
            Some(limit) => {
                let live = self.available.len() + self.outstanding.len();
                requested.min(limit.saturating_sub(live))
            }
            None => requested,
        };

        for _ in 0..actual {
            let id = host.construct(&self.prototype)?;
            let instance = Instance::new(id, self.prototype.id, Arc::clone(&self.name));
            host.set_active(&instance, false);
            host.set_parent(&instance, self.root);
            self.stats.total_created += 1;
            self.available.push(instance);
        }

        Ok(actual)
    }

    /// Issues an instance, growing the pool if the available stack is
    /// empty.
    ///
    /// Emits [`PoolEvent::Spawned`] before returning. Activation and
    /// placement are the registry's job.
    pub(crate) fn spawn<H: Host>(&mut self, host: &mut H) -> Result<Instance, PoolError> {
        // Hard-limit check comes first: a saturated pool must not grow
        // and must not reissue an available instance beyond the limit.
        if let Some(limit) = self.config.hard_limit {
            if self.outstanding.len() >= limit {
                return Err(self.exhausted(limit));
            }
        }

        if self.available.is_empty() {
            let grown = self.grow(host, self.config.grow_by)?;
            if grown == 0 {
                let limit = self.config.hard_limit.unwrap_or(0);
                return Err(self.exhausted(limit));
            }
        }

        let Some(instance) = self.available.pop() else {
            let limit = self.config.hard_limit.unwrap_or(0);
            return Err(self.exhausted(limit));
        };

        self.outstanding.insert(instance.id);
        self.stats.total_spawned += 1;
        self.events.publish(PoolEvent::Spawned(instance.clone()));
        Ok(instance)
    }

    /// Returns an instance to the available stack.
    ///
    /// # Errors
    ///
    /// [`PoolError::DoubleDespawn`] when the instance is not currently
    /// outstanding — either it was already returned, or this pool never
    /// issued it. Accepting it would let the same instance be issued to
    /// two callers at once.
    pub(crate) fn despawn<H: Host>(
        &mut self,
        host: &mut H,
        instance: Instance,
    ) -> Result<(), PoolError> {
        if !self.outstanding.remove(&instance.id) {
            return Err(PoolError::DoubleDespawn {
                name: self.name.to_string(),
                instance: instance.id,
            });
        }

        host.set_active(&instance, false);
        self.events.publish(PoolEvent::Despawned(instance.clone()));
        self.available.push(instance);
        Ok(())
    }

    /// Destroys excess available instances down to the maintained
    /// baseline, at most once per configured interval.
    ///
    /// Outstanding instances are never touched. Returns the number of
    /// instances destroyed this pass.
    pub(crate) fn cull_excess<H: Host>(
        &mut self,
        host: &mut H,
        now: f64,
    ) -> Result<usize, PoolError> {
        let Some(policy) = self.config.cull else {
            return Ok(0);
        };
        if self.available.len() <= policy.maintained {
            return Ok(0);
        }
        if let Some(last) = self.last_cull {
            if now < last + policy.interval_seconds {
                return Ok(0);
            }
        }

        self.last_cull = Some(now);

        let mut culled = 0;
        while self.available.len() > policy.maintained {
            let Some(instance) = self.available.pop() else {
                break;
            };
            if let Err(err) = host.destroy(&instance) {
                // Not retried this pass; the instance stays available.
                self.available.push(instance);
                return Err(err.into());
            }
            self.stats.total_destroyed += 1;
            self.stats.total_culled += 1;
            culled += 1;
        }

        tracing::debug!(pool = %self.name, culled, "cull pass complete");
        Ok(culled)
    }

    /// Destroys every available instance and forgets outstanding
    /// bookkeeping. Shutdown path only.
    pub(crate) fn drain<H: Host>(&mut self, host: &mut H) -> Result<(), PoolError> {
        while let Some(instance) = self.available.pop() {
            if let Err(err) = host.destroy(&instance) {
                self.available.push(instance);
                return Err(err.into());
            }
            self.stats.total_destroyed += 1;
        }
        // Outstanding instances belong to their holders now.
        self.outstanding.clear();
        Ok(())
    }

    fn exhausted(&self, limit: usize) -> PoolError {
        PoolError::PoolExhausted {
            name: self.name.to_string(),
            limit,
        }
    }

    /// Subscribes to this pool's spawn/despawn notifications.
    #[must_use]
    pub fn subscribe(&self) -> PoolEventReceiver {
        self.events.subscribe()
    }

    /// The prototype this pool constructs from.
    #[inline]
    #[must_use]
    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    /// The pool's name (same as its prototype's name).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pool's policy.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Number of instances currently available for reuse.
    #[inline]
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Number of instances currently issued and not yet returned.
    #[inline]
    #[must_use]
    pub fn outstanding_count(&self) -> usize {
        self.outstanding.len()
    }

    /// Cumulative counters.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}
