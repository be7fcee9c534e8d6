//! # Pool Registry
//!
//! The registry owns every pool, routes spawn/despawn calls to the
//! right one by prototype identity or by name, and drives the passive
//! time-based work (deferred despawns, culling) from an externally
//! invoked [`tick`](Registry::tick).
//!
//! There is no global singleton: callers construct a registry, hand it
//! the host collaborator, and pass it by reference to whoever spawns.
//!
//! ```text
//! caller ──spawn("Coin")──> Registry ──resolve──> Pool ──issue──> Instance
//!    │                          │
//!    └──despawn(instance)──────>┴──route by instance name──> owning Pool
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{PoolConfig, PoolManifest};
use crate::error::PoolError;
use crate::host::Host;
use crate::ids::{Instance, InstanceId, Prototype, PrototypeId};
use crate::math::Placement;
use crate::pool::Pool;

/// What `spawn_from` does when handed a prototype no pool manages.
///
/// The legacy behavior (silently constructing an unpooled instance) is
/// deliberately opt-in here: bypassing pooling should be a visible
/// policy decision, not a default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Fail with [`PoolError::UnknownPrototype`].
    #[default]
    Deny,
    /// Construct a fresh, unpooled instance via the host and log a
    /// warning. Despawning it later destroys it (it was never pooled).
    ConstructUnpooled,
}

/// Cancellation handle for a deferred despawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DespawnHandle(u64);

/// What one [`Registry::tick`] accomplished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Deferred despawns that fired this tick.
    pub despawned: usize,
    /// Instances destroyed by cull passes this tick.
    pub culled: usize,
}

/// A despawn scheduled for a future tick.
struct ScheduledDespawn {
    handle: DespawnHandle,
    due: f64,
    instance: Instance,
}

/// Process-wide entry point for spawning and despawning pooled
/// instances.
///
/// Owns the host collaborator and zero or more pools, indexed both by
/// prototype identity and by prototype name (names are unique; despawn
/// routes by the instance's inherited name).
pub struct Registry<H: Host> {
    /// The scene/entity host that actually constructs and destroys.
    host: H,
    /// Pools keyed by prototype identity.
    pools: HashMap<PrototypeId, Pool>,
    /// Prototype name -> prototype identity (unique).
    names: HashMap<String, PrototypeId>,
    /// Policy for spawns of unmanaged prototypes.
    fallback: FallbackPolicy,
    /// Administrative parent for pooled (inactive) instances.
    root: Option<InstanceId>,
    /// Simulation time, advanced only by `tick`.
    now: f64,
    /// Deferred despawns not yet due.
    pending: Vec<ScheduledDespawn>,
    /// Source for despawn handles.
    next_handle: u64,
}

impl<H: Host> Registry<H> {
    /// Creates an empty registry around a host collaborator.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_fallback(host, FallbackPolicy::default())
    }

    /// Creates an empty registry with an explicit fallback policy for
    /// unmanaged prototypes.
    #[must_use]
    pub fn with_fallback(host: H, fallback: FallbackPolicy) -> Self {
        Self {
            host,
            pools: HashMap::new(),
            names: HashMap::new(),
            fallback,
            root: None,
            now: 0.0,
            pending: Vec::new(),
            next_handle: 0,
        }
    }

    /// Sets the administrative parent pooled instances are attached to
    /// while inactive. Applies to every current and future pool.
    pub fn set_root(&mut self, root: Option<InstanceId>) {
        self.root = root;
        for pool in self.pools.values_mut() {
            pool.set_root(root);
        }
    }

    /// Registers a pool for a prototype and preallocates it.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidConfig`] if the policy fails validation
    /// - [`PoolError::DuplicateName`] if a different prototype already
    ///   uses this name
    /// - [`PoolError::DuplicatePrototype`] if this prototype already
    ///   has a pool
    /// - [`PoolError::Host`] if preallocation fails; the registry is
    ///   left unchanged
    pub fn register(&mut self, prototype: Prototype, config: PoolConfig) -> Result<(), PoolError> {
        config.validate()?;

        if let Some(&existing) = self.names.get(&prototype.name) {
            if existing == prototype.id {
                return Err(PoolError::DuplicatePrototype {
                    name: prototype.name,
                });
            }
            return Err(PoolError::DuplicateName {
                name: prototype.name,
            });
        }
        if self.pools.contains_key(&prototype.id) {
            return Err(PoolError::DuplicatePrototype {
                name: prototype.name,
            });
        }

        let name = prototype.name.clone();
        let id = prototype.id;
        let mut pool = Pool::new(prototype, config);
        pool.set_root(self.root);
        pool.initialize(&mut self.host)?;

        tracing::info!(pool = %name, preallocated = pool.available_count(), "pool registered");
        self.pools.insert(id, pool);
        self.names.insert(name, id);
        Ok(())
    }

    /// Registers every pool in a manifest, resolving prototype names to
    /// identities through `resolve`. Returns the number registered.
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownPrototype`] when a manifest name does not
    /// resolve, plus everything [`register`](Registry::register) can
    /// return. Pools registered before the failure stay registered.
    pub fn register_manifest<F>(
        &mut self,
        manifest: &PoolManifest,
        mut resolve: F,
    ) -> Result<usize, PoolError>
    where
        F: FnMut(&str) -> Option<PrototypeId>,
    {
        let mut registered = 0;
        for (name, config) in &manifest.pools {
            let Some(id) = resolve(name) else {
                return Err(PoolError::UnknownPrototype { name: name.clone() });
            };
            self.register(Prototype::new(id, name.clone()), config.clone())?;
            registered += 1;
        }
        Ok(registered)
    }

    /// Spawns an instance by prototype identity and places it.
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownPrototype`] when no pool manages the
    /// identity; otherwise whatever the pool's spawn returns.
    pub fn spawn(
        &mut self,
        prototype: PrototypeId,
        placement: Placement,
    ) -> Result<Instance, PoolError> {
        let Some(pool) = self.pools.get_mut(&prototype) else {
            return Err(PoolError::UnknownPrototype {
                name: prototype.to_string(),
            });
        };
        let instance = pool.spawn(&mut self.host)?;
        self.place(&instance, placement);
        Ok(instance)
    }

    /// Spawns an instance by prototype name and places it.
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownPrototype`] when the name is unmanaged (a
    /// name alone offers nothing to fall back on); otherwise whatever
    /// the pool's spawn returns.
    pub fn spawn_named(&mut self, name: &str, placement: Placement) -> Result<Instance, PoolError> {
        let Some(&id) = self.names.get(name) else {
            return Err(PoolError::UnknownPrototype {
                name: name.to_string(),
            });
        };
        self.spawn(id, placement)
    }

    /// Spawns from a full prototype value, honoring the fallback policy
    /// when the prototype is unmanaged.
    ///
    /// # Errors
    ///
    /// With [`FallbackPolicy::Deny`], unmanaged prototypes fail with
    /// [`PoolError::UnknownPrototype`]. With
    /// [`FallbackPolicy::ConstructUnpooled`], construction errors from
    /// the host surface as [`PoolError::Host`].
    pub fn spawn_from(
        &mut self,
        prototype: &Prototype,
        placement: Placement,
    ) -> Result<Instance, PoolError> {
        if self.pools.contains_key(&prototype.id) {
            return self.spawn(prototype.id, placement);
        }

        match self.fallback {
            FallbackPolicy::Deny => Err(PoolError::UnknownPrototype {
                name: prototype.name.clone(),
            }),
            FallbackPolicy::ConstructUnpooled => {
                tracing::warn!(
                    name = %prototype.name,
                    "no pool for prototype, constructing unpooled instance"
                );
                let id = self.host.construct(prototype)?;
                let instance =
                    Instance::new(id, prototype.id, Arc::from(prototype.name.as_str()));
                self.place(&instance, placement);
                Ok(instance)
            }
        }
    }

    /// World-space finalization after issuance: detach from the pool
    /// root, position, activate.
    fn place(&mut self, instance: &Instance, placement: Placement) {
        self.host.set_parent(instance, None);
        self.host
            .set_transform(instance, placement.position, placement.rotation);
        self.host.set_active(instance, true);
    }

    /// Returns an instance to its owning pool, resolved by name.
    ///
    /// Fail-soft for instances that were never pool-managed: they are
    /// destroyed via the host instead of failing the caller.
    ///
    /// # Errors
    ///
    /// [`PoolError::DoubleDespawn`] when the owning pool did not issue
    /// this instance (or it was already returned);
    /// [`PoolError::Host`] when destroying an unmanaged instance fails.
    pub fn despawn(&mut self, instance: Instance) -> Result<(), PoolError> {
        let Some(&id) = self.names.get(instance.name()) else {
            tracing::debug!(
                name = instance.name(),
                "despawn of unmanaged instance, destroying"
            );
            self.host.destroy(&instance)?;
            return Ok(());
        };
        let Some(pool) = self.pools.get_mut(&id) else {
            return Err(PoolError::UnknownPrototype {
                name: instance.name().to_string(),
            });
        };

        let handle = instance.clone();
        pool.despawn(&mut self.host, instance)?;
        self.host.set_parent(&handle, self.root);
        Ok(())
    }

    /// Schedules a despawn for `delay_seconds` of simulation time from
    /// now. Fires during a future [`tick`](Registry::tick); if the
    /// instance is returned manually first, the deferred despawn is a
    /// silent no-op.
    ///
    /// The returned handle cancels the pending despawn via
    /// [`cancel_despawn`](Registry::cancel_despawn).
    pub fn despawn_after(&mut self, instance: Instance, delay_seconds: f64) -> DespawnHandle {
        let handle = DespawnHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(ScheduledDespawn {
            handle,
            due: self.now + delay_seconds.max(0.0),
            instance,
        });
        handle
    }

    /// Cancels a pending deferred despawn. Returns `false` when it has
    /// already fired or been cancelled.
    pub fn cancel_despawn(&mut self, handle: DespawnHandle) -> bool {
        match self.pending.iter().position(|s| s.handle == handle) {
            Some(index) => {
                self.pending.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Advances simulation time, fires due deferred despawns, then runs
    /// a cull pass over every pool (each gated by its own interval).
    ///
    /// The host's scheduler is expected to call this at its own
    /// cadence; the registry never reads a real clock.
    ///
    /// # Errors
    ///
    /// Host failures from despawning or culling surface to the driver;
    /// the registry stays consistent and the next tick picks up where
    /// this one stopped.
    pub fn tick(&mut self, now: f64) -> Result<TickReport, PoolError> {
        self.now = now;
        let mut report = TickReport::default();

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }

        let mut due = due.into_iter();
        while let Some(scheduled) = due.next() {
            match self.despawn(scheduled.instance) {
                Ok(()) => report.despawned += 1,
                Err(PoolError::DoubleDespawn { name, instance }) => {
                    // Returned manually before the timer elapsed.
                    tracing::debug!(%name, %instance, "deferred despawn was a no-op");
                }
                Err(err) => {
                    // Unfired entries stay scheduled for the next tick.
                    self.pending.extend(due);
                    return Err(err);
                }
            }
        }

        report.culled = self.cull_all(now)?;
        Ok(report)
    }

    /// Runs one cull pass over every pool.
    ///
    /// # Errors
    ///
    /// The first failing `destroy` aborts that pool's pass and
    /// surfaces; it is not retried within the pass.
    pub fn cull_all(&mut self, now: f64) -> Result<usize, PoolError> {
        let mut culled = 0;
        for pool in self.pools.values_mut() {
            culled += pool.cull_excess(&mut self.host, now)?;
        }
        Ok(culled)
    }

    /// Explicit end of life: destroys every available instance, clears
    /// all pools and pending despawns.
    ///
    /// Outstanding instances belong to their holders and are not
    /// destroyed.
    ///
    /// # Errors
    ///
    /// [`PoolError::Host`] when a destroy fails; already-drained pools
    /// stay drained.
    pub fn shutdown(&mut self) -> Result<(), PoolError> {
        self.pending.clear();
        for pool in self.pools.values_mut() {
            pool.drain(&mut self.host)?;
        }
        self.pools.clear();
        self.names.clear();
        tracing::info!("registry shut down");
        Ok(())
    }

    /// The pool managing a prototype identity, if any.
    #[must_use]
    pub fn pool(&self, prototype: PrototypeId) -> Option<&Pool> {
        self.pools.get(&prototype)
    }

    /// The pool managing a prototype name, if any.
    #[must_use]
    pub fn pool_named(&self, name: &str) -> Option<&Pool> {
        self.names.get(name).and_then(|id| self.pools.get(id))
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether no pools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Current simulation time (last value passed to `tick`).
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Shared access to the host collaborator.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Exclusive access to the host collaborator.
    ///
    /// Never mutate pool-owned instances through this during a spawn or
    /// despawn; it exists for host-side bookkeeping between operations.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CullPolicy;
    use crate::math::{Quat, Vec3};
    use crate::test_support::StubHost;

    const COIN: PrototypeId = PrototypeId::new(1);
    const ENEMY: PrototypeId = PrototypeId::new(2);

    fn registry_with_coin_and_enemy() -> Registry<StubHost> {
        let mut registry = Registry::new(StubHost::default());
        registry
            .register(
                Prototype::new(COIN, "Coin"),
                PoolConfig {
                    preallocate: 2,
                    ..PoolConfig::default()
                },
            )
            .unwrap();
        registry
            .register(
                Prototype::new(ENEMY, "Enemy"),
                PoolConfig {
                    preallocate: 1,
                    ..PoolConfig::default()
                },
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_register_preallocates_inactive_under_root() {
        let mut registry = Registry::new(StubHost::default());
        registry.set_root(Some(InstanceId::new(777)));
        registry
            .register(
                Prototype::new(COIN, "Coin"),
                PoolConfig {
                    preallocate: 3,
                    ..PoolConfig::default()
                },
            )
            .unwrap();

        let host = registry.host();
        assert_eq!(host.constructed, 3);
        assert!(host.active.values().all(|&a| !a));
        assert!(host
            .parents
            .values()
            .all(|&p| p == Some(InstanceId::new(777))));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = registry_with_coin_and_enemy();
        let err = registry
            .register(Prototype::new(PrototypeId::new(99), "Coin"), PoolConfig::default())
            .unwrap_err();
        assert!(matches!(err, PoolError::DuplicateName { name } if name == "Coin"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_prototype_rejected() {
        let mut registry = registry_with_coin_and_enemy();
        let err = registry
            .register(Prototype::new(COIN, "Coin"), PoolConfig::default())
            .unwrap_err();
        assert!(matches!(err, PoolError::DuplicatePrototype { .. }));
    }

    #[test]
    fn test_spawn_applies_placement_and_activates() {
        let mut registry = registry_with_coin_and_enemy();
        let placement = Placement::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);

        let instance = registry.spawn(COIN, placement).unwrap();

        let host = registry.host();
        assert!(host.active[&instance.id]);
        assert_eq!(host.parents[&instance.id], None);
        assert_eq!(
            host.transforms[&instance.id],
            (Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY)
        );
    }

    #[test]
    fn test_spawn_named_routes_and_missing_fails() {
        let mut registry = registry_with_coin_and_enemy();

        let coin = registry.spawn_named("Coin", Placement::ORIGIN).unwrap();
        assert_eq!(coin.prototype, COIN);
        assert_eq!(coin.name(), "Coin");

        let err = registry
            .spawn_named("Missing", Placement::ORIGIN)
            .unwrap_err();
        assert!(matches!(err, PoolError::UnknownPrototype { name } if name == "Missing"));
    }

    #[test]
    fn test_despawn_routes_by_name() {
        let mut registry = registry_with_coin_and_enemy();
        let coin = registry.spawn_named("Coin", Placement::ORIGIN).unwrap();

        registry.despawn(coin).unwrap();

        let pool = registry.pool_named("Coin").unwrap();
        assert_eq!(pool.outstanding_count(), 0);
        assert_eq!(pool.available_count(), 2);
        // The enemy pool was untouched.
        assert_eq!(registry.pool(ENEMY).unwrap().available_count(), 1);
    }

    #[test]
    fn test_despawn_reparents_under_root() {
        let mut registry = registry_with_coin_and_enemy();
        registry.set_root(Some(InstanceId::new(777)));

        let coin = registry.spawn_named("Coin", Placement::ORIGIN).unwrap();
        let id = coin.id;
        registry.despawn(coin).unwrap();

        let host = registry.host();
        assert_eq!(host.parents[&id], Some(InstanceId::new(777)));
        assert!(!host.active[&id]);
    }

    #[test]
    fn test_despawn_unmanaged_destroys() {
        let mut registry =
            Registry::with_fallback(StubHost::default(), FallbackPolicy::ConstructUnpooled);
        let stray = registry
            .spawn_from(
                &Prototype::new(PrototypeId::new(50), "Stray"),
                Placement::ORIGIN,
            )
            .unwrap();
        let id = stray.id;

        registry.despawn(stray).unwrap();
        assert_eq!(registry.host().destroyed, vec![id]);
    }

    #[test]
    fn test_fallback_deny_fails() {
        let mut registry = registry_with_coin_and_enemy();
        let err = registry
            .spawn_from(
                &Prototype::new(PrototypeId::new(50), "Stray"),
                Placement::ORIGIN,
            )
            .unwrap_err();
        assert!(matches!(err, PoolError::UnknownPrototype { name } if name == "Stray"));
    }

    #[test]
    fn test_fallback_construct_unpooled_bypasses_pooling() {
        let mut registry =
            Registry::with_fallback(StubHost::default(), FallbackPolicy::ConstructUnpooled);
        let stray = registry
            .spawn_from(
                &Prototype::new(PrototypeId::new(50), "Stray"),
                Placement::ORIGIN,
            )
            .unwrap();

        assert_eq!(stray.name(), "Stray");
        assert!(registry.host().active[&stray.id]);
        assert!(registry.pool_named("Stray").is_none());
    }

    #[test]
    fn test_spawn_from_managed_prototype_uses_pool() {
        let mut registry = registry_with_coin_and_enemy();
        let before = registry.host().constructed;

        let coin = registry
            .spawn_from(&Prototype::new(COIN, "Coin"), Placement::ORIGIN)
            .unwrap();
        assert_eq!(coin.prototype, COIN);
        // Served from preallocation, nothing constructed.
        assert_eq!(registry.host().constructed, before);
    }

    #[test]
    fn test_deferred_despawn_fires_on_tick() {
        let mut registry = registry_with_coin_and_enemy();
        registry.tick(10.0).unwrap();

        let coin = registry.spawn_named("Coin", Placement::ORIGIN).unwrap();
        let _handle = registry.despawn_after(coin, 2.5);

        let report = registry.tick(12.0).unwrap();
        assert_eq!(report.despawned, 0);
        assert_eq!(registry.pool(COIN).unwrap().outstanding_count(), 1);

        let report = registry.tick(12.5).unwrap();
        assert_eq!(report.despawned, 1);
        assert_eq!(registry.pool(COIN).unwrap().outstanding_count(), 0);
    }

    #[test]
    fn test_deferred_despawn_cancellable() {
        let mut registry = registry_with_coin_and_enemy();
        let coin = registry.spawn_named("Coin", Placement::ORIGIN).unwrap();
        let handle = registry.despawn_after(coin, 1.0);

        assert!(registry.cancel_despawn(handle));
        assert!(!registry.cancel_despawn(handle));

        let report = registry.tick(5.0).unwrap();
        assert_eq!(report.despawned, 0);
        assert_eq!(registry.pool(COIN).unwrap().outstanding_count(), 1);
    }

    #[test]
    fn test_deferred_despawn_idempotent_after_manual_despawn() {
        let mut registry = registry_with_coin_and_enemy();
        let coin = registry.spawn_named("Coin", Placement::ORIGIN).unwrap();
        let _handle = registry.despawn_after(coin.clone(), 1.0);

        registry.despawn(coin).unwrap();
        let pool = registry.pool(COIN).unwrap();
        let (avail, outstanding) = (pool.available_count(), pool.outstanding_count());

        // The timer firing later must not corrupt the counts.
        let report = registry.tick(5.0).unwrap();
        assert_eq!(report.despawned, 0);
        let pool = registry.pool(COIN).unwrap();
        assert_eq!(pool.available_count(), avail);
        assert_eq!(pool.outstanding_count(), outstanding);
    }

    #[test]
    fn test_tick_requeues_unfired_despawns_after_host_failure() {
        let mut registry =
            Registry::with_fallback(StubHost::default(), FallbackPolicy::ConstructUnpooled);
        let first = registry
            .spawn_from(
                &Prototype::new(PrototypeId::new(50), "Stray"),
                Placement::ORIGIN,
            )
            .unwrap();
        let second = registry
            .spawn_from(
                &Prototype::new(PrototypeId::new(51), "Drifter"),
                Placement::ORIGIN,
            )
            .unwrap();
        let second_id = second.id;

        registry.despawn_after(first, 1.0);
        registry.despawn_after(second, 1.0);

        registry.host_mut().fail_destroy_after = Some(0);
        let err = registry.tick(2.0).unwrap_err();
        assert!(matches!(err, PoolError::Host(_)));

        // The failure must not drop the despawn still in the queue.
        registry.host_mut().fail_destroy_after = None;
        let report = registry.tick(3.0).unwrap();
        assert_eq!(report.despawned, 1);
        assert_eq!(registry.host().destroyed, vec![second_id]);
    }

    #[test]
    fn test_tick_culls_all_pools() {
        let mut registry = Registry::new(StubHost::default());
        for (id, name) in [(COIN, "Coin"), (ENEMY, "Enemy")] {
            registry
                .register(
                    Prototype::new(id, name),
                    PoolConfig {
                        preallocate: 6,
                        cull: Some(CullPolicy {
                            maintained: 2,
                            interval_seconds: 1.0,
                        }),
                        ..PoolConfig::default()
                    },
                )
                .unwrap();
        }

        let report = registry.tick(1.0).unwrap();
        assert_eq!(report.culled, 8);
        assert_eq!(registry.pool(COIN).unwrap().available_count(), 2);
        assert_eq!(registry.pool(ENEMY).unwrap().available_count(), 2);
    }

    #[test]
    fn test_shutdown_drains_everything() {
        let mut registry = registry_with_coin_and_enemy();
        let held = registry.spawn_named("Coin", Placement::ORIGIN).unwrap();

        registry.shutdown().unwrap();

        assert!(registry.is_empty());
        // The remaining coin and the enemy destroyed; the held coin not.
        assert_eq!(registry.host().destroyed.len(), 2);
        assert!(!registry.host().destroyed.contains(&held.id));
    }

    #[test]
    fn test_failed_registration_leaves_registry_unchanged() {
        let mut registry = Registry::new(StubHost::default());
        registry.host_mut().fail_construct = true;

        let err = registry
            .register(
                Prototype::new(COIN, "Coin"),
                PoolConfig {
                    preallocate: 2,
                    ..PoolConfig::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, PoolError::Host(_)));
        assert!(registry.is_empty());
        assert!(registry.pool_named("Coin").is_none());
    }

    #[test]
    fn test_register_manifest() {
        let manifest = PoolManifest::from_toml_str(
            r"
            [pools.Coin]
            preallocate = 2

            [pools.Enemy]
            preallocate = 1
            hard_limit = 4
            ",
        )
        .unwrap();

        let mut registry = Registry::new(StubHost::default());
        let registered = registry
            .register_manifest(&manifest, |name| match name {
                "Coin" => Some(COIN),
                "Enemy" => Some(ENEMY),
                _ => None,
            })
            .unwrap();

        assert_eq!(registered, 2);
        assert_eq!(registry.pool_named("Coin").unwrap().available_count(), 2);
        assert_eq!(
            registry.pool_named("Enemy").unwrap().config().hard_limit,
            Some(4)
        );
    }

    #[test]
    fn test_register_manifest_unresolved_name_fails() {
        let manifest = PoolManifest::from_toml_str(
            r"
            [pools.Ghost]
            ",
        )
        .unwrap();

        let mut registry = Registry::new(StubHost::default());
        let err = registry.register_manifest(&manifest, |_| None).unwrap_err();
        assert!(matches!(err, PoolError::UnknownPrototype { name } if name == "Ghost"));
    }
}
