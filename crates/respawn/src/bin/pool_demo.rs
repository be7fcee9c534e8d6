//! # Pool Demo
//!
//! End-to-end scenario on the simulated host:
//!
//! Burst of spark effects → pool grows → deferred despawns return them
//! → cull passes shrink the pool back to its maintained baseline.
//!
//! Run with: `cargo run --bin pool_demo`

use respawn::{LoopDriver, SimulatedHost};
use respawn_core::{
    Placement, PoolEvent, PoolManifest, PrototypeId, Registry, Vec3,
};

/// Frames to simulate (at 30 fps of synthetic time).
const FRAMES: u64 = 300;

/// Synthetic seconds per frame.
const TIMESTEP: f64 = 1.0 / 30.0;

const SPARK: PrototypeId = PrototypeId::new(1);
const COIN: PrototypeId = PrototypeId::new(2);

const MANIFEST: &str = r#"
[pools.Spark]
preallocate = 8
grow_by = 4
hard_limit = 64
cull = { maintained = 8, interval_seconds = 2.0 }

[pools.Coin]
preallocate = 16
grow_by = 8
"#;

fn main() {
    println!("=== RESPAWN pool demo ===\n");

    let manifest = PoolManifest::from_toml_str(MANIFEST).expect("manifest parses");
    let mut registry = Registry::new(SimulatedHost::new());
    let registered = registry
        .register_manifest(&manifest, |name| match name {
            "Spark" => Some(SPARK),
            "Coin" => Some(COIN),
            _ => None,
        })
        .expect("manifest registers");
    println!(
        "registered {registered} pools, {} objects preallocated",
        registry.host().live_count()
    );

    let spark_events = registry.pool(SPARK).expect("spark pool").subscribe();

    let mut driver = LoopDriver::new(registry, TIMESTEP);
    let report = driver
        .run(FRAMES, |frame, registry| {
            // Burst phase: every frame of the first two seconds fires a
            // fan of sparks that burn out half a second later.
            if frame <= 60 {
                for i in 0..3 {
                    #[allow(clippy::cast_precision_loss)]
                    let at = Vec3::new(frame as f32, 0.0, i as f32);
                    let spark = registry.spawn(SPARK, Placement::at(at))?;
                    let _ = registry.despawn_after(spark, 0.5);
                }
            }
            // Coins trickle out and come back on alternating frames.
            if frame % 2 == 0 {
                let coin = registry.spawn(COIN, Placement::ORIGIN)?;
                let _ = registry.despawn_after(coin, 1.0);
            }
            Ok(())
        })
        .expect("demo run");

    println!("\n--- after {} frames ({:.1}s synthetic) ---", report.frames, driver.now());
    println!("deferred despawns fired: {}", report.despawned);
    println!("instances culled:        {}", report.culled);

    let handle = driver.registry();
    let registry = handle.lock();

    let mut spawned_events = 0u64;
    let mut despawned_events = 0u64;
    for event in spark_events.drain() {
        match event {
            PoolEvent::Spawned(_) => spawned_events += 1,
            PoolEvent::Despawned(_) => despawned_events += 1,
        }
    }
    println!("spark events observed:   {spawned_events} spawned / {despawned_events} despawned");

    for name in ["Spark", "Coin"] {
        let pool = registry.pool_named(name).expect("pool exists");
        let stats = pool.stats();
        println!(
            "pool {:<6} available={:<3} outstanding={:<3} created={:<4} destroyed={:<4} spawns={}",
            name,
            pool.available_count(),
            pool.outstanding_count(),
            stats.total_created,
            stats.total_destroyed,
            stats.total_spawned,
        );
        // The books must balance.
        assert_eq!(
            (pool.available_count() + pool.outstanding_count()) as u64,
            stats.total_created - stats.total_destroyed,
        );
    }

    println!(
        "scene: {} live objects, {} constructed, {} destroyed",
        registry.host().live_count(),
        registry.host().constructed(),
        registry.host().destroyed(),
    );

    drop(registry);
    handle.lock().shutdown().expect("shutdown");
    println!("\nshutdown complete, {} objects left in scene", handle.lock().host().live_count());
}
