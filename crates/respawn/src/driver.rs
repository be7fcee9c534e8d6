//! # Fixed-Step Loop Driver
//!
//! The pooling engine is passive: deferred despawns and culling only
//! happen when someone calls [`Registry::tick`] with the current time.
//! This driver plays the role of the host scheduler - it advances a
//! synthetic clock by a fixed timestep and ticks the registry once per
//! frame.
//!
//! The registry sits behind a [`parking_lot::Mutex`] so gameplay code
//! (the per-frame callback) and the driver share it without the
//! engine itself needing to be thread-aware.

use std::sync::Arc;

use parking_lot::Mutex;
use respawn_core::{Host, PoolError, Registry, TickReport};

/// Totals accumulated over a driven run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverReport {
    /// Frames executed.
    pub frames: u64,
    /// Deferred despawns fired across all ticks.
    pub despawned: usize,
    /// Instances culled across all ticks.
    pub culled: usize,
}

/// Fixed-timestep driver around a shared registry.
pub struct LoopDriver<H: Host> {
    registry: Arc<Mutex<Registry<H>>>,
    timestep: f64,
    now: f64,
    frame: u64,
}

impl<H: Host> LoopDriver<H> {
    /// Wraps a registry in a driver with the given timestep (seconds
    /// per frame).
    #[must_use]
    pub fn new(registry: Registry<H>, timestep: f64) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            timestep,
            now: 0.0,
            frame: 0,
        }
    }

    /// A shared handle to the registry, for spawner code running
    /// outside the frame callback.
    #[must_use]
    pub fn registry(&self) -> Arc<Mutex<Registry<H>>> {
        Arc::clone(&self.registry)
    }

    /// Advances one frame: bumps the clock and ticks the registry.
    ///
    /// # Errors
    ///
    /// Propagates whatever the tick surfaced; the clock stays advanced
    /// so the next step continues from the new time.
    pub fn step(&mut self) -> Result<TickReport, PoolError> {
        self.frame += 1;
        self.now += self.timestep;
        self.registry.lock().tick(self.now)
    }

    /// Runs `frames` frames, invoking `on_frame` with the frame number
    /// and the locked registry before each tick.
    ///
    /// # Errors
    ///
    /// Stops at the first error from the callback or a tick.
    pub fn run<F>(&mut self, frames: u64, mut on_frame: F) -> Result<DriverReport, PoolError>
    where
        F: FnMut(u64, &mut Registry<H>) -> Result<(), PoolError>,
    {
        let mut report = DriverReport::default();
        for _ in 0..frames {
            {
                let mut registry = self.registry.lock();
                on_frame(self.frame + 1, &mut registry)?;
            }
            let tick = self.step()?;
            report.frames += 1;
            report.despawned += tick.despawned;
            report.culled += tick.culled;
        }
        tracing::debug!(
            frames = report.frames,
            despawned = report.despawned,
            culled = report.culled,
            "driver run complete"
        );
        Ok(report)
    }

    /// Current synthetic time in seconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Frames executed so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds advanced per frame.
    #[must_use]
    pub fn timestep(&self) -> f64 {
        self.timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedHost;
    use respawn_core::{Placement, PoolConfig, Prototype, PrototypeId};

    #[test]
    fn test_step_advances_clock() {
        let registry = Registry::new(SimulatedHost::new());
        let mut driver = LoopDriver::new(registry, 0.5);

        driver.step().unwrap();
        driver.step().unwrap();
        assert_eq!(driver.frame(), 2);
        assert!((driver.now() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_run_fires_deferred_despawns() {
        let mut registry = Registry::new(SimulatedHost::new());
        registry
            .register(
                Prototype::new(PrototypeId::new(1), "Coin"),
                PoolConfig::default(),
            )
            .unwrap();
        let mut driver = LoopDriver::new(registry, 1.0);

        let handle = driver.registry();
        let coin = handle.lock().spawn_named("Coin", Placement::ORIGIN).unwrap();
        let _ = handle.lock().despawn_after(coin, 2.5);

        let report = driver.run(5, |_, _| Ok(())).unwrap();
        assert_eq!(report.frames, 5);
        assert_eq!(report.despawned, 1);
        assert_eq!(
            handle.lock().pool_named("Coin").unwrap().outstanding_count(),
            0
        );
    }
}
