//! # Pool Policy Configuration
//!
//! Pool policies are plain data: how many instances to preallocate, how
//! the pool grows when empty, whether a hard limit applies, and whether
//! excess instances are culled back down over time.
//!
//! Policies can be built in code or loaded once at startup from a TOML
//! manifest:
//!
//! ```toml
//! [pools.Coin]
//! preallocate = 16
//! grow_by = 8
//!
//! [pools.Enemy]
//! preallocate = 4
//! hard_limit = 32
//! cull = { maintained = 4, interval_seconds = 10.0 }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PoolError;

/// Periodic culling policy: excess available instances above
/// `maintained` are destroyed, no more often than once per interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CullPolicy {
    /// Number of available instances to keep after a cull pass.
    #[serde(default = "default_maintained")]
    pub maintained: usize,
    /// Minimum seconds between cull passes (hysteresis).
    #[serde(default = "default_cull_interval")]
    pub interval_seconds: f64,
}

impl Default for CullPolicy {
    fn default() -> Self {
        Self {
            maintained: default_maintained(),
            interval_seconds: default_cull_interval(),
        }
    }
}

const fn default_maintained() -> usize {
    5
}

const fn default_cull_interval() -> f64 {
    10.0
}

const fn default_preallocate() -> usize {
    5
}

const fn default_grow_by() -> usize {
    1
}

/// Growth, limit, and culling policy for one pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    /// Instances created when the pool is initialized.
    #[serde(default = "default_preallocate")]
    pub preallocate: usize,
    /// Instances created as a batch whenever the pool runs empty.
    /// Must be at least 1.
    #[serde(default = "default_grow_by")]
    pub grow_by: usize,
    /// Maximum instances (available + outstanding) this pool may ever
    /// hold. `None` means unlimited.
    #[serde(default)]
    pub hard_limit: Option<usize>,
    /// Periodic culling of excess available instances. `None` disables
    /// culling.
    #[serde(default)]
    pub cull: Option<CullPolicy>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            preallocate: default_preallocate(),
            grow_by: default_grow_by(),
            hard_limit: None,
            cull: None,
        }
    }
}

impl PoolConfig {
    /// Validates the policy.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] when `grow_by` is zero, the
    /// hard limit is zero, or the cull interval is negative or not a
    /// finite number.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.grow_by == 0 {
            return Err(PoolError::InvalidConfig(
                "grow_by must be at least 1".to_string(),
            ));
        }
        if self.hard_limit == Some(0) {
            return Err(PoolError::InvalidConfig(
                "hard_limit must be at least 1 (use None for unlimited)".to_string(),
            ));
        }
        if let Some(cull) = &self.cull {
            if !cull.interval_seconds.is_finite() || cull.interval_seconds < 0.0 {
                return Err(PoolError::InvalidConfig(format!(
                    "cull interval must be a finite non-negative number, got {}",
                    cull.interval_seconds
                )));
            }
        }
        Ok(())
    }
}

/// A startup manifest declaring every pool by prototype name.
///
/// The manifest only carries policy; prototype identities are resolved
/// by the caller at registration time (see
/// [`Registry::register_manifest`](crate::registry::Registry::register_manifest)).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolManifest {
    /// Pool policies keyed by prototype name.
    #[serde(default)]
    pub pools: BTreeMap<String, PoolConfig>,
}

impl PoolManifest {
    /// Parses a manifest from TOML text and validates every policy.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] on parse errors or when any
    /// pool policy fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self, PoolError> {
        let manifest: Self =
            toml::from_str(text).map_err(|e| PoolError::InvalidConfig(e.to_string()))?;
        for (name, config) in &manifest.pools {
            config
                .validate()
                .map_err(|e| PoolError::InvalidConfig(format!("pool '{name}': {e}")))?;
        }
        Ok(manifest)
    }

    /// Loads and validates a manifest from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] when the file cannot be read
    /// or does not parse/validate.
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, PoolError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            PoolError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }
}
