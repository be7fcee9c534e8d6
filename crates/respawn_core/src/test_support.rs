//! In-memory host double for unit tests.

use std::collections::HashMap;

use crate::error::HostError;
use crate::host::Host;
use crate::ids::{Instance, InstanceId, Prototype};
use crate::math::{Quat, Vec3};

/// Minimal `Host` implementation recording every call.
#[derive(Default)]
pub(crate) struct StubHost {
    /// Number of instances constructed so far (also the id source).
    pub constructed: u64,
    /// Ids passed to `destroy`, in order.
    pub destroyed: Vec<InstanceId>,
    /// Last active flag per instance.
    pub active: HashMap<InstanceId, bool>,
    /// Last parent per instance.
    pub parents: HashMap<InstanceId, Option<InstanceId>>,
    /// Last transform per instance.
    pub transforms: HashMap<InstanceId, (Vec3, Quat)>,
    /// When set, `destroy` fails once this many destroys have succeeded.
    pub fail_destroy_after: Option<usize>,
    /// When true, `construct` fails.
    pub fail_construct: bool,
}

impl Host for StubHost {
    fn construct(&mut self, _prototype: &Prototype) -> Result<InstanceId, HostError> {
        if self.fail_construct {
            return Err(HostError::new("construct refused"));
        }
        self.constructed += 1;
        Ok(InstanceId::new(self.constructed))
    }

    fn destroy(&mut self, instance: &Instance) -> Result<(), HostError> {
        if let Some(limit) = self.fail_destroy_after {
            if self.destroyed.len() >= limit {
                return Err(HostError::new("destroy refused"));
            }
        }
        self.destroyed.push(instance.id);
        self.active.remove(&instance.id);
        Ok(())
    }

    fn set_active(&mut self, instance: &Instance, active: bool) {
        self.active.insert(instance.id, active);
    }

    fn set_transform(&mut self, instance: &Instance, position: Vec3, rotation: Quat) {
        self.transforms.insert(instance.id, (position, rotation));
    }

    fn set_parent(&mut self, instance: &Instance, parent: Option<InstanceId>) {
        self.parents.insert(instance.id, parent);
    }
}
