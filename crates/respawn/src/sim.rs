//! # Simulated Host
//!
//! An in-memory stand-in for the scene-graph host the pooling engine
//! delegates to. Every constructed instance becomes a record here, so
//! tests and the demo can assert on activation, placement, parenting,
//! and destruction without a real scene.

use std::collections::HashMap;

use respawn_core::{Host, HostError, Instance, InstanceId, Prototype, Quat, Vec3};

/// Scene-side record of one constructed instance.
#[derive(Clone, Debug)]
pub struct SceneObject {
    /// The prototype name this object was constructed from.
    pub prototype_name: String,
    /// Whether the object is currently shown.
    pub active: bool,
    /// World-space position.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
    /// Administrative parent, if any.
    pub parent: Option<InstanceId>,
}

/// In-memory `Host` implementation backing tests and the demo.
#[derive(Default)]
pub struct SimulatedHost {
    objects: HashMap<InstanceId, SceneObject>,
    next_id: u64,
    constructed: u64,
    destroyed: u64,
    /// When set, `construct` fails with this many live objects or more.
    pub construct_budget: Option<u64>,
}

impl SimulatedHost {
    /// Creates an empty simulated scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the scene record for an instance.
    #[must_use]
    pub fn object(&self, id: InstanceId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Whether the instance still exists in the scene.
    #[must_use]
    pub fn is_live(&self, id: InstanceId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Number of objects currently in the scene.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of objects currently shown.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.objects.values().filter(|o| o.active).count()
    }

    /// Total constructions since creation.
    #[must_use]
    pub fn constructed(&self) -> u64 {
        self.constructed
    }

    /// Total destructions since creation.
    #[must_use]
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }
}

impl Host for SimulatedHost {
    fn construct(&mut self, prototype: &Prototype) -> Result<InstanceId, HostError> {
        if let Some(budget) = self.construct_budget {
            if self.objects.len() as u64 >= budget {
                return Err(HostError::new(format!(
                    "scene budget of {budget} objects exhausted"
                )));
            }
        }
        self.next_id += 1;
        self.constructed += 1;
        let id = InstanceId::new(self.next_id);
        self.objects.insert(
            id,
            SceneObject {
                prototype_name: prototype.name.clone(),
                active: false,
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                parent: None,
            },
        );
        Ok(id)
    }

    fn destroy(&mut self, instance: &Instance) -> Result<(), HostError> {
        match self.objects.remove(&instance.id) {
            Some(_) => {
                self.destroyed += 1;
                Ok(())
            }
            None => Err(HostError::new(format!(
                "destroy of unknown instance {}",
                instance.id
            ))),
        }
    }

    fn set_active(&mut self, instance: &Instance, active: bool) {
        if let Some(object) = self.objects.get_mut(&instance.id) {
            object.active = active;
        }
    }

    fn set_transform(&mut self, instance: &Instance, position: Vec3, rotation: Quat) {
        if let Some(object) = self.objects.get_mut(&instance.id) {
            object.position = position;
            object.rotation = rotation;
        }
    }

    fn set_parent(&mut self, instance: &Instance, parent: Option<InstanceId>) {
        if let Some(object) = self.objects.get_mut(&instance.id) {
            object.parent = parent;
        }
    }
}
