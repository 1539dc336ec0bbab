//! World - central ECS container

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use super::{Component, ComponentStore, Entity, EntityBuilder};
use crate::systems::System;

/// Shared handle to the entities, components and systems of one run.
///
/// Cloning is cheap and every clone sees the same state. Systems running in
/// the same step share it without any transactional isolation.
#[derive(Clone, Default)]
pub struct World {
    inner: Arc<WorldState>,
}

#[derive(Default)]
struct WorldState {
    entities: RwLock<Vec<Entity>>,
    components: RwLock<ComponentStore>,
    systems: RwLock<Vec<Arc<System>>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity from the components declared on its builder.
    pub fn add_entity<F>(&self, declare: F) -> Entity
    where
        F: FnOnce(EntityBuilder) -> EntityBuilder,
    {
        let builder = declare(EntityBuilder::new(Entity::new()));
        let entity = builder.entity();
        let records = builder.into_components();
        let count = records.len();

        self.inner.entities.write().push(entity);
        {
            let mut store = self.inner.components.write();
            for record in records {
                store.insert(record);
            }
        }
        log::debug!("committed entity {entity} with {count} component(s)");
        entity
    }

    /// Attach a component to `entity`, replacing any component of the same kind.
    pub fn add_component(&self, entity: Entity, component: impl Component) {
        self.inner.components.write().set(entity, component);

        let mut entities = self.inner.entities.write();
        if !entities.contains(&entity) {
            entities.push(entity);
        }
    }

    pub fn add_system(&self, system: impl Into<System>) {
        let system = system.into();
        log::debug!("registered system `{}`", system.name());
        self.inner.systems.write().push(Arc::new(system));
    }

    /// Entities in creation order.
    pub fn entities(&self) -> Vec<Entity> {
        self.inner.entities.read().clone()
    }

    pub fn entity_count(&self) -> usize {
        self.inner.entities.read().len()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.entities.read().contains(&entity)
    }

    /// Read access to the component store.
    ///
    /// Do not hold the guard across an `.await`.
    pub fn components(&self) -> RwLockReadGuard<'_, ComponentStore> {
        self.inner.components.read()
    }

    /// Registered systems in registration order.
    pub fn systems(&self) -> Vec<Arc<System>> {
        self.inner.systems.read().clone()
    }
}
