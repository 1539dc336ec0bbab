//! Fluent construction of entities and worlds

use super::{Component, ComponentRecord, Entity, World};
use crate::systems::System;

/// Collects the components of one entity before it is committed to a world.
///
/// Each component is bound to the builder's entity as it is added. Adding a
/// second component of the same kind is allowed; the later one wins on
/// commit.
pub struct EntityBuilder {
    entity: Entity,
    components: Vec<ComponentRecord>,
}

impl EntityBuilder {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            components: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: impl Component) -> Self {
        self.components
            .push(ComponentRecord::new(self.entity, component));
        self
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Pending components, in the order they were added.
    pub fn pending(&self) -> &[ComponentRecord] {
        &self.components
    }

    pub(crate) fn into_components(self) -> Vec<ComponentRecord> {
        self.components
    }
}

/// Builds a [`World`] from entity and system declarations.
#[derive(Default)]
pub struct WorldBuilder {
    world: World,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity<F>(self, declare: F) -> Self
    where
        F: FnOnce(EntityBuilder) -> EntityBuilder,
    {
        self.world.add_entity(declare);
        self
    }

    pub fn with_system(self, system: impl Into<System>) -> Self {
        self.world.add_system(system);
        self
    }

    pub fn build(self) -> World {
        self.world
    }
}
