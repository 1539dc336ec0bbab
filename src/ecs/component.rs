//! Component records and the kind-indexed component store

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::Entity;

/// Upcast helper so stored components can be downcast to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Trait for components
///
/// `kind` is the string discriminator the store indexes by, e.g. `"Price"`.
pub trait Component: AsAny + fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> &'static str;
}

/// A component bound to its owning entity.
///
/// The owner and kind are fixed when the record is created and cannot be
/// changed afterwards.
pub struct ComponentRecord {
    entity: Entity,
    kind: &'static str,
    value: Box<dyn Component>,
}

impl ComponentRecord {
    pub fn new(entity: Entity, component: impl Component) -> Self {
        Self::from_boxed(entity, Box::new(component))
    }

    pub fn from_boxed(entity: Entity, value: Box<dyn Component>) -> Self {
        Self {
            entity,
            kind: value.kind(),
            value,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        (*self.value).as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        (*self.value).as_any_mut().downcast_mut::<T>()
    }
}

impl fmt::Debug for ComponentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRecord")
            .field("entity", &self.entity)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .finish()
    }
}

/// Stored component cell. Updaters lock the cell, never the whole store.
pub type SharedComponent = Arc<RwLock<ComponentRecord>>;

/// Ordered components handed to one updater invocation.
pub type ComponentGroup = Vec<SharedComponent>;

/// All components, indexed by kind and then by owning entity.
#[derive(Default)]
pub struct ComponentStore {
    kinds: HashMap<String, HashMap<Entity, SharedComponent>>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: &str, entity: Entity) -> Option<SharedComponent> {
        self.kinds.get(kind)?.get(&entity).cloned()
    }

    /// Bind `component` to `entity` and file it under the component's kind,
    /// silently replacing any component of that kind the entity already owns.
    pub fn set(&mut self, entity: Entity, component: impl Component) {
        self.insert(ComponentRecord::new(entity, component));
    }

    /// Insert a record under its own kind and owner.
    pub fn insert(&mut self, record: ComponentRecord) {
        self.kinds
            .entry(record.kind().to_owned())
            .or_default()
            .insert(record.entity(), Arc::new(RwLock::new(record)));
    }

    pub fn contains(&self, kind: &str, entity: Entity) -> bool {
        self.kinds
            .get(kind)
            .is_some_and(|owners| owners.contains_key(&entity))
    }

    pub fn of_kind<'a>(
        &'a self,
        kind: &str,
    ) -> impl Iterator<Item = (Entity, &'a SharedComponent)> + 'a {
        self.kinds
            .get(kind)
            .into_iter()
            .flat_map(|owners| owners.iter().map(|(entity, cell)| (*entity, cell)))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// One group per entity that owns every listed kind, ordered as listed.
    pub fn groups(&self, kinds: &[&str]) -> Vec<ComponentGroup> {
        let Some((first, rest)) = kinds.split_first() else {
            return Vec::new();
        };
        self.of_kind(first)
            .filter_map(|(entity, head)| {
                let mut group = Vec::with_capacity(kinds.len());
                group.push(Arc::clone(head));
                for kind in rest {
                    group.push(self.get(kind, entity)?);
                }
                Some(group)
            })
            .collect()
    }

    /// Total number of stored components across all kinds.
    pub fn len(&self) -> usize {
        self.kinds.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.kinds.iter().map(|(kind, owners)| (kind, owners.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    impl Component for Position {
        fn kind(&self) -> &'static str {
            "Position"
        }
    }

    #[derive(Debug, PartialEq)]
    struct Velocity {
        dx: f32,
    }

    impl Component for Velocity {
        fn kind(&self) -> &'static str {
            "Velocity"
        }
    }

    #[test]
    fn test_component_store() {
        let mut store = ComponentStore::new();
        let e1 = Entity::new();
        let e2 = Entity::new();

        store.insert(ComponentRecord::new(e1, Position { x: 1.0, y: 2.0 }));
        store.insert(ComponentRecord::new(e2, Position { x: 3.0, y: 4.0 }));

        assert_eq!(store.len(), 2);
        assert!(store.contains("Position", e1));
        assert!(store.contains("Position", e2));
        assert!(!store.contains("Velocity", e1));
        assert!(store.get("Position", Entity::new()).is_none());
        assert!(store.get("Missing", e1).is_none());

        let cell = store.get("Position", e1).unwrap();
        let record = cell.read();
        assert_eq!(record.entity(), e1);
        assert_eq!(
            record.downcast_ref::<Position>(),
            Some(&Position { x: 1.0, y: 2.0 })
        );
        assert!(record.downcast_ref::<Velocity>().is_none());
    }

    #[test]
    fn test_set_overwrites_same_kind_and_owner() {
        let mut store = ComponentStore::new();
        let entity = Entity::new();

        store.set(entity, Position { x: 1.0, y: 1.0 });
        store.set(entity, Position { x: 9.0, y: 9.0 });

        assert_eq!(store.len(), 1);
        let cell = store.get("Position", entity).unwrap();
        assert_eq!(cell.read().downcast_ref::<Position>().unwrap().x, 9.0);
    }

    #[test]
    fn test_set_keys_by_component_owner_and_kind() {
        let mut store = ComponentStore::new();
        let owner = Entity::new();

        store.set(owner, Velocity { dx: 1.0 });

        let cell = store.get("Velocity", owner).unwrap();
        assert_eq!(cell.read().entity(), owner);
        assert_eq!(cell.read().kind(), "Velocity");
        assert!(store.of_kind("Position").next().is_none());

        let groups = store.groups(&["Velocity"]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0][0].read().entity(), owner);
    }

    #[test]
    fn test_every_stored_record_matches_its_key() {
        let mut store = ComponentStore::new();
        let a = Entity::new();
        let b = Entity::new();

        store.insert(ComponentRecord::new(a, Position { x: 1.0, y: 1.0 }));
        store.set(b, Position { x: 2.0, y: 2.0 });
        store.set(a, Velocity { dx: 3.0 });

        assert!(!store.contains("Velocity", b));
        for kind in ["Position", "Velocity"] {
            for (entity, cell) in store.of_kind(kind) {
                let record = cell.read();
                assert_eq!(record.entity(), entity);
                assert_eq!(record.kind(), kind);
            }
        }
        let b_position = store.get("Position", b).unwrap();
        assert_eq!(b_position.read().downcast_ref::<Position>().unwrap().x, 2.0);
    }

    #[test]
    fn test_shared_cell_mutation_is_visible_through_store() {
        let mut store = ComponentStore::new();
        let entity = Entity::new();
        store.insert(ComponentRecord::new(entity, Velocity { dx: 0.5 }));

        if let Some(cell) = store.get("Velocity", entity) {
            cell.write().downcast_mut::<Velocity>().unwrap().dx = 2.0;
        }

        let cell = store.get("Velocity", entity).unwrap();
        assert_eq!(cell.read().downcast_ref::<Velocity>().unwrap().dx, 2.0);
    }

    #[test]
    fn test_groups_only_include_complete_entities() {
        let mut store = ComponentStore::new();
        let full = Entity::new();
        let partial = Entity::new();

        store.insert(ComponentRecord::new(full, Position { x: 0.0, y: 0.0 }));
        store.insert(ComponentRecord::new(full, Velocity { dx: 1.0 }));
        store.insert(ComponentRecord::new(partial, Position { x: 5.0, y: 5.0 }));

        let groups = store.groups(&["Velocity", "Position"]);
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].read().kind(), "Velocity");
        assert_eq!(group[1].read().kind(), "Position");
        assert!(group.iter().all(|cell| cell.read().entity() == full));

        assert!(store.groups(&[]).is_empty());
    }

    #[test]
    fn test_of_kind_iteration() {
        let mut store = ComponentStore::new();
        for _ in 0..3 {
            store.insert(ComponentRecord::new(Entity::new(), Velocity { dx: 0.0 }));
        }

        assert_eq!(store.of_kind("Velocity").count(), 3);
        assert_eq!(store.of_kind("Position").count(), 0);
        assert_eq!(store.kinds().collect::<Vec<_>>(), vec!["Velocity"]);
    }
}
