//! Entity Component System (ECS) data model
//!
//! Entities are UUIDs, components live in a kind-then-entity indexed store,
//! and the [`World`] ties them together with the registered systems.

pub mod builder;
pub mod component;
pub mod entity;
pub mod world;

pub use builder::{EntityBuilder, WorldBuilder};
pub use component::{
    AsAny, Component, ComponentGroup, ComponentRecord, ComponentStore, SharedComponent,
};
pub use entity::Entity;
pub use world::World;
