pub mod config;
pub mod ecs;
pub mod error;
pub mod scheduler;
pub mod systems;

pub use config::{ConfigLoader, RunConfig};
pub use ecs::{Component, ComponentStore, Entity, EntityBuilder, World, WorldBuilder};
pub use error::EcsError;
pub use scheduler::{RunnerSettings, StepResult, StepRunner};
pub use systems::{ComponentSystem, System, SystemOutput, SystemResult, VoidSystem};
