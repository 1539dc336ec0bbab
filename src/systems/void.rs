use std::future::Future;

use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};

use super::SystemOutput;
use crate::ecs::World;

type Action = Box<dyn Fn(World) -> BoxFuture<'static, Result<SystemOutput>> + Send + Sync>;

/// System that runs an arbitrary action once per step.
///
/// The action gets its own handle to the world and may create entities or
/// perform I/O. It returns `()` or a [`SystemOutput`] carrying captured text.
pub struct VoidSystem {
    name: String,
    action: Action,
}

impl VoidSystem {
    pub fn new<F, Fut, O>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(World) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O>> + Send + 'static,
        O: Into<SystemOutput> + 'static,
    {
        Self {
            name: name.into(),
            action: Box::new(move |world| {
                action(world)
                    .map(|result| result.map(Into::<SystemOutput>::into))
                    .boxed()
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) async fn execute(&self, world: &World) -> Result<SystemOutput> {
        (self.action)(world.clone()).await
    }
}
