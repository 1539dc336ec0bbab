use std::future::Future;

use anyhow::Result;
use futures::future::{try_join_all, BoxFuture, FutureExt};

use super::SystemOutput;
use crate::ecs::{ComponentGroup, ComponentStore, World};

type Selector = Box<dyn Fn(&ComponentStore) -> Vec<ComponentGroup> + Send + Sync>;
type Updater = Box<dyn Fn(ComponentGroup) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// System that updates groups of components picked out by a selector.
///
/// The selector runs against the component store and returns the groups to
/// work on. The updater is then invoked once per group, with all groups
/// updated concurrently.
pub struct ComponentSystem {
    name: String,
    selector: Selector,
    updater: Updater,
}

impl ComponentSystem {
    pub fn new<S, U, Fut>(name: impl Into<String>, selector: S, updater: U) -> Self
    where
        S: Fn(&ComponentStore) -> Vec<ComponentGroup> + Send + Sync + 'static,
        U: Fn(ComponentGroup) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            selector: Box::new(selector),
            updater: Box::new(move |group| updater(group).boxed()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) async fn execute(&self, world: &World) -> Result<SystemOutput> {
        let groups = {
            let store = world.components();
            (self.selector)(&*store)
        };
        log::trace!("system `{}` selected {} group(s)", self.name, groups.len());

        try_join_all(groups.into_iter().map(|group| (self.updater)(group))).await?;
        Ok(SystemOutput::default())
    }
}
