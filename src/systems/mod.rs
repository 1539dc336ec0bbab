//! Systems: units of logic executed once per step
//!
//! A [`System`] is either component driven ([`ComponentSystem`]) or action
//! driven ([`VoidSystem`]). Both share the same `execute` contract.

mod component;
mod void;

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::ecs::World;
use crate::error::EcsError;

pub use component::ComponentSystem;
pub use void::VoidSystem;

/// Text captured from one system execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemOutput {
    pub stdout: String,
    pub stderr: String,
}

impl SystemOutput {
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            stdout: text.into(),
            stderr: String::new(),
        }
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: text.into(),
        }
    }

    pub fn with_stderr(mut self, text: impl Into<String>) -> Self {
        self.stderr = text.into();
        self
    }
}

impl From<()> for SystemOutput {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

/// Outcome of one system in one step.
#[derive(Debug, Clone, Serialize)]
pub struct SystemResult {
    pub system: String,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

pub enum System {
    Component(ComponentSystem),
    Void(VoidSystem),
}

impl System {
    pub fn name(&self) -> &str {
        match self {
            System::Component(system) => system.name(),
            System::Void(system) => system.name(),
        }
    }

    /// Run the system once against `world`.
    pub async fn execute(&self, world: &World) -> Result<SystemResult, EcsError> {
        let start = Instant::now();
        log::debug!("system `{}` started", self.name());

        let outcome = match self {
            System::Component(system) => system.execute(world).await,
            System::Void(system) => system.execute(world).await,
        };
        let elapsed = start.elapsed();

        match outcome {
            Ok(output) => {
                log::debug!(
                    "system `{}` finished in {:.3} ms",
                    self.name(),
                    elapsed.as_secs_f64() * 1_000.0
                );
                Ok(SystemResult {
                    system: self.name().to_owned(),
                    stdout: output.stdout,
                    stderr: output.stderr,
                    elapsed,
                })
            }
            Err(err) => {
                log::error!("system `{}` failed: {err:#}", self.name());
                Err(EcsError::system_failed(self.name(), err))
            }
        }
    }
}

impl From<ComponentSystem> for System {
    fn from(system: ComponentSystem) -> Self {
        System::Component(system)
    }
}

impl From<VoidSystem> for System {
    fn from(system: VoidSystem) -> Self {
        System::Void(system)
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            System::Component(_) => "Component",
            System::Void(_) => "Void",
        };
        f.debug_struct("System")
            .field("name", &self.name())
            .field("variant", &variant)
            .finish()
    }
}
