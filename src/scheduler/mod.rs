//! Step runner - executes every registered system once per step

use std::time::{Duration, Instant};

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::ecs::World;
use crate::error::EcsError;
use crate::systems::SystemResult;

/// Tuning for the step runner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerSettings {
    /// Warn about systems slower than this. Disabled when absent.
    #[serde(default)]
    pub slow_system_warn_ms: Option<u64>,
}

/// Results of one step, one entry per system in registration order.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub system_results: Vec<SystemResult>,
    pub elapsed: Duration,
}

impl StepResult {
    pub fn result_for(&self, system: &str) -> Option<&SystemResult> {
        self.system_results.iter().find(|result| result.system == system)
    }

    /// Non-empty captured stdout, one line per system.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.system_results
            .iter()
            .map(|result| result.stdout.as_str())
            .filter(|text| !text.is_empty())
    }
}

/// Runs one step: all systems are started in registration order and awaited
/// together. The first failing system fails the whole step.
#[derive(Debug, Clone, Default)]
pub struct StepRunner {
    settings: RunnerSettings,
}

impl StepRunner {
    pub fn new(settings: RunnerSettings) -> Self {
        Self { settings }
    }

    pub async fn execute_step(&self, world: &World) -> Result<StepResult, EcsError> {
        let systems = world.systems();
        let start = Instant::now();
        log::debug!("dispatching {} system(s)", systems.len());

        let system_results =
            try_join_all(systems.iter().map(|system| system.execute(world))).await?;
        let elapsed = start.elapsed();

        self.report_slow(&system_results);
        log::info!(
            "step finished: {} system(s) in {:.3} ms",
            system_results.len(),
            elapsed.as_secs_f64() * 1_000.0
        );

        Ok(StepResult {
            system_results,
            elapsed,
        })
    }

    /// Warns about, and returns, the systems over the configured limit.
    fn report_slow<'a>(&self, results: &'a [SystemResult]) -> Vec<&'a SystemResult> {
        let Some(limit_ms) = self.settings.slow_system_warn_ms else {
            return Vec::new();
        };
        let limit = Duration::from_millis(limit_ms);
        let slow: Vec<_> = results
            .iter()
            .filter(|result| result.elapsed > limit)
            .collect();
        for result in &slow {
            log::warn!(
                "system `{}` took {:.3} ms (limit {limit_ms} ms)",
                result.system,
                result.elapsed.as_secs_f64() * 1_000.0
            );
        }
        slow
    }
}
