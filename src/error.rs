use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EcsError {
    /// A system's action or one of its updates returned an error.
    #[error("system `{system}` failed")]
    SystemFailed {
        system: String,
        #[source]
        source: BoxError,
    },
}

impl EcsError {
    pub(crate) fn system_failed(system: &str, source: anyhow::Error) -> Self {
        EcsError::SystemFailed {
            system: system.to_owned(),
            source: source.into(),
        }
    }

    /// Name of the system that failed the step.
    pub fn system(&self) -> &str {
        match self {
            EcsError::SystemFailed { system, .. } => system,
        }
    }
}
