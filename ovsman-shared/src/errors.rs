use thiserror::Error;

/// Fatal scenario resolution errors.
///
/// These abort the whole request before any step runs; per-step failures are
/// never reported through this type, they land in the step's
/// [`StepResult`](crate::scenario::StepResult) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("request must provide either steps or a scenario template name")]
    EmptyRequest,

    #[error("unknown scenario template: {name}")]
    UnknownTemplate { name: String },
}

/// Errors reported by the network-operation provider.
#[derive(Error, Debug)]
pub enum OvsError {
    #[error("{program} failed: {detail}")]
    CommandFailed { program: String, detail: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for provider operations.
pub type OvsResult<T> = Result<T, OvsError>;
