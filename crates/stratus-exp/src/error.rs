//! Harness error taxonomy.

use thiserror::Error;

/// Errors surfaced by the experiment harness.
///
/// Configuration errors are caught before any engine interaction; session
/// errors are fatal to the current scenario but never to the scenario queue.
/// Per-cloudlet failures are not errors at all — they come back as records
/// with failed status.
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// Scenario parameters rejected during validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The engine could not be acquired or reset for a fresh run.
    #[error("engine init failure: {0}")]
    EngineInitFailure(String),

    /// Built entities could not be registered with the engine.
    #[error("submission failure: {0}")]
    SubmissionFailure(String),
}
