//! Writing-engine error types.

/// Specific error conditions for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EngineErrorKind {
    /// A generation request arrived without a scene goal
    #[display("scene goal must not be empty")]
    EmptyGoal,
    /// No JSON payload could be extracted from a model response
    #[display("JSON extraction failed: {}", _0)]
    JsonExtraction(String),
}

/// Error type for writing-engine operations.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Engine Error: {} at line {} in {}", kind, line, file)]
pub struct EngineError {
    /// The specific error condition
    pub kind: EngineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl EngineError {
    /// Create a new EngineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EngineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
