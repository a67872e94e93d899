use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Missing report field: {field}")]
    MissingField { field: &'static str },

    #[error("Mach solver did not converge after {iterations} iterations (residual {residual:e})")]
    NoConvergence { iterations: usize, residual: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing comparison key: {0}")]
    MissingKey(String),

    #[error("Report pattern error: {0}")]
    Pattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
