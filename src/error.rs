use thiserror::Error;

/// Errors raised by the recommendation engine and its exporters.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The caller asked for something the engine cannot serve (bad `top_k`, bad horizon).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A learned model was queried before it was fitted.
    #[error("model not ready: {0}")]
    ModelNotReady(&'static str),

    /// Training data was empty or inconsistent.
    #[error("invalid training set: {0}")]
    InvalidTrainingSet(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("report error: {0}")]
    Report(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
