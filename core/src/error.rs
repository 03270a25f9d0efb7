use thiserror::Error;

/// Errors surfaced by the matching engine.
///
/// Query-level failures (`EmptyQuery`) are returned to the caller; build-time
/// failures (`CorpusEmpty`, `Config`) mean no engine was constructed.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The query was blank or whitespace-only after trimming.
    #[error("query is empty")]
    EmptyQuery,

    /// An index cannot be fitted over zero records.
    #[error("cannot build an index over an empty corpus")]
    CorpusEmpty,

    /// A configuration value the engine cannot work with.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EngineError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
