use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OhpError {
    #[error("at least 2 tables are required for a join, got {got}")]
    InsufficientInputs { got: usize },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported join operator: {0}")]
    UnsupportedOperator(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("regression needs at least 2 samples, got {0}")]
    InsufficientSamples(usize),

    #[error("degenerate input: {0}")]
    Degenerate(String),

    #[error("domain error: {0}")]
    Domain(String),

    #[error("config error: {0}")]
    Config(String),
}

impl OhpError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type OhpResult<T> = Result<T, OhpError>;
