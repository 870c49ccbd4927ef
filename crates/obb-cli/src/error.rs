use obb_core::FetchError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{failed} of {total} symbols failed")]
    PartialFailure { failed: usize, total: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("table error: {0}")]
    Table(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Fetch(FetchError::Validation(_)) => 2,
            Self::Fetch(FetchError::NotFound { .. }) => 3,
            Self::PartialFailure { .. } => 3,
            Self::Serialization(_) | Self::Table(_) => 4,
            Self::Fetch(FetchError::Upstream(_)) => 6,
            Self::Io(_) => 10,
        }
    }
}
