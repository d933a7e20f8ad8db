use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid plot area: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Source yielded zero rows or the requested parameter does not exist.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// Storage collaborator failed while fetching rows.
    #[error("failed to load chart data: {0}")]
    LoadFailure(String),

    /// Sampling or option building rejected malformed data.
    #[error("failed to render chart: {0}")]
    TransformFailure(String),
}

/// Coarse classification used when converting errors into chart state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartErrorKind {
    DataUnavailable,
    LoadFailure,
    TransformFailure,
    Invalid,
}

impl ChartError {
    #[must_use]
    pub fn kind(&self) -> ChartErrorKind {
        match self {
            Self::DataUnavailable(_) => ChartErrorKind::DataUnavailable,
            Self::LoadFailure(_) => ChartErrorKind::LoadFailure,
            Self::TransformFailure(_) => ChartErrorKind::TransformFailure,
            Self::InvalidViewport { .. } | Self::InvalidData(_) | Self::InvalidConfig(_) => {
                ChartErrorKind::Invalid
            }
        }
    }

    /// Re-labels a data-shape error raised while transforming already loaded data.
    #[must_use]
    pub fn into_transform_failure(self) -> Self {
        match self {
            Self::TransformFailure(_) => self,
            other => Self::TransformFailure(other.to_string()),
        }
    }
}
