use crate::attributes::AttributeError;
use crate::feature::SourceError;

/// Failure of a build. No partial network is produced in any of these cases.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("feature source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("attribute lookup failed for feature {index}: {source}")]
    AttributeLookupFailed {
        index: usize,
        #[source]
        source: AttributeError,
    },
}
