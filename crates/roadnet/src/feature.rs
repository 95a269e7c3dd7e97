//! Input records and the trait that supplies them.

use std::io;

/// One geographic vertex, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    pub longitude: f64,
    pub latitude: f64,
}

impl RawPosition {
    #[inline]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// One input road record.
///
/// No invariant is assumed of `positions`; it may be empty or hold a single
/// vertex. The hints are the raw tag text as found in the source and are only
/// interpreted by an [`AttributeProvider`](crate::attributes::AttributeProvider).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeature {
    pub positions: Vec<RawPosition>,
    pub width_hint: Option<String>,
    pub lane_hint: Option<String>,
    /// Road classification, e.g. `"primary"` or `"residential"`.
    pub kind: Option<String>,
}

impl RawFeature {
    pub fn new(positions: Vec<RawPosition>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn with_width_hint(mut self, hint: impl Into<String>) -> Self {
        self.width_hint = Some(hint.into());
        self
    }

    pub fn with_lane_hint(mut self, hint: impl Into<String>) -> Self {
        self.lane_hint = Some(hint.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature {index}: {reason}")]
    MalformedFeature { index: usize, reason: String },
}

/// Supplies the ordered feature sequence. Called once before the first build.
pub trait FeatureSource {
    fn read_features(&mut self) -> Result<Vec<RawFeature>, SourceError>;
}

/// In-memory source, handy for hosts that already hold decoded features.
impl FeatureSource for Vec<RawFeature> {
    fn read_features(&mut self) -> Result<Vec<RawFeature>, SourceError> {
        Ok(self.clone())
    }
}
