//! Validated build configuration.

use crate::geometry::{BoundingBox, Point3};

pub const MAX_MIN_VERTICES: usize = 10;
pub const MIN_STRIDE: usize = 1;
pub const MAX_STRIDE: usize = 10;

/// What to do when `start_index + floor(len * displayed_fraction)` runs past
/// the end of the feature sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Process up to the last available feature.
    #[default]
    Clamp,
    /// Fail the build with `BuildError::InvalidConfiguration`.
    Strict,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("min_vertices must be in [0, 10], got {0}")]
    MinVertices(usize),

    #[error("stride must be in [1, 10], got {0}")]
    Stride(usize),

    #[error("displayed_fraction must be in [0, 1], got {0}")]
    DisplayedFraction(f64),

    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Read-only parameters of a build. Construct through [`NetworkConfig::builder`]
/// or [`NetworkConfig::new`]; both enforce the field ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    start_index: usize,
    min_vertices: usize,
    displayed_fraction: f64,
    stride: usize,
    offset: Point3,
    bbox: BoundingBox,
    range_policy: RangePolicy,
}

impl NetworkConfig {
    pub fn new(
        start_index: usize,
        min_vertices: usize,
        displayed_fraction: f64,
        stride: usize,
        offset: Point3,
        bbox: BoundingBox,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .start_index(start_index)
            .min_vertices(min_vertices)
            .displayed_fraction(displayed_fraction)
            .stride(stride)
            .offset(offset)
            .bbox(bbox)
            .build()
    }

    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::default()
    }

    /// Index of the first candidate feature.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Features with this many vertices or fewer, raw or after clipping, are dropped.
    pub fn min_vertices(&self) -> usize {
        self.min_vertices
    }

    pub fn displayed_fraction(&self) -> f64 {
        self.displayed_fraction
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn offset(&self) -> Point3 {
        self.offset
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn range_policy(&self) -> RangePolicy {
        self.range_policy
    }

    /// Exclusive end of the candidate range, before any clamping.
    pub fn end_index(&self, feature_count: usize) -> usize {
        let shown = (feature_count as f64 * self.displayed_fraction).floor() as usize;
        self.start_index.saturating_add(shown)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            start_index: 0,
            min_vertices: 3,
            displayed_fraction: 1.0,
            stride: 1,
            offset: Point3::ZERO,
            bbox: BoundingBox::EVERYTHING,
            range_policy: RangePolicy::Clamp,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NetworkConfigBuilder {
    inner: NetworkConfig,
}

impl NetworkConfigBuilder {
    pub fn start_index(mut self, start_index: usize) -> Self {
        self.inner.start_index = start_index;
        self
    }

    pub fn min_vertices(mut self, min_vertices: usize) -> Self {
        self.inner.min_vertices = min_vertices;
        self
    }

    pub fn displayed_fraction(mut self, fraction: f64) -> Self {
        self.inner.displayed_fraction = fraction;
        self
    }

    pub fn stride(mut self, stride: usize) -> Self {
        self.inner.stride = stride;
        self
    }

    pub fn offset(mut self, offset: Point3) -> Self {
        self.inner.offset = offset;
        self
    }

    pub fn bbox(mut self, bbox: BoundingBox) -> Self {
        self.inner.bbox = bbox;
        self
    }

    pub fn range_policy(mut self, policy: RangePolicy) -> Self {
        self.inner.range_policy = policy;
        self
    }

    pub fn build(self) -> Result<NetworkConfig, ConfigError> {
        let c = self.inner;

        if c.min_vertices > MAX_MIN_VERTICES {
            return Err(ConfigError::MinVertices(c.min_vertices));
        }
        if !(MIN_STRIDE..=MAX_STRIDE).contains(&c.stride) {
            return Err(ConfigError::Stride(c.stride));
        }
        if !(0.0..=1.0).contains(&c.displayed_fraction) {
            return Err(ConfigError::DisplayedFraction(c.displayed_fraction));
        }
        if !c.offset.is_finite() {
            return Err(ConfigError::NonFinite("offset"));
        }
        // Infinite box bounds are fine; NaN would make every comparison false.
        let b = &c.bbox;
        let any_nan = [b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z]
            .iter()
            .any(|v| v.is_nan());
        if any_nan {
            return Err(ConfigError::NonFinite("bbox"));
        }

        Ok(c)
    }
}
