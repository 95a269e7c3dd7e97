//! Per-feature road attributes: carriageway width and lane count.

use crate::feature::RawFeature;

/// Width of a single lane in metres, used to convert between lanes and width.
pub const LANE_WIDTH_M: f64 = 3.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadAttributes {
    pub width: f64,
    pub lane_count: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    #[error("unparseable width tag {0:?}")]
    Width(String),

    #[error("unparseable lanes tag {0:?}")]
    Lanes(String),
}

/// Looks up width and lane count for a feature that passed acceptance.
///
/// Never called for rejected features.
pub trait AttributeProvider {
    fn attributes(&self, feature: &RawFeature) -> Result<RoadAttributes, AttributeError>;
}

impl<F> AttributeProvider for F
where
    F: Fn(&RawFeature) -> Result<RoadAttributes, AttributeError>,
{
    fn attributes(&self, feature: &RawFeature) -> Result<RoadAttributes, AttributeError> {
        self(feature)
    }
}

/// Derives attributes from OSM-style `width`, `lanes` and `highway` tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagAttributes {
    /// Reject unparseable tags instead of falling back to the derived value.
    pub strict: bool,
}

impl TagAttributes {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl AttributeProvider for TagAttributes {
    fn attributes(&self, feature: &RawFeature) -> Result<RoadAttributes, AttributeError> {
        let kind = feature.kind.as_deref().unwrap_or("");

        let lanes = match feature.lane_hint.as_deref() {
            Some(tag) => match parse_lanes(tag) {
                Some(n) => Some(n),
                None if self.strict => return Err(AttributeError::Lanes(tag.to_owned())),
                None => None,
            },
            None => None,
        };

        let width = match feature.width_hint.as_deref() {
            Some(tag) => match parse_width_m(tag) {
                Some(w) => Some(w),
                None if self.strict => return Err(AttributeError::Width(tag.to_owned())),
                None => None,
            },
            None => None,
        };

        let width = width
            .map(|w| w.max(1.0))
            .unwrap_or_else(|| default_width_m(kind, lanes));

        let lane_count =
            lanes.unwrap_or_else(|| ((width / LANE_WIDTH_M).round() as u32).max(1));

        Ok(RoadAttributes { width, lane_count })
    }
}

/// Base width for a road kind, widened when two or more lanes are known.
pub fn default_width_m(kind: &str, lanes: Option<u32>) -> f64 {
    // Base width for the road kind.
    let base_width = match kind {
        "motorway" => 12.0,
        "trunk" => 10.0,
        "primary" => 8.0,
        "secondary" => 7.0,
        "tertiary" => 6.0,
        "residential" | "service" => 5.0,
        _ => 2.0,
    };

    // Widen to fit the tagged lanes.
    match lanes {
        Some(n) if n >= 2 => (n as f64 * LANE_WIDTH_M).max(base_width),
        _ => base_width,
    }
}

/// Parse a width tag in metres. Accepts a bare number, an `m` suffix or an
/// `ft` suffix.
pub fn parse_width_m(s: &str) -> Option<f64> {
    let s = s.trim().to_ascii_lowercase();

    // Unit suffix first, then a bare number in metres.
    let value = if let Some(num) = s.strip_suffix("ft") {
        num.trim().parse::<f64>().ok().map(|v| v * 0.3048)
    } else if let Some(num) = s.strip_suffix('m') {
        num.trim().parse::<f64>().ok()
    } else {
        s.parse::<f64>().ok()
    };

    // Reject zero, negative and non-finite widths.
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse a lanes tag. `"2;3"` style multi-values take the first entry.
pub fn parse_lanes(s: &str) -> Option<u32> {
    s.split(';')
        .next()?
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
}
