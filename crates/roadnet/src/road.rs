//! Output entities: accepted roads and the network that owns them.

use serde::Serialize;

use crate::geometry::Point3;

/// An accepted, clipped road polyline in the local frame.
///
/// Only the builder constructs roads; everything is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Road {
    points: Vec<Point3>,
    width: f64,
    lane_count: u32,
    source_index: usize,
}

impl Road {
    pub(crate) fn new(
        points: Vec<Point3>,
        width: f64,
        lane_count: u32,
        source_index: usize,
    ) -> Self {
        debug_assert!(!points.is_empty());
        Self {
            points,
            width,
            lane_count,
            source_index,
        }
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    /// Index of the feature this road was built from.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polyline length in local units.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}

/// Counters collected during one build. Observational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub features_total: usize,
    pub features_selected: usize,
    /// Dropped on the raw vertex count, before sampling.
    pub rejected_sparse: usize,
    /// Dropped because too few sampled vertices fell inside the box.
    pub rejected_clipped: usize,
    pub vertices_sampled: usize,
    pub vertices_clipped: usize,
    pub roads_accepted: usize,
    pub range_clamped: bool,
}

/// The result of one build. Replaced wholesale on rebuild.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Network {
    roads: Vec<Road>,
    report: BuildReport,
}

impl Network {
    pub(crate) fn new(roads: Vec<Road>, report: BuildReport) -> Self {
        Self { roads, report }
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn into_roads(self) -> Vec<Road> {
        self.roads
    }
}
