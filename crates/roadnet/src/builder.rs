//! The network builder: range selection, stride decimation, reprojection,
//! box clipping and per-feature acceptance.

use std::ops::Range;

use log::{debug, info, warn};

use crate::attributes::AttributeProvider;
use crate::config::{NetworkConfig, RangePolicy};
use crate::error::BuildError;
use crate::feature::RawFeature;
use crate::geometry::{to_local, Point3};
use crate::road::{BuildReport, Network, Road};

/// What happened to one candidate feature.
#[derive(Debug)]
enum Outcome {
    /// Raw vertex count at or below `min_vertices`.
    Sparse,
    /// Too few sampled vertices inside the box.
    Clipped { sampled: usize, kept: usize },
    Accepted { road: Road, sampled: usize },
}

/// Build the road network from `features`.
///
/// Pure in its inputs: `features` is never modified and identical inputs give
/// identical output. Attributes are requested only for accepted features; a
/// lookup failure aborts the whole build.
pub fn build_network<A>(
    features: &[RawFeature],
    config: &NetworkConfig,
    attributes: &A,
) -> Result<Network, BuildError>
where
    A: AttributeProvider + ?Sized,
{
    let (range, range_clamped) = select_range(features.len(), config)?;

    info!(
        "Building road network from {} features (candidates {}..{})",
        features.len(),
        range.start,
        range.end
    );

    let outcomes = features[range.clone()]
        .iter()
        .zip(range.clone())
        .map(|(feature, index)| process_feature(index, feature, config, attributes))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = BuildReport {
        features_total: features.len(),
        features_selected: range.len(),
        range_clamped,
        ..BuildReport::default()
    };

    let roads: Vec<Road> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            Outcome::Sparse => {
                report.rejected_sparse += 1;
                None
            }
            Outcome::Clipped { sampled, kept } => {
                report.rejected_clipped += 1;
                report.vertices_sampled += sampled;
                report.vertices_clipped += sampled - kept;
                None
            }
            Outcome::Accepted { road, sampled } => {
                report.vertices_sampled += sampled;
                report.vertices_clipped += sampled - road.len();
                Some(road)
            }
        })
        .collect();

    report.roads_accepted = roads.len();

    info!(
        "Roads done: {} accepted, {} too sparse, {} clipped away",
        report.roads_accepted, report.rejected_sparse, report.rejected_clipped
    );

    Ok(Network::new(roads, report))
}

/// Resolve the candidate index range and whether it had to be clamped.
///
/// A start at or past the end yields an empty range under either policy. A
/// range that starts inside the sequence but runs past its end is clamped, or
/// rejected under [`RangePolicy::Strict`].
fn select_range(
    feature_count: usize,
    config: &NetworkConfig,
) -> Result<(Range<usize>, bool), BuildError> {
    let start = config.start_index();
    let requested_end = config.end_index(feature_count);

    // Nothing to select.
    if start >= feature_count {
        return Ok((feature_count..feature_count, false));
    }

    if requested_end <= feature_count {
        return Ok((start..requested_end, false));
    }

    // The end overruns the sequence.
    match config.range_policy() {
        RangePolicy::Clamp => {
            warn!(
                "Feature range {}..{} exceeds {} features; clamping",
                start, requested_end, feature_count
            );
            Ok((start..feature_count, true))
        }
        RangePolicy::Strict => Err(BuildError::InvalidConfiguration(format!(
            "feature range {}..{} exceeds {} features",
            start, requested_end, feature_count
        ))),
    }
}

fn process_feature<A>(
    index: usize,
    feature: &RawFeature,
    config: &NetworkConfig,
    attributes: &A,
) -> Result<Outcome, BuildError>
where
    A: AttributeProvider + ?Sized,
{
    let min_vertices = config.min_vertices();
    let vertex_count = feature.positions.len();

    if vertex_count <= min_vertices {
        debug!(
            "Feature {}: {} vertices, need more than {}",
            index, vertex_count, min_vertices
        );
        return Ok(Outcome::Sparse);
    }

    let points = sample_in_box(feature, config);
    let sampled = sampled_count(vertex_count, config.stride());

    if points.len() <= min_vertices {
        debug!(
            "Feature {}: {} of {} sampled vertices inside the box, need more than {}",
            index,
            points.len(),
            sampled,
            min_vertices
        );
        return Ok(Outcome::Clipped {
            sampled,
            kept: points.len(),
        });
    }

    let attrs = attributes
        .attributes(feature)
        .map_err(|source| BuildError::AttributeLookupFailed { index, source })?;

    Ok(Outcome::Accepted {
        road: Road::new(points, attrs.width, attrs.lane_count, index),
        sampled,
    })
}

/// Every `stride`-th vertex from the first, reprojected, keeping those inside
/// the box. A vertex outside the box is dropped on its own.
fn sample_in_box(feature: &RawFeature, config: &NetworkConfig) -> Vec<Point3> {
    let offset = config.offset();
    let bbox = config.bbox();

    // Decimate, reproject, then clip each vertex on its own.
    feature
        .positions
        .iter()
        .step_by(config.stride())
        .map(|position| to_local(position, &offset))
        .filter(|point| bbox.contains(point))
        .collect()
}

#[inline]
fn sampled_count(vertex_count: usize, stride: usize) -> usize {
    vertex_count.div_ceil(stride)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::attributes::{AttributeError, RoadAttributes, TagAttributes};
    use crate::feature::RawPosition;
    use crate::geometry::BoundingBox;

    /// A feature whose vertices sit at longitude `-i`, latitude `0`, so vertex
    /// `i` lands at local `x = i`.
    fn line(vertices: usize) -> RawFeature {
        RawFeature::new(
            (0..vertices)
                .map(|i| RawPosition::new(-(i as f64), 0.0))
                .collect(),
        )
    }

    fn fixed(_: &RawFeature) -> Result<RoadAttributes, AttributeError> {
        Ok(RoadAttributes {
            width: 6.0,
            lane_count: 2,
        })
    }

    fn config() -> crate::config::NetworkConfigBuilder {
        NetworkConfig::builder().min_vertices(0)
    }

    fn xs(road: &Road) -> Vec<f64> {
        road.points().iter().map(|p| p.x).collect()
    }

    #[test]
    fn range_selection_takes_floor_of_fraction() {
        let features: Vec<RawFeature> = (0..10).map(|_| line(3)).collect();
        let config = config()
            .start_index(2)
            .displayed_fraction(0.5)
            .build()
            .unwrap();

        let network = build_network(&features, &config, &fixed).unwrap();
        let indices: Vec<usize> = network.roads().iter().map(Road::source_index).collect();

        assert_eq!(indices, vec![2, 3, 4, 5, 6]);
        assert_eq!(network.report().features_selected, 5);
        assert!(!network.report().range_clamped);
    }

    #[test]
    fn overrunning_range_is_clamped_by_default() {
        let features: Vec<RawFeature> = (0..10).map(|_| line(3)).collect();
        let config = config().start_index(8).build().unwrap();

        let network = build_network(&features, &config, &fixed).unwrap();
        let indices: Vec<usize> = network.roads().iter().map(Road::source_index).collect();

        assert_eq!(indices, vec![8, 9]);
        assert!(network.report().range_clamped);
    }

    #[test]
    fn overrunning_range_is_rejected_when_strict() {
        let features: Vec<RawFeature> = (0..10).map(|_| line(3)).collect();
        let config = config()
            .start_index(8)
            .range_policy(RangePolicy::Strict)
            .build()
            .unwrap();

        let err = build_network(&features, &config, &fixed).unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfiguration(_)));
    }

    #[test]
    fn start_past_end_or_zero_fraction_is_empty() {
        let features: Vec<RawFeature> = (0..4).map(|_| line(3)).collect();

        for config in [
            config().start_index(4).build().unwrap(),
            config()
                .start_index(9)
                .range_policy(RangePolicy::Strict)
                .build()
                .unwrap(),
            config().displayed_fraction(0.0).build().unwrap(),
        ] {
            let network = build_network(&features, &config, &fixed).unwrap();
            assert!(network.is_empty());
            assert_eq!(network.report().features_selected, 0);
        }

        let network = build_network(&[], &NetworkConfig::default(), &fixed).unwrap();
        assert!(network.is_empty());
    }

    #[test]
    fn sparse_features_never_appear() {
        let features = vec![line(0), line(1), line(3), line(4)];
        let config = config().min_vertices(3).build().unwrap();

        let network = build_network(&features, &config, &fixed).unwrap();
        let indices: Vec<usize> = network.roads().iter().map(Road::source_index).collect();

        assert_eq!(indices, vec![3]);
        assert_eq!(network.report().rejected_sparse, 3);
    }

    #[test]
    fn sparse_check_uses_raw_count_before_clipping() {
        // Three raw vertices, all outside the box; with min_vertices = 3 the
        // feature is dropped as sparse, not as clipped.
        let bbox = BoundingBox::new(Point3::new(100.0, 0.0, 0.0), Point3::new(200.0, 0.0, 0.0));
        let config = config().min_vertices(3).bbox(bbox).build().unwrap();

        let network = build_network(&[line(3)], &config, &fixed).unwrap();
        assert_eq!(network.report().rejected_sparse, 1);
        assert_eq!(network.report().rejected_clipped, 0);
    }

    #[test]
    fn stride_samples_every_nth_vertex() {
        let config = config().stride(3).build().unwrap();

        let network = build_network(&[line(9)], &config, &fixed).unwrap();
        assert_eq!(xs(&network.roads()[0]), vec![0.0, 3.0, 6.0]);
        assert_eq!(network.report().vertices_sampled, 3);
    }

    #[test]
    fn stride_always_keeps_the_first_vertex() {
        let config = config().stride(10).build().unwrap();

        let network = build_network(&[line(4)], &config, &fixed).unwrap();
        assert_eq!(xs(&network.roads()[0]), vec![0.0]);
    }

    #[test]
    fn vertices_on_box_faces_are_kept() {
        let bbox = BoundingBox::new(Point3::new(1.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0));
        let config = config().bbox(bbox).build().unwrap();

        let network = build_network(&[line(6)], &config, &fixed).unwrap();
        assert_eq!(xs(&network.roads()[0]), vec![1.0, 2.0, 3.0]);
        assert_eq!(network.report().vertices_clipped, 3);
    }

    #[test]
    fn acceptance_requires_strictly_more_than_min_vertices() {
        // Box keeps local x in [0, 2]: three in-box points.
        let bbox = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));

        let at_threshold = config().min_vertices(3).bbox(bbox).build().unwrap();
        let network = build_network(&[line(8)], &at_threshold, &fixed).unwrap();
        assert!(network.is_empty());
        assert_eq!(network.report().rejected_clipped, 1);

        let above_threshold = config().min_vertices(2).bbox(bbox).build().unwrap();
        let network = build_network(&[line(8)], &above_threshold, &fixed).unwrap();
        assert_eq!(network.len(), 1);
        assert_eq!(network.roads()[0].len(), 3);
    }

    #[test]
    fn builds_are_deterministic() {
        let features: Vec<RawFeature> = (0..20).map(|i| line(i % 7)).collect();
        let bbox = BoundingBox::new(Point3::new(1.0, -1.0, -1.0), Point3::new(4.0, 1.0, 1.0));
        let config = config()
            .min_vertices(1)
            .stride(2)
            .bbox(bbox)
            .build()
            .unwrap();

        let first = build_network(&features, &config, &TagAttributes::default()).unwrap();
        let second = build_network(&features, &config, &TagAttributes::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.report(), second.report());
    }

    #[test]
    fn output_order_follows_source_order() {
        let features: Vec<RawFeature> = (0..12).map(|i| line(1 + i % 4)).collect();
        let config = config().min_vertices(2).build().unwrap();

        let network = build_network(&features, &config, &fixed).unwrap();
        let indices: Vec<usize> = network.roads().iter().map(Road::source_index).collect();

        assert!(!indices.is_empty());
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn reprojection_flips_and_offsets() {
        let feature = RawFeature::new(vec![RawPosition::new(5.0, 3.0)]);

        let plain = config().build().unwrap();
        let network = build_network(&[feature.clone()], &plain, &fixed).unwrap();
        assert_eq!(network.roads()[0].points(), &[Point3::new(-5.0, 0.0, -3.0)]);

        let shifted = config().offset(Point3::new(5.0, 1.0, 3.0)).build().unwrap();
        let network = build_network(&[feature], &shifted, &fixed).unwrap();
        assert_eq!(network.roads()[0].points(), &[Point3::new(0.0, 1.0, 0.0)]);
    }

    #[test]
    fn attributes_are_requested_only_for_accepted_features() {
        let asked = RefCell::new(Vec::new());
        let recording = |feature: &RawFeature| -> Result<RoadAttributes, AttributeError> {
            asked.borrow_mut().push(feature.positions.len());
            Ok(RoadAttributes {
                width: 3.0,
                lane_count: 1,
            })
        };

        let features = vec![line(1), line(5), line(2), line(6)];
        let config = config().min_vertices(2).build().unwrap();

        let network = build_network(&features, &config, &recording).unwrap();
        assert_eq!(network.len(), 2);
        assert_eq!(*asked.borrow(), vec![5, 6]);
        assert_eq!(network.roads()[0].width(), 3.0);
    }

    #[test]
    fn attribute_failure_aborts_the_build() {
        let features = vec![line(5), line(5).with_width_hint("huge")];
        let config = config().build().unwrap();

        let err = build_network(&features, &config, &TagAttributes::strict()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::AttributeLookupFailed { index: 1, .. }
        ));
    }

    #[test]
    fn input_features_are_untouched() {
        let features = vec![line(5), line(2)];
        let before = features.clone();
        let config = config().stride(2).build().unwrap();

        build_network(&features, &config, &fixed).unwrap();
        assert_eq!(features, before);
    }
}
