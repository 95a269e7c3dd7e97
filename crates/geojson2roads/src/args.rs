use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use roadnet::{BoundingBox, NetworkConfig, Point3, RangePolicy};

/// `geojson2roads` - builds in-scene road polylines from a GeoJSON road layer.
///
/// Reads a FeatureCollection of LineString/MultiLineString roads, keeps a
/// slice of the features, decimates and reprojects their vertices, clips them
/// to a box and reports the accepted roads.
#[derive(Parser, Debug, Clone)]
#[command(name = "geojson2roads", version, about, long_about = None)]
pub struct Args {
    /// GeoJSON FeatureCollection with the road lines.
    #[arg(env = "ROADNET_INPUT")]
    pub input: PathBuf,

    /// Ignore all features before this index.
    #[arg(long, env = "ROADNET_START_INDEX", default_value_t = 0)]
    pub start_index: usize,

    /// Features with this many vertices or fewer are dropped (0..=10).
    #[arg(long, env = "ROADNET_MIN_VERTICES", default_value_t = 3)]
    pub min_vertices: usize,

    /// Fraction of the feature count to process, starting at --start-index (0..=1).
    #[arg(long, env = "ROADNET_DISPLAYED_FRACTION", default_value_t = 1.0)]
    pub displayed_fraction: f64,

    /// Keep every Nth vertex of each road (1..=10).
    #[arg(long, env = "ROADNET_STRIDE", default_value_t = 1)]
    pub stride: usize,

    /// Offset added to every reprojected vertex, as `x,y,z`.
    #[arg(
        long,
        env = "ROADNET_OFFSET",
        value_parser = parse_point,
        default_value = "0,0,0",
        allow_hyphen_values = true
    )]
    pub offset: Point3,

    /// Lower corner of the clipping box, as `x,y,z`. Unbounded if omitted.
    #[arg(
        long,
        env = "ROADNET_BBOX_MIN",
        value_parser = parse_point,
        allow_hyphen_values = true
    )]
    pub bbox_min: Option<Point3>,

    /// Upper corner of the clipping box, as `x,y,z`. Unbounded if omitted.
    #[arg(
        long,
        env = "ROADNET_BBOX_MAX",
        value_parser = parse_point,
        allow_hyphen_values = true
    )]
    pub bbox_max: Option<Point3>,

    /// Fail instead of clamping when the selected range runs past the last feature.
    #[arg(long, default_value_t = false)]
    pub strict_range: bool,

    /// Fail on unparseable `width`/`lanes` tags instead of deriving them.
    #[arg(long, default_value_t = false)]
    pub strict_tags: bool,

    /// Write the accepted roads as JSON to this path (`-` for stdout).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Args {
    pub fn network_config(&self) -> Result<NetworkConfig> {
        let bbox = BoundingBox::new(
            self.bbox_min.unwrap_or(BoundingBox::EVERYTHING.min),
            self.bbox_max.unwrap_or(BoundingBox::EVERYTHING.max),
        );

        let range_policy = if self.strict_range {
            RangePolicy::Strict
        } else {
            RangePolicy::Clamp
        };

        NetworkConfig::builder()
            .start_index(self.start_index)
            .min_vertices(self.min_vertices)
            .displayed_fraction(self.displayed_fraction)
            .stride(self.stride)
            .offset(self.offset)
            .bbox(bbox)
            .range_policy(range_policy)
            .build()
            .context("Invalid network configuration")
    }
}

/// Parse `x,y,z` into a point.
fn parse_point(s: &str) -> Result<Point3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got {:?}", s));
    };

    let parse = |v: &str| {
        v.parse::<f64>()
            .map_err(|e| format!("bad coordinate {:?}: {}", v, e))
    };

    Ok(Point3::new(parse(*x)?, parse(*y)?, parse(*z)?))
}
