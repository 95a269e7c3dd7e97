//! roadnet: turns geographic road lines into clipped, decimated in-scene polylines.
//!
//! Pipeline (one pass, one direction):
//!   FeatureSource -> build_network -> Network (Vec<Road>) -> NetworkDisplay
//!
//! Per build:
//!   - candidates: features[start_index .. start_index + floor(len * displayed_fraction))
//!   - drop a feature with <= min_vertices raw vertices
//!   - take vertices 0, stride, 2*stride, ...
//!   - local point = (-lon, 0, -lat) + offset
//!   - keep points inside the bbox (inclusive per axis)
//!   - accept the feature if more than min_vertices points were kept
//!
//! Accepted roads keep source order and carry the index of their feature.

pub mod attributes;
pub mod builder;
pub mod config;
pub mod display;
pub mod error;
pub mod feature;
pub mod geojson;
pub mod geometry;
pub mod manager;
pub mod road;

pub use attributes::{AttributeError, AttributeProvider, RoadAttributes, TagAttributes};
pub use builder::build_network;
pub use config::{ConfigError, NetworkConfig, NetworkConfigBuilder, RangePolicy};
pub use display::{LogDisplay, NetworkDisplay};
pub use error::BuildError;
pub use feature::{FeatureSource, RawFeature, RawPosition, SourceError};
pub use geojson::GeoJsonSource;
pub use geometry::{BoundingBox, Point3};
pub use manager::NetworkManager;
pub use road::{BuildReport, Network, Road};
