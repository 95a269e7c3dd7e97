//! Renderer seam. The core hands over completed road lists only.

use log::{debug, info};

use crate::road::Road;

/// Consumes the roads of a finished build.
pub trait NetworkDisplay {
    fn display_network(&mut self, roads: &[Road]);
}

/// Renderer that writes a summary to the log.
#[derive(Debug, Default)]
pub struct LogDisplay {
    displayed: usize,
}

impl LogDisplay {
    /// Number of `display_network` calls so far.
    pub fn displayed(&self) -> usize {
        self.displayed
    }
}

impl NetworkDisplay for LogDisplay {
    fn display_network(&mut self, roads: &[Road]) {
        self.displayed += 1;

        let vertices: usize = roads.iter().map(Road::len).sum();
        let length: f64 = roads.iter().map(Road::length).sum();

        info!(
            "Displaying {} roads ({} vertices, {:.3} units of centreline)",
            roads.len(),
            vertices,
            length
        );

        for road in roads {
            debug!(
                "Road from feature {}: {} points, width {:.2}, {} lanes",
                road.source_index(),
                road.len(),
                road.width(),
                road.lane_count()
            );
        }
    }
}
