//! Local-frame points, the clipping volume and the geographic-to-local transform.

use serde::Serialize;

use crate::feature::RawPosition;

/// A point in the local scene frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ZERO: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl std::ops::Add for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Axis-aligned clipping volume in the local frame.
///
/// `min <= max` per axis is assumed, not checked: a box with `min > max` on
/// some axis simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Box that contains every finite point.
    pub const EVERYTHING: BoundingBox = BoundingBox {
        min: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        max: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
    };

    #[inline]
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Inclusive containment test on all three axes.
    #[inline]
    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EVERYTHING
    }
}

/// Map a geographic position into the local frame.
///
/// Longitude and latitude are negated onto X and Z, elevation is fixed at
/// zero, then `offset` is added.
#[inline]
pub fn to_local(position: &RawPosition, offset: &Point3) -> Point3 {
    Point3::new(-position.longitude, 0.0, -position.latitude) + *offset
}
