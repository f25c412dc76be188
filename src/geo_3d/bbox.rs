use std::fmt;
use serde::{Serialize, Deserialize};

use crate::geo_3d::{Axis, Point};

/// Axis-aligned bounding box, stored as `[xmin, ymin, zmin]` and `[xmax, ymax, zmax]`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}
impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        BoundingBox{min, max}
    }

    /// Smallest box containing all the points. `None` for an empty set.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox::new([first.x, first.y, first.z], [first.x, first.y, first.z]);
        for point in points.iter().skip(1) {
            bbox.include(point);
        }
        Some(bbox)
    }

    /// Grow the box to contain a point.
    pub fn include(&mut self, point: &Point) {
        let coords = [point.x, point.y, point.z];
        for i in 0..3 {
            self.min[i] = self.min[i].min(coords[i]);
            self.max[i] = self.max[i].max(coords[i]);
        }
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    /// Box grown by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> BoundingBox {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] -= margin;
            out.max[i] += margin;
        }
        out
    }

    /// Extent along an axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        self.max[axis.index()] - self.min[axis.index()]
    }

    /// Largest extent over the three axes.
    pub fn size_max(&self) -> f64 {
        (0..3).map(|i| self.max[i] - self.min[i]).fold(0.0, f64::max)
    }

    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.min[0] + self.max[0]),
            0.5 * (self.min[1] + self.max[1]),
            0.5 * (self.min[2] + self.max[2]),
        )
    }

    /// Flattened `[xmin, ymin, zmin, xmax, ymax, zmax]`.
    pub fn to_array(&self) -> [f64; 6] {
        [self.min[0], self.min[1], self.min[2], self.max[0], self.max[1], self.max[2]]
    }
}
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?} -> {:?}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_and_size() {
        let points = vec![Point::new(0.0, -1.0, 2.0), Point::new(3.0, 1.0, 2.5)];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox.to_array(), [0.0, -1.0, 2.0, 3.0, 1.0, 2.5]);
        assert_eq!(bbox.size_max(), 3.0);
        assert_eq!(bbox.center(), Point::new(1.5, 0.0, 2.25));
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn union_and_expand() {
        let a = BoundingBox::new([0.0; 3], [1.0; 3]);
        let b = BoundingBox::new([-1.0, 0.5, 0.5], [0.5, 2.0, 0.5]);
        let u = a.union(&b).expanded(0.5);
        assert_eq!(u.to_array(), [-1.5, -0.5, -0.5, 1.5, 2.5, 1.5]);
    }
}
