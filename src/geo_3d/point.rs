use std::ops::{
    Add, AddAssign,
    Sub,
};
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::geo_3d::{Axis, GeoVector, Plane};

/// A point in 3D space.
/// Has basic math support for adding and subtracting vectors.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point{x, y, z}
    }

    /// Create a new zero point.
    pub fn zero() -> Self {
        Point{x: 0.0, y: 0.0, z: 0.0}
    }

    /// Coordinate along an axis.
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Get the distance between two points.
    pub fn distance(&self, other: &Point) -> f64 {
        (*self - *other).norm()
    }

    /// Get the index of the nearest point in a list, `None` if the list is empty.
    pub fn nearest_idx(&self, points: &[Point]) -> Option<usize> {
        let mut min_dist = f64::MAX;
        let mut min_idx = None;
        for (idx, point) in points.iter().enumerate() {
            let dist = self.distance(point);
            if dist < min_dist {
                min_dist = dist;
                min_idx = Some(idx);
            }
        }
        min_idx
    }

    /// Centroid of a set of points. The zero point for an empty set.
    pub fn centroid(points: &[Point]) -> Point {
        if points.is_empty() {
            return Point::zero();
        }
        let mut sum = GeoVector::zero();
        for point in points.iter() {
            sum += GeoVector::from(*point);
        }
        Point::from(sum * (1.0 / points.len() as f64))
    }

    /// Reflect this point across a plane.
    pub fn reflect_across(&self, plane: &Plane) -> Point {
        let dist = plane.distance_to_point(self);
        *self - plane.get_normal() * 2.0 * dist
    }
}
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        write!(f, "({:.*}, {:.*}, {:.*})", precision, self.x, precision, self.y, precision, self.z)
    }
}
impl Add<GeoVector> for Point {
    type Output = Self;

    fn add(self, rhs: GeoVector) -> Self {
        Point{
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}
impl AddAssign<GeoVector> for Point {
    fn add_assign(&mut self, rhs: GeoVector) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}
impl Sub<GeoVector> for Point {
    type Output = Self;

    fn sub(self, rhs: GeoVector) -> Self {
        Point{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}
impl Sub<Point> for Point {
    type Output = GeoVector;

    fn sub(self, rhs: Self) -> GeoVector {
        GeoVector{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}
impl From<GeoVector> for Point {
    fn from(vector: GeoVector) -> Self {
        Point{
            x: vector.x,
            y: vector.y,
            z: vector.z,
        }
    }
}
impl From<[f64; 3]> for Point {
    fn from(coords: [f64; 3]) -> Self {
        Point{x: coords[0], y: coords[1], z: coords[2]}
    }
}
