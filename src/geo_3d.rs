mod point;
mod vector;
mod plane;
mod bbox;
mod surface;

use serde::{Serialize, Deserialize};
use strum::{Display, EnumIter, EnumString};

pub use point::Point;
pub use vector::GeoVector;
pub use plane::Plane;
pub use bbox::BoundingBox;
pub use surface::{
    Surface,
    SurfaceVertex,
    SurfaceEdge,
    SurfaceFace,
};

/// Principal axis of the Cartesian frame.
/// Used to pick symmetry planes and coordinate components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}
impl Axis {
    /// Index of the axis in `[x, y, z]`.
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the axis.
    pub fn unit(&self) -> GeoVector {
        match self {
            Axis::X => GeoVector::xhat(),
            Axis::Y => GeoVector::yhat(),
            Axis::Z => GeoVector::zhat(),
        }
    }

    /// The two basis vectors spanning the plane normal to this axis.
    pub fn in_plane_basis(&self) -> (GeoVector, GeoVector) {
        match self {
            Axis::X => (GeoVector::yhat(), GeoVector::zhat()),
            Axis::Y => (GeoVector::xhat(), GeoVector::zhat()),
            Axis::Z => (GeoVector::xhat(), GeoVector::yhat()),
        }
    }
}
