/*!
 * Geometric primitives used by the case-setup operations.
 * Adding new kernels should be done here.
 *
 * New kernels need:
 * - A struct implementing `GeometryKernel`
 * - An enum variant containing that struct in `KernelChoice`
 * - A constructor arg_name and function in `KERNEL_CONSTRUCTION`
 *
 */

use enum_dispatch::enum_dispatch;
use serde::{Serialize, Deserialize};

use crate::geo_3d::{BoundingBox, GeoVector, Point};
use crate::tree::Node;

mod proc_errors;
mod basic;

pub use proc_errors::{
    KernelError,
    ProcResult,
    err_str,
};

/// Kernels enum.
/// To add a new kernel:
/// include it here,
/// add handling for its constructor in `KERNEL_CONSTRUCTION`,
/// and implement the `GeometryKernel` trait for it.
#[derive(Debug)]
#[enum_dispatch(GeometryKernel)]
pub enum KernelChoice {
    /// Reference kernel on unstructured zones.
    Basic(basic::Kernel),
}

const KERNEL_CONSTRUCTION: &[KernelConstructor] = &[
    KernelConstructor{
        arg_name: "basic",
        constructor: || {Ok(KernelChoice::Basic(basic::Kernel::new()))},
    },
];

/// Octree summary returned by `GeometryKernel::octree_from_sizing`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octree {
    /// Bounding box of the root cell.
    pub bbox: BoundingBox,
    /// Size of the finest cells.
    pub finest_size: f64,
    /// Number of halvings from the root cell to the finest cells.
    pub levels: u32,
}

/// Sizing inputs of one zone. Missing values exclude the zone from that part of the computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneSizing {
    pub snear: Option<f64>,
    pub dfar: Option<f64>,
}

/// Geometry kernel trait.
/// To add a new kernel:
/// include it in the `KernelChoice` enum,
/// add handling for its constructor in `KERNEL_CONSTRUCTION`,
/// and implement this trait for it.
#[enum_dispatch]
pub trait GeometryKernel {
    /// Get the name of the kernel.
    fn get_kernel_name(&self) -> String;

    /// Build a far-field octree around the zones. `sizing[i]` belongs to `zones[i]`.
    fn octree_from_sizing(&self, zones: &[&Node], sizing: &[ZoneSizing]) -> ProcResult<Octree>;

    /// Bounding box of all vertices of the zones.
    fn bounding_box(&self, zones: &[&Node]) -> ProcResult<BoundingBox>;

    /// Mirror copies of the zones across the plane through `origin` spanned by `v1` and `v2`.
    fn reflect(&self, zones: &[&Node], origin: Point, v1: GeoVector, v2: GeoVector) -> ProcResult<Vec<Node>>;

    /// Reorder the local vertices of every element: new slot `k` takes old slot `permutation[k]`.
    fn reverse_orientation(&self, zones: &mut [Node], permutation: &[usize]) -> ProcResult<()>;

    /// Closed box surface zone over the given bounds.
    fn box_zone(&self, name: &str, bbox: &BoundingBox) -> ProcResult<Node>;
}

/// Kernel constructor.
struct KernelConstructor {
    /// Name of the kernel.
    arg_name: &'static str,
    /// Constructor function.
    constructor: fn() -> ProcResult<KernelChoice>,
}

impl KernelChoice {
    /// Construct a kernel from a name (given in the case file).
    pub fn from_name(arg_name: &str) -> ProcResult<Self> {
        for constructor in KERNEL_CONSTRUCTION {
            if constructor.arg_name == arg_name {
                return (constructor.constructor)();
            }
        }

        let mut error_str = format!("Geometry kernel not found: {arg_name}\n");
        error_str.push_str("Available kernels:\n");
        for constructor in KERNEL_CONSTRUCTION {
            error_str.push_str(&format!("    {}\n", constructor.arg_name));
        }
        err_str(&error_str)
    }

    /// Names of all registered kernels.
    pub fn available() -> Vec<&'static str> {
        KERNEL_CONSTRUCTION.iter().map(|c| c.arg_name).collect()
    }
}

/// Local vertex permutation that flips the orientation of an element with `nodes_per_element` vertices.
/// The first vertex is kept, the rest are reversed.
pub fn flip_permutation(nodes_per_element: usize) -> Vec<usize> {
    let mut permutation = vec![0];
    permutation.extend((1..nodes_per_element).rev());
    permutation.truncate(nodes_per_element);
    permutation
}
