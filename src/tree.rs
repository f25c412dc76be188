/*!
 * Hierarchical case tree.
 *
 * A tree is a root `Node` holding bases, which hold zones. Each zone holds its
 * grid, its solver settings (`.Solver#define`) and its boundary-condition
 * sub-regions. Lookup is by name or by kind, at depth 1, depth <= 2, or any depth.
 */

mod node;
mod zone;
mod proc_errors;

pub use node::{
    Node,
    NodeKind,
    NodeValue,
};
pub use zone::{
    ElementBlock,
    CENTERS_CONTAINER,
    COORDINATES_CONTAINER,
    ELEMENTS_CONTAINER,
    VERTEX_CONTAINER,
    CELL_VALIDITY,
};
pub use proc_errors::{
    TreeError,
    ProcResult,
    err_str,
    not_found,
};

/// Name of the per-zone solver settings container.
pub const SOLVER_DEFINE: &str = ".Solver#define";
