/*!
 * Half-domain cases with a symmetry plane.
 *
 * The body is mirrored across a principal plane through the origin, the mirrored
 * zones are blanked, and a slip box closing the half domain is added in base `SYM`.
 */

use tracing::info;

use crate::geo_3d::{Axis, BoundingBox, Point};
use crate::ibc::IbcType;
use crate::kernel::{GeometryKernel, KernelChoice, ZoneSizing, flip_permutation};
use crate::sizing::{set_dfar, set_ibc_type, set_snear, zone_sizing};
use crate::tree::{Node, NodeKind, CELL_VALIDITY, not_found};

mod proc_errors;

pub use proc_errors::{
    SymmetryError,
    ProcResult,
    err_str,
};

/// Appended to the name of every mirrored zone.
pub const MIRROR_SUFFIX: &str = "_sym";
pub const SYMMETRY_BASE: &str = "SYM";
pub const SYMMETRY_ZONE: &str = "sym";

/// Near spacing multiplier used when sizing the octree around the body.
const SNEAR_FACTOR: f64 = 50.0;
/// Margin around the octree, relative to its largest half-extent.
const MARGIN_RATIO: f64 = 0.2;
/// Cells of the box with a centre coordinate above this are valid.
const VALIDITY_THRESHOLD: f64 = -1e-8;

/// Mirror the body named `body_name` across the plane normal to `axis` and close the
/// half domain with a symmetry box. Returns the number of mirrored zones.
pub fn build_symmetric_case(
    tree: &mut Node,
    kernel: &KernelChoice,
    body_name: &str,
    snear_sym: f64,
    axis: Axis,
) -> ProcResult<usize> {
    let mirrored = symmetrize_body(tree, kernel, body_name, axis)?;
    let bounds = add_symmetry_plane(tree, kernel, snear_sym, axis)?;
    info!("Symmetric case on axis {}: {} zones mirrored, symmetry box {}", axis, mirrored, bounds);
    Ok(mirrored)
}

/// Flag every zone of the body valid, then append blanked mirror images with flipped orientation.
pub fn symmetrize_body(tree: &mut Node, kernel: &KernelChoice, body_name: &str, axis: Axis) -> ProcResult<usize> {
    let tree_name = tree.name.clone();
    let body = tree.find_mut(body_name).ok_or_else(|| not_found(body_name, &tree_name))?;
    if body.kind == NodeKind::Zone {
        return err_str(&format!("Body {} is a zone, a container of zones is expected", body_name));
    }

    for zone in body.zones_mut() {
        zone.init_center_field(CELL_VALIDITY, 1.0)?;
    }

    let (v1, v2) = axis.in_plane_basis();
    let mut mirrored = kernel.reflect(&body.zones(), Point::zero(), v1, v2)?;
    for zone in mirrored.iter_mut() {
        zone.name.push_str(MIRROR_SUFFIX);
        let permutation = flip_permutation(zone.element_block()?.nodes_per_element);
        kernel.reverse_orientation(std::slice::from_mut(zone), &permutation)?;
        zone.init_center_field(CELL_VALIDITY, 0.0)?;
    }

    let count = mirrored.len();
    body.children.extend(mirrored);
    Ok(count)
}

/// Add the symmetry box zone to base `SYM`, sized from the octree around every zone of the tree.
/// Returns the bounds of the box.
pub fn add_symmetry_plane(tree: &mut Node, kernel: &KernelChoice, snear_sym: f64, axis: Axis) -> ProcResult<BoundingBox> {
    let (zones, sizing): (Vec<&Node>, Vec<ZoneSizing>) = tree.zones()
        .into_iter()
        .map(|zone| {
            let sizing = zone_sizing(zone);
            (zone, ZoneSizing{snear: sizing.snear.map(|snear| snear * SNEAR_FACTOR), dfar: sizing.dfar})
        })
        .unzip();
    let octree = kernel.octree_from_sizing(&zones, &sizing)?;

    let margin = MARGIN_RATIO * 0.5 * octree.bbox.size_max();
    let mut bounds = octree.bbox.expanded(margin);
    bounds.max[axis.index()] = 0.0;

    let mut plane = kernel.box_zone(SYMMETRY_ZONE, &bounds)?;
    let validity = plane.cell_centers()?
        .iter()
        .map(|center| if center.coord(axis) > VALIDITY_THRESHOLD { 1.0 } else { 0.0 })
        .collect();
    plane.set_center_field(CELL_VALIDITY, validity)?;

    let base = tree.ensure_child(SYMMETRY_BASE, NodeKind::Base);
    base.remove_children_named(SYMMETRY_ZONE);
    base.add_child(plane);
    set_snear(base, snear_sym);
    set_dfar(base, -1.0);
    set_ibc_type(base, IbcType::Slip);
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ElementBlock, NodeValue, SOLVER_DEFINE};

    /// Closed tetrahedron above the `y = 0` plane, in base `Body`.
    fn body_tree() -> Node {
        let points = vec![
            Point::new(0.0, 0.5, 0.0),
            Point::new(1.0, 0.5, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.5, 1.0),
        ];
        let block = ElementBlock::triangles(&[[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]]);
        let mut base = Node::new_base("Body");
        base.add_child(Node::new_zone("wing", &points, &block));
        let mut tree = Node::new_tree().with_child(base);
        set_snear(&mut tree, 0.1);
        set_dfar(&mut tree, 2.0);
        tree
    }

    fn kernel() -> KernelChoice {
        KernelChoice::from_name("basic").unwrap()
    }

    #[test]
    fn mirrored_zones_are_blanked() {
        let mut tree = body_tree();
        assert_eq!(build_symmetric_case(&mut tree, &kernel(), "Body", 0.5, Axis::Y).unwrap(), 1);

        let body = tree.require_child("Body").unwrap();
        assert_eq!(body.child_names(), vec!["wing", "wing_sym"]);
        let wing = body.require_child("wing").unwrap();
        let mirror = body.require_child("wing_sym").unwrap();
        assert!(wing.center_field(CELL_VALIDITY).unwrap().iter().all(|v| *v == 1.0));
        assert!(mirror.center_field(CELL_VALIDITY).unwrap().iter().all(|v| *v == 0.0));
        assert_eq!(mirror.center_field(CELL_VALIDITY).unwrap().len(), 4);

        let original = wing.points().unwrap();
        let reflected = mirror.points().unwrap();
        for (p, q) in original.iter().zip(reflected.iter()) {
            assert_eq!((q.x, q.y, q.z), (p.x, -p.y, p.z));
        }
        assert_eq!(&mirror.element_block().unwrap().connectivity[..3], &[0, 1, 2]);
    }

    #[test]
    fn symmetry_box_closes_half_domain() {
        let mut tree = body_tree();
        build_symmetric_case(&mut tree, &kernel(), "Body", 0.5, Axis::Y).unwrap();

        let base = tree.require_child(SYMMETRY_BASE).unwrap();
        assert_eq!(base.kind, NodeKind::Base);
        let plane = base.require_child(SYMMETRY_ZONE).unwrap();
        let define = plane.require_child(SOLVER_DEFINE).unwrap();
        assert_eq!(define.require_child("snear").unwrap().value, NodeValue::Real(0.5));
        assert_eq!(define.require_child("dfar").unwrap().value, NodeValue::Real(-1.0));
        assert_eq!(define.require_child("ibctype").unwrap().value, NodeValue::Text("slip".to_string()));

        let bbox = kernel().bounding_box(&[plane]).unwrap();
        let expected = BoundingBox::new([-5.5, -6.0, -5.5], [6.5, 0.0, 6.5]);
        for (found, wanted) in bbox.to_array().iter().zip(expected.to_array().iter()) {
            assert!((found - wanted).abs() < 1e-12, "{} vs {}", bbox, expected);
        }

        let validity = plane.center_field(CELL_VALIDITY).unwrap();
        assert_eq!(validity.len(), 12);
        assert_eq!(validity.iter().sum::<f64>(), 2.0);
        for (center, valid) in plane.cell_centers().unwrap().iter().zip(validity.iter()) {
            assert_eq!(*valid == 1.0, center.y > -1e-8);
        }
    }

    #[test]
    fn existing_symmetry_base_is_reused() {
        let mut tree = body_tree();
        tree.add_child(Node::new_base(SYMMETRY_BASE));
        build_symmetric_case(&mut tree, &kernel(), "Body", 0.5, Axis::Z).unwrap();
        assert_eq!(tree.children_by_kind(NodeKind::Base).count(), 2);
        assert_eq!(tree.require_child(SYMMETRY_BASE).unwrap().child_names(), vec![SYMMETRY_ZONE]);
    }

    #[test]
    fn missing_or_zone_body_is_rejected() {
        let mut tree = body_tree();
        assert!(matches!(
            build_symmetric_case(&mut tree, &kernel(), "Fuselage", 0.5, Axis::Y),
            Err(SymmetryError::TreeError(_)),
        ));
        assert!(build_symmetric_case(&mut tree, &kernel(), "wing", 0.5, Axis::Y).is_err());
        assert!(tree.child(SYMMETRY_BASE).is_none());
    }
}
