/*!
 * Face lookup helpers on zones and linked surfaces.
 */

use std::collections::HashMap;

use itertools::iproduct;

use crate::geo_3d::{Point, Surface};
use crate::tree::Node;

mod proc_errors;

pub use proc_errors::{
    FaceError,
    ProcResult,
    err_str,
};

type Cell = (i64, i64, i64);

fn grid_cell(point: &Point, spacing: f64) -> Cell {
    (
        (point.x / spacing).floor() as i64,
        (point.y / spacing).floor() as i64,
        (point.z / spacing).floor() as i64,
    )
}

/// Match every element of `faces` to the element of `zone` whose centre lies within `tol` of its own.
/// Unmatched elements map to `None`. When several candidates qualify, the closest wins.
pub fn identify_faces(zone: &Node, faces: &Node, tol: f64) -> ProcResult<Vec<Option<usize>>> {
    if tol.is_nan() || tol <= 0.0 {
        return err_str(&format!("Face matching tolerance must be positive, got {}", tol));
    }
    let zone_centers = zone.cell_centers()?;
    let face_centers = faces.cell_centers()?;

    // Grid spacing of at least tol keeps every candidate within the neighbouring cells
    let mut grid = HashMap::<Cell, Vec<usize>>::new();
    for (idx, center) in zone_centers.iter().enumerate() {
        grid.entry(grid_cell(center, tol)).or_default().push(idx);
    }

    let matches = face_centers.iter()
        .map(|center| {
            let (i, j, k) = grid_cell(center, tol);
            iproduct!(-1..=1, -1..=1, -1..=1)
                .filter_map(|(di, dj, dk)| grid.get(&(i + di, j + dj, k + dk)))
                .flatten()
                .map(|&idx| (idx, zone_centers[idx].distance(center)))
                .filter(|(_, distance)| *distance <= tol)
                .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
                .map(|(idx, _)| idx)
        })
        .collect();
    Ok(matches)
}

/// The face across the `local_edge`-th edge of `face`, or `None` on a boundary edge.
pub fn face_opposite_of_edge(surface: &Surface, face: usize, local_edge: usize) -> ProcResult<Option<usize>> {
    let surface_face = surface.faces.get(face)
        .ok_or(FaceError::OutOfRange{what: "Face", index: face, len: surface.faces.len()})?;
    let edge = surface_face.edges.get(local_edge)
        .ok_or(FaceError::OutOfRange{what: "Local edge", index: local_edge, len: surface_face.edges.len()})?;
    Ok(surface.other_face(*edge, face))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementBlock;

    /// Unit square split in four triangles around its centre.
    fn fan() -> Node {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.5, 0.5, 0.0),
        ];
        Node::new_zone("fan", &points, &ElementBlock::triangles(&[[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]]))
    }

    #[test]
    fn faces_found_on_shared_mesh() {
        let zone = fan();
        let points = zone.points().unwrap();
        // Two of the fan triangles, listed in another order with another vertex numbering
        let subset = Node::new_zone(
            "subset",
            &[points[4], points[2], points[3], points[1]],
            &ElementBlock::triangles(&[[1, 2, 0], [3, 1, 0], [0, 1, 2]]),
        );
        let matches = identify_faces(&zone, &subset, 1e-9).unwrap();
        assert_eq!(matches, vec![Some(2), Some(1), Some(2)]);
    }

    #[test]
    fn unmatched_faces_are_none() {
        let zone = fan();
        let far = Node::new_zone(
            "far",
            &[Point::new(5.0, 5.0, 5.0), Point::new(6.0, 5.0, 5.0), Point::new(5.0, 6.0, 5.0)],
            &ElementBlock::triangles(&[[0, 1, 2]]),
        );
        assert_eq!(identify_faces(&zone, &far, 1e-6).unwrap(), vec![None]);
        assert!(identify_faces(&zone, &far, 0.0).is_err());
    }

    #[test]
    fn opposite_faces_across_edges() {
        let surface = fan().to_surface().unwrap();
        // Edge 1 of face 0 joins vertices 1 and 4, shared with face 1
        assert_eq!(face_opposite_of_edge(&surface, 0, 1).unwrap(), Some(1));
        // Edge 2 of face 0 joins vertices 4 and 0, shared with face 3
        assert_eq!(face_opposite_of_edge(&surface, 0, 2).unwrap(), Some(3));
        // Edge 0 of face 0 is on the square boundary
        assert_eq!(face_opposite_of_edge(&surface, 0, 0).unwrap(), None);
        assert!(face_opposite_of_edge(&surface, 4, 0).is_err());
        assert!(face_opposite_of_edge(&surface, 0, 3).is_err());
    }
}
