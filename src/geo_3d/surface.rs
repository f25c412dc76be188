use std::collections::HashMap;

use crate::geo_3d::{Point, GeoVector};

/// A triangulated surface in 3D space. Contains vertices, edges, and faces, linked to each other.
#[derive(Debug, Clone)]
pub struct Surface {
    pub vertices: Vec<SurfaceVertex>,
    pub edges: Vec<SurfaceEdge>,
    pub faces: Vec<SurfaceFace>,
}
impl Surface {
    pub fn empty() -> Self {
        Surface{
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Build a linked surface from points and triangles (0-based vertex indices).
    /// Fails on out-of-range indices, degenerate triangles, or edges shared by more than two faces.
    pub fn from_triangles(points: &[Point], triangles: &[[usize; 3]]) -> Result<Self, String> {
        let mut surface = Surface::empty();
        for point in points.iter() {
            surface.vertices.push(SurfaceVertex::new_from_point(*point));
        }

        // Map each sorted vertex pair to its edge index
        let mut edge_indices = HashMap::<[usize; 2], usize>::new();

        for (face_id, triangle) in triangles.iter().enumerate() {
            if triangle.iter().any(|&v| v >= points.len()) {
                return Err(format!("Face {} references a vertex out of range ({} vertices)", face_id, points.len()));
            }
            if triangle[0] == triangle[1] || triangle[1] == triangle[2] || triangle[2] == triangle[0] {
                return Err(format!("Face {} is degenerate: {:?}", face_id, triangle));
            }

            let mut face_edges = [0; 3];
            for i in 0..3 {
                let edge = SurfaceEdge::new([triangle[i], triangle[(i + 1) % 3]]);
                let edge_idx = match edge_indices.get(&edge.vertices) {
                    Some(edge_idx) => *edge_idx,
                    None => {
                        let edge_idx = surface.edges.len();
                        edge_indices.insert(edge.vertices, edge_idx);
                        surface.edges.push(edge);
                        edge_idx
                    },
                };
                let adj_faces = &mut surface.edges[edge_idx].adj_faces;
                if adj_faces[0].is_none() {
                    adj_faces[0] = Some(face_id);
                } else if adj_faces[1].is_none() {
                    adj_faces[1] = Some(face_id);
                } else {
                    return Err(format!("Edge {:?} has more than 2 faces", surface.edges[edge_idx].vertices));
                }
                face_edges[i] = edge_idx;
            }

            let p1 = points[triangle[0]];
            let p2 = points[triangle[1]];
            let p3 = points[triangle[2]];
            let cross = (p2 - p1).cross(&(p3 - p1));
            surface.faces.push(SurfaceFace::new(*triangle, face_edges, cross, 0.5 * cross.norm()));
        }

        // Vertex adjacency
        for (edge_idx, edge) in surface.edges.iter().enumerate() {
            for vertex_idx in edge.vertices.iter() {
                surface.vertices[*vertex_idx].adj_edges.push(edge_idx);
            }
        }
        for (face_idx, face) in surface.faces.iter().enumerate() {
            for vertex_idx in face.vertices.iter() {
                surface.vertices[*vertex_idx].adj_faces.push(face_idx);
            }
        }

        // Area-weighted vertex normals
        for vertex_idx in 0..surface.vertices.len() {
            let mut normal = GeoVector::zero();
            for face_idx in surface.vertices[vertex_idx].adj_faces.iter() {
                let face = &surface.faces[*face_idx];
                normal += face.get_normal() * face.area;
            }
            if normal.norm() > 0.0 {
                surface.vertices[vertex_idx].normal = normal.normalize();
            }
        }

        Ok(surface)
    }

    /// Index of the other face sharing an edge with `face_idx`.
    /// Returns `None` when the edge is on the boundary.
    pub fn other_face(&self, edge_idx: usize, face_idx: usize) -> Option<usize> {
        let edge = &self.edges[edge_idx];
        match edge.adj_faces {
            [Some(a), Some(b)] if a == face_idx => Some(b),
            [Some(a), Some(b)] if b == face_idx => Some(a),
            _ => None,
        }
    }

    pub fn get_boundary_vertex_indices(&self) -> Vec<usize> {
        let mut boundary_vertex_indices = Vec::new();

        for edge in self.edges.iter() {
            if edge.adj_faces.iter().any(|f| f.is_none()) {
                boundary_vertex_indices.extend_from_slice(&edge.vertices);
            }
        }

        boundary_vertex_indices.sort();
        boundary_vertex_indices.dedup();
        boundary_vertex_indices
    }

    /// Total area of the surface.
    pub fn area(&self) -> f64 {
        self.faces.iter().map(|face| face.area).sum()
    }
}

#[derive(Debug, Clone)]
pub struct SurfaceVertex {
    pub point: Point,
    pub normal: GeoVector,
    pub adj_edges: Vec<usize>,
    pub adj_faces: Vec<usize>,
}
impl SurfaceVertex {
    pub fn new_from_point(point: Point) -> Self {
        SurfaceVertex{
            point,
            normal: GeoVector::zero(),
            adj_edges: Vec::new(),
            adj_faces: Vec::new(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct SurfaceEdge {
    pub vertices: [usize; 2],
    pub adj_faces: [Option<usize>; 2],
}
impl SurfaceEdge {
    pub fn new(vertices: [usize; 2]) -> Self {
        let mut vertices = vertices;
        vertices.sort();
        SurfaceEdge{
            vertices,
            adj_faces: [None, None],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SurfaceFace {
    pub vertices: [usize; 3],
    /// Edge `i` joins `vertices[i]` and `vertices[(i + 1) % 3]`.
    pub edges: [usize; 3],
    normal: GeoVector,
    pub area: f64,
}
impl SurfaceFace {
    pub fn new(vertices: [usize; 3], edges: [usize; 3], normal: GeoVector, area: f64) -> Self {
        SurfaceFace{
            vertices,
            edges,
            normal: normal.normalize(),
            area,
        }
    }

    /// Get the normal vector of the face. Normal vectors are private to guarantee that they are normalized.
    pub fn get_normal(&self) -> GeoVector {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Surface {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        Surface::from_triangles(&points, &[[0, 1, 2], [0, 2, 3]]).unwrap()
    }

    #[test]
    fn shared_edge_links_both_faces() {
        let surface = two_triangles();
        assert_eq!(surface.edges.len(), 5);
        let shared = surface.faces[0].edges[2];
        assert_eq!(surface.edges[shared].vertices, [0, 2]);
        assert_eq!(surface.other_face(shared, 0), Some(1));
        assert_eq!(surface.other_face(shared, 1), Some(0));
        assert_eq!(surface.other_face(surface.faces[0].edges[0], 0), None);
    }

    #[test]
    fn area_and_normals() {
        let surface = two_triangles();
        assert!((surface.area() - 1.0).abs() < 1e-12);
        for vertex in surface.vertices.iter() {
            assert!((vertex.normal.z - 1.0).abs() < 1e-12);
        }
        assert_eq!(surface.get_boundary_vertex_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn rejects_non_manifold_edge() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, -1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ];
        let result = Surface::from_triangles(&points, &[[0, 1, 2], [0, 1, 3], [0, 1, 4]]);
        assert!(result.is_err());
    }
}
