use stl_io;

use crate::io;
use crate::geo_3d::{Point, Surface};
use crate::tree::Node;

/// Load a STL file (binary or ASCII) as a linked surface.
/// Uses the external `stl_io` crate.
pub fn load_stl(filename: &str) -> io::IoResult<Surface> {
    let mut file = io::open(filename)?;
    let stl = stl_io::read_stl(&mut file)
        .map_err(|error| io::IoError{file: Some(filename.to_string()), cause: io::IoErrorType::File(error)})?;

    let points = stl.vertices.iter()
        .map(|vertex| Point::new(vertex[0] as f64, vertex[1] as f64, vertex[2] as f64))
        .collect::<Vec<_>>();
    let triangles = stl.faces.iter()
        .map(|face| face.vertices)
        .collect::<Vec<_>>();

    Surface::from_triangles(&points, &triangles)
        .map_err(|error| io::IoError{file: Some(filename.to_string()), cause: io::IoErrorType::StringOnly(error)})
}

/// Load a STL file as a triangulated zone.
pub fn load_stl_zone(filename: &str, zone_name: &str) -> io::IoResult<Node> {
    Ok(Node::from_surface(zone_name, &load_stl(filename)?))
}

/// Save a triangulated zone to a binary STL file.
/// Uses the external `stl_io` crate.
pub fn save_stl(zone: &Node, output_path: &str) -> io::IoResult<()> {
    let surface = zone.to_surface()
        .map_err(|error| io::IoError{file: Some(output_path.to_string()), cause: io::IoErrorType::StringOnly(error.to_string())})?;

    let vector = |p: &Point| stl_io::Vector::new([p.x as f32, p.y as f32, p.z as f32]);
    let triangles = surface.faces.iter()
        .map(|face| {
            let normal = face.get_normal();
            stl_io::Triangle{
                normal: stl_io::Vector::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: face.vertices.map(|v| vector(&surface.vertices[v].point)),
            }
        })
        .collect::<Vec<_>>();

    let mut f = io::create(output_path)?;
    stl_io::write_stl(&mut f, triangles.iter())
        .map_err(|error| io::IoError{file: Some(output_path.to_string()), cause: io::IoErrorType::File(error)})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementBlock;

    #[test]
    fn zone_round_trips_through_stl() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ];
        let zone = Node::new_zone("tet", &points, &ElementBlock::triangles(&[[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]]));
        let path = std::env::temp_dir().join("ibmprep_tet.stl").to_string_lossy().to_string();
        save_stl(&zone, &path).unwrap();

        let surface = load_stl(&path).unwrap();
        assert_eq!(surface.vertices.len(), 4);
        assert_eq!(surface.faces.len(), 4);
        assert_eq!(surface.edges.len(), 6);
        assert!(surface.get_boundary_vertex_indices().is_empty());
        assert!((surface.area() - (1.5 + 0.75f64.sqrt())).abs() < 1e-6);

        let loaded = load_stl_zone(&path, "body").unwrap();
        assert_eq!(loaded.name, "body");
        assert_eq!(loaded.cell_count().unwrap(), 4);
    }

    #[test]
    fn missing_stl_reports_path() {
        let error = load_stl("nowhere/body.stl").unwrap_err();
        assert_eq!(error.file.as_deref(), Some("nowhere/body.stl"));
    }
}
