use crate::geo_3d::{Point, Surface};
use crate::tree::{
    Node,
    NodeKind,
    NodeValue,
    ProcResult,
    TreeError,
    not_found,
};

/// Grid coordinates container name.
pub const COORDINATES_CONTAINER: &str = "GridCoordinates";
/// Element block container name.
pub const ELEMENTS_CONTAINER: &str = "GridElements";
/// Cell-centred fields container name.
pub const CENTERS_CONTAINER: &str = "FlowSolution#Centers";
/// Vertex fields container name.
pub const VERTEX_CONTAINER: &str = "FlowSolution";
/// Cell validity (blanking) field name.
pub const CELL_VALIDITY: &str = "cellN";

const CONNECTIVITY: &str = "ElementConnectivity";
const COORDINATE_NAMES: [&str; 3] = ["CoordinateX", "CoordinateY", "CoordinateZ"];

/// Unstructured element block of a single element type.
/// Connectivity is flat and 0-based, `nodes_per_element` entries per element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBlock {
    pub nodes_per_element: usize,
    pub connectivity: Vec<usize>,
}
impl ElementBlock {
    pub fn new(nodes_per_element: usize, connectivity: Vec<usize>) -> Result<Self, String> {
        if nodes_per_element == 0 || connectivity.len() % nodes_per_element != 0 {
            return Err(format!(
                "Connectivity length {} is not a multiple of {} nodes per element",
                connectivity.len(), nodes_per_element,
            ));
        }
        Ok(ElementBlock{nodes_per_element, connectivity})
    }

    /// Triangle block from index triples.
    pub fn triangles(triangles: &[[usize; 3]]) -> Self {
        ElementBlock{
            nodes_per_element: 3,
            connectivity: triangles.iter().flatten().copied().collect(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.connectivity.len() / self.nodes_per_element
    }

    pub fn is_empty(&self) -> bool {
        self.connectivity.is_empty()
    }

    /// Vertex indices of every element.
    pub fn elements(&self) -> impl Iterator<Item = &[usize]> {
        self.connectivity.chunks(self.nodes_per_element)
    }
}

/// Zone geometry and field access.
impl Node {
    /// Build a zone from vertices and an element block.
    pub fn new_zone(name: &str, points: &[Point], block: &ElementBlock) -> Node {
        let mut zone = Node::new(name, NodeKind::Zone, NodeValue::None);
        zone.set_points(points);
        zone.set_element_block(block);
        zone
    }

    /// Vertices of a zone.
    pub fn points(&self) -> ProcResult<Vec<Point>> {
        let coords_node = self.require_child(COORDINATES_CONTAINER)?;
        let mut coords = Vec::with_capacity(3);
        for coord_name in COORDINATE_NAMES.iter() {
            let values = coords_node.require_child(coord_name)?.value.as_reals()
                .ok_or_else(|| TreeError::WrongValue{name: coord_name.to_string(), expected: "a real array".to_string()})?;
            coords.push(values);
        }
        if coords[0].len() != coords[1].len() || coords[0].len() != coords[2].len() {
            return Err(TreeError::WrongValue{
                name: format!("{}/{}", self.name, COORDINATES_CONTAINER),
                expected: "coordinate arrays of equal length".to_string(),
            });
        }
        Ok((0..coords[0].len())
            .map(|i| Point::new(coords[0][i], coords[1][i], coords[2][i]))
            .collect())
    }

    /// Overwrite the vertices of a zone.
    pub fn set_points(&mut self, points: &[Point]) {
        let coords_node = self.ensure_child(COORDINATES_CONTAINER, NodeKind::GridCoordinates);
        let xs = points.iter().map(|p| p.x).collect::<Vec<_>>();
        let ys = points.iter().map(|p| p.y).collect::<Vec<_>>();
        let zs = points.iter().map(|p| p.z).collect::<Vec<_>>();
        for (coord_name, values) in COORDINATE_NAMES.iter().zip([xs, ys, zs]) {
            coords_node.create_unique_child(coord_name, NodeKind::DataArray, NodeValue::Reals(values));
        }
    }

    /// Element block of a zone.
    pub fn element_block(&self) -> ProcResult<ElementBlock> {
        let elements = self.require_child(ELEMENTS_CONTAINER)?;
        let nodes_per_element = match elements.value {
            NodeValue::Int(n) if n > 0 => n as usize,
            _ => {
                return Err(TreeError::WrongValue{
                    name: ELEMENTS_CONTAINER.to_string(),
                    expected: "a positive node count per element".to_string(),
                });
            },
        };
        let raw = elements.require_child(CONNECTIVITY)?.value.as_ints()
            .ok_or_else(|| TreeError::WrongValue{name: CONNECTIVITY.to_string(), expected: "an integer array".to_string()})?;
        let mut connectivity = Vec::with_capacity(raw.len());
        for index in raw.iter() {
            if *index < 0 {
                return Err(TreeError::WrongValue{name: CONNECTIVITY.to_string(), expected: "non-negative vertex indices".to_string()});
            }
            connectivity.push(*index as usize);
        }
        Ok(ElementBlock::new(nodes_per_element, connectivity)?)
    }

    /// Overwrite the element block of a zone.
    pub fn set_element_block(&mut self, block: &ElementBlock) {
        let elements = self.create_unique_child(
            ELEMENTS_CONTAINER,
            NodeKind::Elements,
            NodeValue::Int(block.nodes_per_element as i64),
        );
        elements.create_unique_child(
            CONNECTIVITY,
            NodeKind::DataArray,
            NodeValue::Ints(block.connectivity.iter().map(|&i| i as i64).collect()),
        );
    }

    /// Number of cells (elements) of a zone.
    pub fn cell_count(&self) -> ProcResult<usize> {
        Ok(self.element_block()?.len())
    }

    /// Centroid of every cell.
    pub fn cell_centers(&self) -> ProcResult<Vec<Point>> {
        let points = self.points()?;
        let block = self.element_block()?;
        let mut centers = Vec::with_capacity(block.len());
        for element in block.elements() {
            let mut corners = Vec::with_capacity(element.len());
            for &vertex in element.iter() {
                let point = points.get(vertex).ok_or_else(|| TreeError::WrongValue{
                    name: CONNECTIVITY.to_string(),
                    expected: format!("vertex indices below {}", points.len()),
                })?;
                corners.push(*point);
            }
            centers.push(Point::centroid(&corners));
        }
        Ok(centers)
    }

    /// Overwrite a cell-centred field. The length must match the cell count.
    pub fn set_center_field(&mut self, name: &str, values: Vec<f64>) -> ProcResult<()> {
        let cells = self.cell_count()?;
        if values.len() != cells {
            return Err(TreeError::WrongValue{
                name: name.to_string(),
                expected: format!("{} cell values, got {}", cells, values.len()),
            });
        }
        self.ensure_child(CENTERS_CONTAINER, NodeKind::FlowSolution)
            .create_unique_child(name, NodeKind::DataArray, NodeValue::Reals(values));
        Ok(())
    }

    /// Set a cell-centred field to a constant on every cell.
    pub fn init_center_field(&mut self, name: &str, value: f64) -> ProcResult<()> {
        let cells = self.cell_count()?;
        self.set_center_field(name, vec![value; cells])
    }

    /// Cell-centred field values.
    pub fn center_field(&self, name: &str) -> ProcResult<&[f64]> {
        let field = self.require_child(CENTERS_CONTAINER)?.require_child(name)?;
        field.value.as_reals()
            .ok_or_else(|| TreeError::WrongValue{name: name.to_string(), expected: "a real array".to_string()})
    }

    /// Vertex fields of a zone, in child order.
    pub fn vertex_fields(&self) -> ProcResult<Vec<(&str, &[f64])>> {
        let container = self.require_child(VERTEX_CONTAINER)?;
        let mut fields = Vec::new();
        for child in container.children_by_kind(NodeKind::DataArray) {
            match child.value.as_reals() {
                Some(values) => fields.push((child.name.as_str(), values)),
                None => {
                    return Err(TreeError::WrongValue{name: child.name.clone(), expected: "a real array".to_string()});
                },
            }
        }
        Ok(fields)
    }

    /// Linked surface of a triangulated zone.
    pub fn to_surface(&self) -> ProcResult<Surface> {
        let block = self.element_block()?;
        if block.nodes_per_element != 3 {
            return Err(TreeError::WrongValue{
                name: format!("{}/{}", self.name, ELEMENTS_CONTAINER),
                expected: "triangle elements".to_string(),
            });
        }
        let triangles = block.elements()
            .map(|element| [element[0], element[1], element[2]])
            .collect::<Vec<_>>();
        Ok(Surface::from_triangles(&self.points()?, &triangles)?)
    }

    /// Triangulated zone from a linked surface.
    pub fn from_surface(name: &str, surface: &Surface) -> Node {
        let points = surface.vertices.iter().map(|v| v.point).collect::<Vec<_>>();
        let triangles = surface.faces.iter().map(|f| f.vertices).collect::<Vec<_>>();
        Node::new_zone(name, &points, &ElementBlock::triangles(&triangles))
    }

    /// Zone lookup by name anywhere below this node.
    pub fn require_zone(&self, name: &str) -> ProcResult<&Node> {
        self.zones().into_iter()
            .find(|zone| zone.name == name)
            .ok_or_else(|| not_found(name, &self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Node {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(2.0, 2.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        ];
        Node::new_zone("square", &points, &ElementBlock::triangles(&[[0, 1, 2], [0, 2, 3]]))
    }

    #[test]
    fn geometry_round_trip() {
        let zone = square();
        assert_eq!(zone.points().unwrap().len(), 4);
        assert_eq!(zone.cell_count().unwrap(), 2);
        let centers = zone.cell_centers().unwrap();
        assert!((centers[0].x - 4.0 / 3.0).abs() < 1e-12);
        assert!((centers[1].y - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn center_field_length_checked() {
        let mut zone = square();
        zone.init_center_field(CELL_VALIDITY, 1.0).unwrap();
        assert_eq!(zone.center_field(CELL_VALIDITY).unwrap(), &[1.0, 1.0]);
        assert!(zone.set_center_field(CELL_VALIDITY, vec![0.0; 3]).is_err());
    }

    #[test]
    fn missing_grid_is_not_found() {
        let zone = Node::new("empty", NodeKind::Zone, NodeValue::None);
        match zone.points() {
            Err(TreeError::NotFound{name, parent}) => {
                assert_eq!(name, COORDINATES_CONTAINER);
                assert_eq!(parent, "empty");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn bad_connectivity_length() {
        assert!(ElementBlock::new(3, vec![0, 1]).is_err());
        assert!(ElementBlock::new(0, vec![]).is_err());
    }
}
