use itertools::Itertools;
use tracing::debug;

use crate::geo_3d::{BoundingBox, GeoVector, Plane, Point};
use crate::kernel::{
    self,
    GeometryKernel,
    KernelError,
    Octree,
    ZoneSizing,
};
use crate::tree::{ElementBlock, Node};

/// Basic kernel struct.
/// Works directly on the vertex and element arrays of unstructured zones.
#[derive(Debug, Default)]
pub struct Kernel {}
impl Kernel {
    pub fn new() -> Self {
        Kernel{}
    }
}

impl GeometryKernel for Kernel {
    fn get_kernel_name(&self) -> String {
        "Basic".to_string()
    }

    fn octree_from_sizing(&self, zones: &[&Node], sizing: &[ZoneSizing]) -> kernel::ProcResult<Octree> {
        if zones.len() != sizing.len() {
            return Err(KernelError::InvalidInput(format!(
                "{} zones but {} sizing entries", zones.len(), sizing.len(),
            )));
        }

        let mut extent: Option<BoundingBox> = None;
        let mut finest: Option<f64> = None;
        for (zone, zone_sizing) in zones.iter().zip(sizing.iter()) {
            if let Some(dfar) = zone_sizing.dfar.filter(|dfar| *dfar >= 0.0) {
                let zone_box = self.bounding_box(&[*zone])?.expanded(dfar);
                extent = Some(match extent {
                    Some(extent) => extent.union(&zone_box),
                    None => zone_box,
                });
            }
            if let Some(snear) = zone_sizing.snear.filter(|snear| *snear > 0.0) {
                finest = Some(finest.map_or(snear, |f| f.min(snear)));
            }
        }

        let extent = extent.ok_or_else(|| KernelError::InvalidInput("no zone carries a non-negative dfar".to_string()))?;
        let finest = finest.ok_or_else(|| KernelError::InvalidInput("no zone carries a positive snear".to_string()))?;

        let size = extent.size_max();
        let levels = if size <= finest {
            0
        } else {
            (size / finest).log2().ceil() as u32
        };
        let half_side = 0.5 * finest * 2f64.powi(levels as i32);
        let center = extent.center();
        let bbox = BoundingBox::new(
            [center.x - half_side, center.y - half_side, center.z - half_side],
            [center.x + half_side, center.y + half_side, center.z + half_side],
        );
        debug!("Octree: {} levels, finest size {}, root box {}", levels, finest, bbox);

        Ok(Octree{bbox, finest_size: finest, levels})
    }

    fn bounding_box(&self, zones: &[&Node]) -> kernel::ProcResult<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for zone in zones.iter() {
            let points = zone.points()?;
            if let Some(zone_box) = BoundingBox::from_points(&points) {
                bbox = Some(match bbox {
                    Some(bbox) => bbox.union(&zone_box),
                    None => zone_box,
                });
            }
        }
        bbox.ok_or_else(|| KernelError::InvalidInput("cannot bound an empty set of vertices".to_string()))
    }

    fn reflect(&self, zones: &[&Node], origin: Point, v1: GeoVector, v2: GeoVector) -> kernel::ProcResult<Vec<Node>> {
        let normal = v1.cross(&v2);
        if normal.norm() == 0.0 || normal.has_nan() {
            return Err(KernelError::InvalidInput(format!("basis vectors {} and {} do not span a plane", v1, v2)));
        }
        let plane = Plane::from_basis(origin, v1, v2);

        let mut mirrored = Vec::with_capacity(zones.len());
        for zone in zones.iter() {
            let points = zone.points()?
                .iter()
                .map(|point| point.reflect_across(&plane))
                .collect::<Vec<_>>();
            let mut copy = (*zone).clone();
            copy.set_points(&points);
            mirrored.push(copy);
        }
        Ok(mirrored)
    }

    fn reverse_orientation(&self, zones: &mut [Node], permutation: &[usize]) -> kernel::ProcResult<()> {
        let mut sorted = permutation.to_vec();
        sorted.sort_unstable();
        if sorted.iter().enumerate().any(|(i, slot)| i != *slot) {
            return Err(KernelError::InvalidInput(format!("{:?} is not a permutation", permutation)));
        }

        for zone in zones.iter_mut() {
            let block = zone.element_block()?;
            if block.nodes_per_element != permutation.len() {
                return Err(KernelError::InvalidInput(format!(
                    "permutation of {} slots applied to zone {} with {} nodes per element",
                    permutation.len(), zone.name, block.nodes_per_element,
                )));
            }
            let connectivity = block.elements()
                .flat_map(|element| permutation.iter().map(move |&slot| element[slot]))
                .collect_vec();
            zone.set_element_block(&ElementBlock::new(block.nodes_per_element, connectivity)?);
        }
        Ok(())
    }

    fn box_zone(&self, name: &str, bbox: &BoundingBox) -> kernel::ProcResult<Node> {
        // Corner i has x = max if bit 0 is set, y = max if bit 1, z = max if bit 2
        let corners = (0..8)
            .map(|i: usize| Point::new(
                if i & 1 == 0 { bbox.min[0] } else { bbox.max[0] },
                if i & 2 == 0 { bbox.min[1] } else { bbox.max[1] },
                if i & 4 == 0 { bbox.min[2] } else { bbox.max[2] },
            ))
            .collect_vec();
        // Outward-facing triangles, two per side
        let triangles = [
            [0, 2, 1], [1, 2, 3], // z min
            [4, 5, 6], [5, 7, 6], // z max
            [0, 1, 4], [1, 5, 4], // y min
            [2, 6, 3], [3, 6, 7], // y max
            [0, 4, 2], [2, 4, 6], // x min
            [1, 3, 5], [3, 7, 5], // x max
        ];
        Ok(Node::new_zone(name, &corners, &ElementBlock::triangles(&triangles)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_zone(name: &str, offset: f64) -> Node {
        let points = vec![
            Point::new(offset, 1.0, 0.0),
            Point::new(offset + 1.0, 1.0, 0.0),
            Point::new(offset, 2.0, 1.0),
        ];
        Node::new_zone(name, &points, &ElementBlock::triangles(&[[0, 1, 2]]))
    }

    #[test]
    fn reflect_mirrors_coordinates_and_keeps_original() {
        let zone = triangle_zone("tri", 0.0);
        let mirrored = Kernel::new()
            .reflect(&[&zone], Point::zero(), GeoVector::xhat(), GeoVector::zhat())
            .unwrap();
        let points = mirrored[0].points().unwrap();
        assert_eq!(points[0], Point::new(0.0, -1.0, 0.0));
        assert_eq!(points[2], Point::new(0.0, -2.0, 1.0));
        assert_eq!(zone.points().unwrap()[0], Point::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn reflect_rejects_parallel_basis() {
        let zone = triangle_zone("tri", 0.0);
        let result = Kernel::new().reflect(&[&zone], Point::zero(), GeoVector::xhat(), GeoVector::xhat());
        assert!(result.is_err());
    }

    #[test]
    fn reverse_orientation_permutes_elements() {
        let mut zones = vec![triangle_zone("tri", 0.0)];
        Kernel::new().reverse_orientation(&mut zones, &[0, 2, 1]).unwrap();
        assert_eq!(zones[0].element_block().unwrap().connectivity, vec![0, 2, 1]);
        assert!(Kernel::new().reverse_orientation(&mut zones, &[0, 0, 1]).is_err());
        assert!(Kernel::new().reverse_orientation(&mut zones, &[1, 0]).is_err());
    }

    #[test]
    fn box_zone_normals_point_outward() {
        let bbox = BoundingBox::new([-1.0, -2.0, -3.0], [1.0, 0.0, 3.0]);
        let zone = Kernel::new().box_zone("box", &bbox).unwrap();
        let surface = zone.to_surface().unwrap();
        let center = bbox.center();
        assert_eq!(surface.faces.len(), 12);
        assert!(surface.get_boundary_vertex_indices().is_empty());
        for face in surface.faces.iter() {
            let corner = surface.vertices[face.vertices[0]].point;
            assert!(face.get_normal().dot(&(corner - center)) > 0.0);
        }
    }

    #[test]
    fn octree_covers_expanded_zones() {
        let a = triangle_zone("a", 0.0);
        let b = triangle_zone("b", 5.0);
        let sizing = [
            ZoneSizing{snear: Some(0.5), dfar: Some(1.0)},
            ZoneSizing{snear: Some(0.25), dfar: None},
        ];
        let octree = Kernel::new().octree_from_sizing(&[&a, &b], &sizing).unwrap();
        // Only zone a contributes to the extent: [-1, 2] x [0, 3] x [-1, 2], size 3
        assert_eq!(octree.finest_size, 0.25);
        assert_eq!(octree.levels, 4);
        assert!((octree.bbox.size_max() - 4.0).abs() < 1e-12);
        assert!((octree.bbox.center().x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn octree_needs_sizing() {
        let a = triangle_zone("a", 0.0);
        let none = [ZoneSizing{snear: Some(0.5), dfar: None}];
        assert!(Kernel::new().octree_from_sizing(&[&a], &none).is_err());
        assert!(Kernel::new().octree_from_sizing(&[&a], &[]).is_err());
    }
}
