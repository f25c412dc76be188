use crate::geo_3d::Point;
use crate::sampler::{self, FieldSampler, source_fields};
use crate::tree::Node;

/// Nearest-vertex sampler. The interpolation order is ignored.
#[derive(Debug, Default)]
pub struct Sampler {}
impl Sampler {
    pub fn new() -> Self {
        Sampler{}
    }
}

impl FieldSampler for Sampler {
    fn get_sampler_name(&self) -> String {
        "Nearest".to_string()
    }

    fn sample(&self, source: &Node, points: &[Point], _order: usize) -> sampler::ProcResult<Vec<Vec<f64>>> {
        let (vertices, fields) = source_fields(source)?;
        let mut samples = Vec::with_capacity(points.len());
        for point in points.iter() {
            let idx = match point.nearest_idx(&vertices) {
                Some(idx) => idx,
                None => return Err(sampler::SamplerError::EmptySource(source.name.clone())),
            };
            samples.push(fields.iter().map(|values| values[idx]).collect());
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::tests::plane_source;

    #[test]
    fn picks_closest_vertex_in_point_order() {
        let source = plane_source();
        let points = vec![Point::new(0.9, 0.1, 0.0), Point::new(0.1, 0.8, 0.2)];
        let samples = Sampler::new().sample(&source, &points, 2).unwrap();
        assert_eq!(samples, vec![vec![10.0, 100.0], vec![0.0, 101.0]]);
    }
}
