use crate::geo_3d::Point;
use crate::sampler::{self, FieldSampler, source_fields};
use crate::tree::Node;

/// Distance below which a point is treated as sitting on a source vertex.
const COINCIDENCE_TOL: f64 = 1e-12;

/// Inverse-distance-weighted sampler. Weights are `1 / d^order` (order 0 is treated as 1).
#[derive(Debug, Default)]
pub struct Sampler {}
impl Sampler {
    pub fn new() -> Self {
        Sampler{}
    }
}

impl FieldSampler for Sampler {
    fn get_sampler_name(&self) -> String {
        "Inverse Distance".to_string()
    }

    fn sample(&self, source: &Node, points: &[Point], order: usize) -> sampler::ProcResult<Vec<Vec<f64>>> {
        let (vertices, fields) = source_fields(source)?;
        let power = order.max(1) as i32;

        let mut samples = Vec::with_capacity(points.len());
        for point in points.iter() {
            let distances = vertices.iter().map(|v| v.distance(point)).collect::<Vec<_>>();

            if let Some(hit) = distances.iter().position(|d| *d < COINCIDENCE_TOL) {
                samples.push(fields.iter().map(|values| values[hit]).collect());
                continue;
            }

            let weights = distances.iter().map(|d| 1.0 / d.powi(power)).collect::<Vec<_>>();
            let total: f64 = weights.iter().sum();
            samples.push(fields.iter()
                .map(|values| values.iter().zip(weights.iter()).map(|(v, w)| v * w).sum::<f64>() / total)
                .collect());
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::tests::plane_source;

    #[test]
    fn exact_hit_returns_vertex_values() {
        let samples = Sampler::new().sample(&plane_source(), &[Point::new(1.0, 1.0, 0.0)], 2).unwrap();
        assert_eq!(samples, vec![vec![10.0, 101.0]]);
    }

    #[test]
    fn center_is_symmetric_average() {
        let samples = Sampler::new().sample(&plane_source(), &[Point::new(0.5, 0.5, 0.0)], 2).unwrap();
        assert!((samples[0][0] - 5.0).abs() < 1e-12);
        assert!((samples[0][1] - 100.5).abs() < 1e-12);
    }
}
