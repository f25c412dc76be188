/*!
 * Field samplers: evaluate the vertex fields of a source zone at arbitrary points.
 * Adding new samplers should be done here.
 *
 * New samplers need:
 * - A struct implementing `FieldSampler`
 * - An enum variant containing that struct in `SamplerChoice`
 * - A constructor arg_name and function in `SAMPLER_CONSTRUCTION`
 *
 */

use enum_dispatch::enum_dispatch;

use crate::geo_3d::Point;
use crate::tree::Node;

mod proc_errors;
mod nearest;
mod inverse_distance;

pub use proc_errors::{
    SamplerError,
    ProcResult,
    err_str,
};

/// Samplers enum.
#[derive(Debug)]
#[enum_dispatch(FieldSampler)]
pub enum SamplerChoice {
    /// Value of the closest source vertex.
    Nearest(nearest::Sampler),
    /// Inverse-distance weighting over all source vertices.
    InverseDistance(inverse_distance::Sampler),
}

const SAMPLER_CONSTRUCTION: &[SamplerConstructor] = &[
    SamplerConstructor{
        arg_name: "nearest",
        constructor: || {Ok(SamplerChoice::Nearest(nearest::Sampler::new()))},
    },
    SamplerConstructor{
        arg_name: "inverse_distance",
        constructor: || {Ok(SamplerChoice::InverseDistance(inverse_distance::Sampler::new()))},
    },
];

/// Field sampler trait.
#[enum_dispatch]
pub trait FieldSampler {
    /// Get the name of the sampler.
    fn get_sampler_name(&self) -> String;

    /// Sample every vertex field of `source` at each point.
    /// Returns one tuple per point, in point order; tuple entries follow the source field order.
    fn sample(&self, source: &Node, points: &[Point], order: usize) -> ProcResult<Vec<Vec<f64>>>;
}

struct SamplerConstructor {
    arg_name: &'static str,
    constructor: fn() -> ProcResult<SamplerChoice>,
}

impl SamplerChoice {
    /// Construct a sampler from a name (given in the case file).
    pub fn from_name(arg_name: &str) -> ProcResult<Self> {
        for constructor in SAMPLER_CONSTRUCTION {
            if constructor.arg_name == arg_name {
                return (constructor.constructor)();
            }
        }

        let mut error_str = format!("Field sampler not found: {arg_name}\n");
        error_str.push_str("Available samplers:\n");
        for constructor in SAMPLER_CONSTRUCTION {
            error_str.push_str(&format!("    {}\n", constructor.arg_name));
        }
        err_str(&error_str)
    }

    /// Names of all registered samplers.
    pub fn available() -> Vec<&'static str> {
        SAMPLER_CONSTRUCTION.iter().map(|c| c.arg_name).collect()
    }
}

/// Vertices and vertex fields of a source zone, checked for consistency.
fn source_fields(source: &Node) -> ProcResult<(Vec<Point>, Vec<&[f64]>)> {
    let vertices = source.points()?;
    if vertices.is_empty() {
        return Err(SamplerError::EmptySource(source.name.clone()));
    }
    let fields = source.vertex_fields()?
        .into_iter()
        .map(|(_, values)| values)
        .collect::<Vec<_>>();
    if let Some(bad) = fields.iter().position(|values| values.len() != vertices.len()) {
        return err_str(&format!(
            "Vertex field {} of zone {} has {} values for {} vertices",
            bad, source.name, fields[bad].len(), vertices.len(),
        ));
    }
    Ok((vertices, fields))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tree::{ElementBlock, NodeKind, NodeValue, VERTEX_CONTAINER};

    /// Unit square plane carrying two vertex fields: `p = 10 * x` and `h = 100 + y`.
    pub fn plane_source() -> Node {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        let mut zone = Node::new_zone("plane", &points, &ElementBlock::triangles(&[[0, 1, 2], [0, 2, 3]]));
        let fields = Node::new(VERTEX_CONTAINER, NodeKind::FlowSolution, NodeValue::None)
            .with_child(Node::data_array("p", points.iter().map(|p| 10.0 * p.x).collect::<Vec<_>>()))
            .with_child(Node::data_array("h", points.iter().map(|p| 100.0 + p.y).collect::<Vec<_>>()));
        zone.add_child(fields);
        zone
    }

    #[test]
    fn constructs_by_name() {
        assert_eq!(SamplerChoice::from_name("nearest").unwrap().get_sampler_name(), "Nearest");
        assert!(SamplerChoice::from_name("kriging").is_err());
        assert_eq!(SamplerChoice::available(), vec!["nearest", "inverse_distance"]);
    }

    #[test]
    fn inconsistent_source_is_rejected() {
        let mut source = plane_source();
        source.require_child_mut(VERTEX_CONTAINER).unwrap()
            .add_child(Node::data_array("short", vec![1.0]));
        assert!(source_fields(&source).is_err());
    }
}
