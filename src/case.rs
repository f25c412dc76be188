/*!
 * Case recipes.
 *
 * A recipe names the tree to start from, the kernel and sampler to use, and an ordered
 * list of steps. Each step calls one of the public tree operations of the crate.
 */

mod cfg;
mod proc_errors;

use tracing::info;

use crate::ibc::{self, MigrationOptions, SampledSource};
use crate::io;
use crate::kernel::KernelChoice;
use crate::sampler::SamplerChoice;
use crate::sizing;
use crate::symmetry;
use crate::tree::{Node, NodeKind, not_found};

pub use cfg::{
    CaseConfig,
    CaseStep,
};
pub use proc_errors::{
    CaseError,
    ProcResult,
    err_str,
};

/// Case target struct.
/// Contains the parsed recipe and the constructed kernel and sampler.
#[derive(Debug)]
pub struct CaseTarget {
    pub cfg: CaseConfig,
    pub kernel: KernelChoice,
    pub sampler: SamplerChoice,
}
impl CaseTarget {
    /// Construct a case target from a recipe file (JSON, TOML or YAML).
    pub fn from_cfg_file(cfg_file: &str) -> ProcResult<Self> {
        let cfg: CaseConfig = io::read_cfg_file(cfg_file)?;
        Self::from_cfg(cfg)
    }

    pub fn from_cfg(cfg: CaseConfig) -> ProcResult<Self> {
        if cfg.output_path.is_empty() {
            return err_str("Case output path is empty");
        }
        let kernel = KernelChoice::from_name(&cfg.kernel)?;
        let sampler = SamplerChoice::from_name(&cfg.sampler)?;
        Ok(CaseTarget{cfg, kernel, sampler})
    }

    /// Load the starting tree: the recipe's tree file, or an empty tree.
    pub fn load_tree(&self) -> ProcResult<Node> {
        match self.cfg.tree_path.as_deref() {
            Some(path) => {
                info!("Loading tree from {}", path);
                Ok(io::load_tree(path)?)
            },
            None => Ok(Node::new_tree()),
        }
    }

    /// Run every step of the recipe on `tree`, in order.
    pub fn run_steps(&self, tree: &mut Node) -> ProcResult<()> {
        let step_count = self.cfg.steps.len();
        for (i, step) in self.cfg.steps.iter().enumerate() {
            info!("Step {}/{}: {}", i + 1, step_count, step);
            self.run_step(tree, step)?;
        }
        Ok(())
    }

    /// Load the tree, run the steps and save the result. Returns the resulting tree.
    pub fn run(&self) -> ProcResult<Node> {
        let mut tree = self.load_tree()?;
        self.run_steps(&mut tree)?;
        info!("Saving tree to {}", self.cfg.output_path);
        io::save_tree(&tree, &self.cfg.output_path)?;
        Ok(tree)
    }

    fn run_step(&self, tree: &mut Node, step: &CaseStep) -> ProcResult<()> {
        match step {
            CaseStep::SetSnear{target, value} => {
                let count = sizing::set_snear(target_node(tree, target)?, *value);
                info!("snear = {} on {} zones", value, count);
            },
            CaseStep::SetDfar{target, value} => {
                let count = sizing::set_dfar(target_node(tree, target)?, *value);
                info!("dfar = {} on {} zones", value, count);
            },
            CaseStep::OptimalDfar{target, snear, min_cells, growth_factor, levels} => {
                let node = target_node(tree, target)?;
                let far_field = sizing::optimal_far_field_for(node, &self.kernel, *snear, *min_cells, *growth_factor, *levels)?;
                sizing::set_dfar(node, far_field.dfar);
            },
            CaseStep::ScaleSnear{target, factor} => {
                let count = sizing::scale_snear(target_node(tree, target)?, *factor);
                info!("snear scaled by {} on {} zones", factor, count);
            },
            CaseStep::SetIbcType{target, ibc_type} => {
                sizing::set_ibc_type(target_node(tree, target)?, *ibc_type);
            },
            CaseStep::SetFluidInside{target} => {
                sizing::set_fluid_inside(target_node(tree, target)?);
            },
            CaseStep::SetOutpressControl{target, control} => {
                sizing::set_outpress_control(target_node(tree, target)?, control);
            },
            CaseStep::ImportStl{path, base, zone} => {
                info!("Loading STL file {} as zone {}/{}", path, base, zone);
                let zone_node = io::stl::load_stl_zone(path, zone)?;
                let base_node = tree.ensure_child(base, NodeKind::Base);
                base_node.remove_children_named(zone);
                base_node.add_child(zone_node);
            },
            CaseStep::Symmetrize{body, snear_sym, axis} => {
                symmetry::build_symmetric_case(tree, &self.kernel, body, *snear_sym, *axis)?;
            },
            CaseStep::MigrateIbcType{old, new, removal} => {
                ibc::migrate_ibc_type(tree, *old, *new, &MigrationOptions{removal: *removal})?;
            },
            CaseStep::PromoteSecondImagePoints => {
                ibc::promote_second_image_point_records(tree)?;
            },
            CaseStep::Outflow{family, condition, plane, order} => {
                let plane = plane_zone(tree, plane)?;
                let source = plane.as_ref().map(|plane| self.source(plane, *order));
                ibc::set_outflow_pressure(tree, family, condition, source.as_ref())?;
            },
            CaseStep::WallTemperature{family, t_wall} => {
                ibc::set_wall_temperature(tree, family, *t_wall)?;
            },
            CaseStep::WallHeatFlux{family, q_wall} => {
                ibc::set_wall_heat_flux(tree, family, *q_wall)?;
            },
            CaseStep::Injection{family, condition, plane, order} => {
                let plane = plane_zone(tree, plane)?;
                let source = plane.as_ref().map(|plane| self.source(plane, *order));
                ibc::set_injection_condition(tree, family, condition, source.as_ref())?;
            },
        }
        Ok(())
    }

    fn source<'a>(&'a self, plane: &'a Node, order: Option<usize>) -> SampledSource<'a> {
        let mut source = SampledSource::new(&self.sampler, plane);
        if let Some(order) = order {
            source.order = order;
        }
        source
    }
}

/// The named node (any depth), or the whole tree.
fn target_node<'a>(tree: &'a mut Node, target: &Option<String>) -> ProcResult<&'a mut Node> {
    match target {
        None => Ok(tree),
        Some(name) => {
            let tree_name = tree.name.clone();
            tree.find_mut(name).ok_or_else(|| not_found(name, &tree_name).into())
        },
    }
}

/// Copy of the named plane zone, taken before the records are written.
fn plane_zone(tree: &Node, plane: &Option<String>) -> ProcResult<Option<Node>> {
    match plane {
        None => Ok(None),
        Some(name) => Ok(Some(tree.require_zone(name)?.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_3d::{Axis, Point};
    use crate::ibc::{IbcType, OutflowCondition, RemovalPolicy};
    use crate::tree::{ElementBlock, NodeValue, SOLVER_DEFINE};

    fn body_tree() -> Node {
        let points = vec![
            Point::new(0.0, 0.5, 0.0),
            Point::new(1.0, 0.5, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.5, 1.0),
        ];
        let block = ElementBlock::triangles(&[[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]]);
        Node::new_tree().with_child(Node::new_base("Body").with_child(Node::new_zone("wing", &points, &block)))
    }

    fn target(steps: Vec<CaseStep>) -> CaseTarget {
        CaseTarget::from_cfg(CaseConfig{
            tree_path: None,
            output_path: "unused.yaml".to_string(),
            kernel: "basic".to_string(),
            sampler: "nearest".to_string(),
            steps,
        }).unwrap()
    }

    fn solver_param<'a>(tree: &'a Node, zone: &str, name: &str) -> &'a NodeValue {
        &tree.find(zone).unwrap().require_child(SOLVER_DEFINE).unwrap().require_child(name).unwrap().value
    }

    #[test]
    fn steps_run_in_order() {
        let case = target(vec![
            CaseStep::SetSnear{target: None, value: 0.1},
            CaseStep::ScaleSnear{target: Some("Body".to_string()), factor: 2.0},
            CaseStep::SetDfar{target: None, value: 2.0},
            CaseStep::SetIbcType{target: Some("wing".to_string()), ibc_type: IbcType::Musker},
            CaseStep::Symmetrize{body: "Body".to_string(), snear_sym: 0.5, axis: Axis::Y},
        ]);
        let mut tree = body_tree();
        case.run_steps(&mut tree).unwrap();

        assert_eq!(*solver_param(&tree, "wing", "snear"), NodeValue::Real(0.2));
        assert_eq!(*solver_param(&tree, "wing", "ibctype"), NodeValue::Text("Musker".to_string()));
        assert!(tree.find("wing_sym").is_some());
        assert_eq!(*solver_param(&tree, "sym", "dfar"), NodeValue::Real(-1.0));
    }

    #[test]
    fn optimal_dfar_is_stored() {
        let case = target(vec![CaseStep::OptimalDfar{
            target: None,
            snear: 0.01,
            min_cells: 21,
            growth_factor: 10.0,
            levels: Some(3),
        }]);
        let mut tree = body_tree();
        case.run_steps(&mut tree).unwrap();
        // 0.5 * (0.01 * 8 * 20 - 1)
        match solver_param(&tree, "wing", "dfar") {
            NodeValue::Real(dfar) => assert!((dfar - 0.3).abs() < 1e-9),
            other => panic!("unexpected dfar {:?}", other),
        }
    }

    #[test]
    fn record_steps_reach_records() {
        let case = target(vec![
            CaseStep::MigrateIbcType{old: IbcType::Injection, new: IbcType::OutPressure, removal: RemovalPolicy::PruneForeign},
            CaseStep::Outflow{
                family: "outlet".to_string(),
                condition: OutflowCondition{static_pressure: 9e4, ..Default::default()},
                plane: None,
                order: None,
            },
        ]);
        let mut tree = ibc::tests::tree_with_records(vec![ibc::tests::record(5, "outlet", Some("outlet"), 3)]);
        case.run_steps(&mut tree).unwrap();

        assert!(tree.require_zone("zone").unwrap().child("IBCD_5_outlet").is_none());
        let record = ibc::tests::zone_record(&tree, "IBCD_4_outlet");
        assert_eq!(record.require_child(ibc::PRESSURE).unwrap().value, NodeValue::Reals(vec![9e4; 3]));
    }

    #[test]
    fn missing_target_or_plane_is_fatal() {
        let mut tree = body_tree();
        let case = target(vec![CaseStep::SetSnear{target: Some("Fuselage".to_string()), value: 0.1}]);
        assert!(matches!(case.run_steps(&mut tree), Err(CaseError::TreeError(_))));

        let case = target(vec![CaseStep::WallTemperature{family: "wall".to_string(), t_wall: 300.0}, CaseStep::Outflow{
            family: "outlet".to_string(),
            condition: OutflowCondition::default(),
            plane: Some("probe".to_string()),
            order: None,
        }]);
        assert!(case.run_steps(&mut tree).is_err());
    }

    #[test]
    fn unknown_kernel_or_sampler_is_rejected() {
        let mut cfg = CaseConfig::example();
        cfg.kernel = "fancy".to_string();
        assert!(matches!(CaseTarget::from_cfg(cfg), Err(CaseError::KernelError(_))));
        let mut cfg = CaseConfig::example();
        cfg.sampler = "spline".to_string();
        assert!(matches!(CaseTarget::from_cfg(cfg), Err(CaseError::SamplerError(_))));
    }

    #[test]
    fn recipe_file_runs_end_to_end() {
        let dir = std::env::temp_dir();
        let tree_path = dir.join("ibmprep_case_in.json").to_string_lossy().to_string();
        let output_path = dir.join("ibmprep_case_out.yaml").to_string_lossy().to_string();
        let recipe_path = dir.join("ibmprep_case.toml").to_string_lossy().to_string();
        io::save_tree(&body_tree(), &tree_path).unwrap();
        let recipe = format!(
            "tree_path = {:?}\noutput_path = {:?}\n\n[[steps]]\nstep = \"set_fluid_inside\"\ntarget = \"wing\"\n",
            tree_path, output_path,
        );
        io::write_to_file(&recipe_path, &recipe).unwrap();

        let case = CaseTarget::from_cfg_file(&recipe_path).unwrap();
        let result = case.run().unwrap();
        assert_eq!(*solver_param(&result, "wing", "inv"), NodeValue::Int(1));
        assert_eq!(io::load_tree(&output_path).unwrap(), result);
    }
}
