use serde::{Serialize, Deserialize};
use strum::{Display, EnumIter};

use crate::geo_3d::Axis;
use crate::ibc::{InjectionCondition, IbcType, OutflowCondition, RemovalPolicy, DEFAULT_SAMPLING_ORDER};
use crate::sizing::{OutPressControl, DEFAULT_GROWTH_FACTOR, DEFAULT_MIN_CELLS};

fn default_kernel() -> String {
    "basic".to_string()
}

fn default_sampler() -> String {
    "nearest".to_string()
}

const fn default_min_cells() -> u32 {
    DEFAULT_MIN_CELLS
}

const fn default_growth_factor() -> f64 {
    DEFAULT_GROWTH_FACTOR
}

/// Case recipe: where the tree comes from, where it goes, and what is done to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// Tree to start from (JSON or YAML). An empty tree is used when absent.
    #[serde(default, alias = "tree", alias = "input", alias = "in", alias = "i")]
    pub tree_path: Option<String>,

    /// Where the resulting tree is saved (JSON or YAML).
    #[serde(alias = "output", alias = "out", alias = "o")]
    pub output_path: String,

    /// Geometry kernel name.
    #[serde(default = "default_kernel")]
    pub kernel: String,

    /// Field sampler name, used by sampled steps.
    #[serde(default = "default_sampler")]
    pub sampler: String,

    /// Steps, run in order.
    #[serde(default)]
    pub steps: Vec<CaseStep>,
}
impl CaseConfig {
    /// Example recipe holding one of each step.
    pub fn example() -> Self {
        CaseConfig{
            tree_path: Some("PATH/TO/INPUT/TREE.yaml".to_string()),
            output_path: "PATH/TO/OUTPUT/TREE.yaml".to_string(),
            kernel: default_kernel(),
            sampler: default_sampler(),
            steps: CaseStep::examples(),
        }
    }
}

/// One pipeline step.
/// `target` names the node a parameter step starts from (any depth). The whole tree when absent.
/// `plane` names the zone sampled by an initialization step. Constants are used when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Display, EnumIter)]
#[serde(tag = "step", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaseStep {
    SetSnear {
        #[serde(default)]
        target: Option<String>,
        value: f64,
    },
    SetDfar {
        #[serde(default)]
        target: Option<String>,
        value: f64,
    },
    /// Compute the optimal far field around the target and store it as `dfar`.
    OptimalDfar {
        #[serde(default)]
        target: Option<String>,
        snear: f64,
        #[serde(default = "default_min_cells")]
        min_cells: u32,
        #[serde(default = "default_growth_factor")]
        growth_factor: f64,
        #[serde(default)]
        levels: Option<u32>,
    },
    ScaleSnear {
        #[serde(default)]
        target: Option<String>,
        factor: f64,
    },
    SetIbcType {
        #[serde(default)]
        target: Option<String>,
        ibc_type: IbcType,
    },
    SetFluidInside {
        #[serde(default)]
        target: Option<String>,
    },
    SetOutpressControl {
        #[serde(default)]
        target: Option<String>,
        #[serde(default)]
        control: OutPressControl,
    },
    /// Load a STL file as a zone of `base`, replacing any zone of the same name.
    ImportStl {
        path: String,
        base: String,
        zone: String,
    },
    Symmetrize {
        body: String,
        snear_sym: f64,
        #[serde(default)]
        axis: Axis,
    },
    MigrateIbcType {
        old: IbcType,
        new: IbcType,
        #[serde(default)]
        removal: RemovalPolicy,
    },
    PromoteSecondImagePoints,
    Outflow {
        family: String,
        #[serde(default)]
        condition: OutflowCondition,
        #[serde(default)]
        plane: Option<String>,
        #[serde(default)]
        order: Option<usize>,
    },
    WallTemperature {
        family: String,
        t_wall: f64,
    },
    WallHeatFlux {
        family: String,
        q_wall: f64,
    },
    Injection {
        family: String,
        #[serde(default)]
        condition: InjectionCondition,
        #[serde(default)]
        plane: Option<String>,
        #[serde(default)]
        order: Option<usize>,
    },
}

impl CaseStep {
    /// One usable instance of every step, in pipeline order.
    pub fn examples() -> Vec<Self> {
        let body = || Some("Body".to_string());
        vec![
            CaseStep::ImportStl{
                path: "PATH/TO/BODY.stl".to_string(),
                base: "Body".to_string(),
                zone: "body".to_string(),
            },
            CaseStep::SetSnear{target: body(), value: 0.01},
            CaseStep::ScaleSnear{target: body(), factor: 0.5},
            CaseStep::SetDfar{target: body(), value: 10.0},
            CaseStep::OptimalDfar{
                target: body(),
                snear: 0.005,
                min_cells: DEFAULT_MIN_CELLS,
                growth_factor: DEFAULT_GROWTH_FACTOR,
                levels: None,
            },
            CaseStep::SetIbcType{target: body(), ibc_type: IbcType::Musker},
            CaseStep::SetFluidInside{target: Some("duct".to_string())},
            CaseStep::SetOutpressControl{target: Some("outlet".to_string()), control: OutPressControl::default()},
            CaseStep::Symmetrize{body: "Body".to_string(), snear_sym: 0.05, axis: Axis::Y},
            CaseStep::MigrateIbcType{old: IbcType::Injection, new: IbcType::SlipCurvature, removal: RemovalPolicy::DerivedOnly},
            CaseStep::PromoteSecondImagePoints,
            CaseStep::Outflow{
                family: "outlet".to_string(),
                condition: OutflowCondition::default(),
                plane: None,
                order: None,
            },
            CaseStep::WallTemperature{family: "hot_wall".to_string(), t_wall: 300.0},
            CaseStep::WallHeatFlux{family: "heated_wall".to_string(), q_wall: 1000.0},
            CaseStep::Injection{
                family: "inlet".to_string(),
                condition: InjectionCondition::default(),
                plane: Some("inlet_plane".to_string()),
                order: Some(DEFAULT_SAMPLING_ORDER),
            },
        ]
    }
}
