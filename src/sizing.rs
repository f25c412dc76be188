/*!
 * Per-zone meshing parameters.
 *
 * Every setter targets all zones at or below the given node and writes into the
 * zone's `.Solver#define` container, creating it when absent. Writes are idempotent,
 * the last one wins.
 */

use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::ibc::IbcType;
use crate::kernel::{GeometryKernel, KernelChoice, ZoneSizing};
use crate::tree::{Node, NodeKind, NodeValue, SOLVER_DEFINE};

mod proc_errors;

pub use proc_errors::{
    SizingError,
    ProcResult,
    err_str,
};

pub const SNEAR: &str = "snear";
pub const DFAR: &str = "dfar";
pub const IBC_TYPE: &str = "ibctype";
pub const FLUID_INSIDE: &str = "inv";

/// Default number of coarsest cells across the far field.
pub const DEFAULT_MIN_CELLS: u32 = 21;
/// Default far-field distance, in multiples of the body size.
pub const DEFAULT_GROWTH_FACTOR: f64 = 10.0;

/// Write a solver parameter on every zone. Returns the number of zones written.
fn set_solver_param(node: &mut Node, name: &str, value: NodeValue) -> usize {
    let zones = node.zones_mut();
    let count = zones.len();
    for zone in zones {
        zone.ensure_child(SOLVER_DEFINE, NodeKind::UserDefinedData)
            .create_unique_child(name, NodeKind::DataArray, value.clone());
    }
    count
}

/// Set the near-wall spacing of every zone.
pub fn set_snear(node: &mut Node, value: f64) -> usize {
    set_solver_param(node, SNEAR, value.into())
}

/// Set the far-field distance of every zone.
pub fn set_dfar(node: &mut Node, value: f64) -> usize {
    set_solver_param(node, DFAR, value.into())
}

/// Multiply every existing `snear` within two levels of each zone.
/// Zones without one are left untouched. Returns the number of values scaled.
pub fn scale_snear(node: &mut Node, factor: f64) -> usize {
    let mut count = 0;
    for zone in node.zones_mut() {
        zone.visit_within_mut(SNEAR, 2, &mut |snear: &mut Node| {
            let scaled = match &snear.value {
                NodeValue::Real(value) => Some(NodeValue::Real(value * factor)),
                NodeValue::Int(value) => Some(NodeValue::Real(*value as f64 * factor)),
                NodeValue::Reals(values) => Some(NodeValue::Reals(values.iter().map(|v| v * factor).collect())),
                _ => None,
            };
            if let Some(scaled) = scaled {
                snear.value = scaled;
                count += 1;
            }
        });
    }
    count
}

/// Set the boundary condition type of every zone.
pub fn set_ibc_type(node: &mut Node, ibc_type: IbcType) -> usize {
    set_solver_param(node, IBC_TYPE, ibc_type.to_string().into())
}

/// Mark every zone as having the fluid inside.
pub fn set_fluid_inside(node: &mut Node) -> usize {
    set_solver_param(node, FLUID_INSIDE, NodeValue::Int(1))
}

/// Parameters of the outflow pressure control loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutPressControl {
    #[serde(rename = "probeName", alias = "probe_name")]
    pub probe_name: String,
    #[serde(rename = "AtestSection", alias = "a_test_section")]
    pub a_test_section: i64,
    #[serde(rename = "AOutPress", alias = "a_out_press")]
    pub a_out_press: i64,
    #[serde(rename = "machTarget", alias = "mach_target")]
    pub mach_target: f64,
    #[serde(rename = "pStatTarget", alias = "p_stat_target")]
    pub p_stat_target: f64,
    #[serde(rename = "tStatTarget", alias = "t_stat_target")]
    pub t_stat_target: f64,
    pub lmbd: f64,
    #[serde(rename = "cxSupport", alias = "cx_support")]
    pub cx_support: f64,
    #[serde(rename = "sSupport", alias = "s_support")]
    pub s_support: f64,
}
impl Default for OutPressControl {
    fn default() -> Self {
        OutPressControl{
            probe_name: "pointOutPress".to_string(),
            a_test_section: 1,
            a_out_press: 1,
            mach_target: 0.1,
            p_stat_target: 1e5,
            t_stat_target: 298.15,
            lmbd: 0.1,
            cx_support: 0.6,
            s_support: 0.1,
        }
    }
}
impl OutPressControl {
    /// Solver parameter names and values, in solver order.
    fn solver_params(&self) -> Vec<(&'static str, NodeValue)> {
        vec![
            ("probeName", self.probe_name.as_str().into()),
            ("AtestSection", self.a_test_section.into()),
            ("AOutPress", self.a_out_press.into()),
            ("machTarget", self.mach_target.into()),
            ("pStatTarget", self.p_stat_target.into()),
            ("tStatTarget", self.t_stat_target.into()),
            ("lmbd", self.lmbd.into()),
            ("cxSupport", self.cx_support.into()),
            ("sSupport", self.s_support.into()),
        ]
    }
}

/// Write the outflow pressure control parameters on every zone.
pub fn set_outpress_control(node: &mut Node, control: &OutPressControl) -> usize {
    let mut count = 0;
    for (name, value) in control.solver_params() {
        count = set_solver_param(node, name, value);
    }
    count
}

/// Sizing inputs of a zone, read from its solver parameters. Absent values are `None`.
pub fn zone_sizing(zone: &Node) -> ZoneSizing {
    let read = |name: &str| {
        zone.child(SOLVER_DEFINE)
            .and_then(|define| define.child(name))
            .and_then(|param| param.value.as_real())
    };
    ZoneSizing{snear: read(SNEAR), dfar: read(DFAR)}
}

/// Far-field distance giving exactly the requested near-wall spacing after `levels` halvings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FarField {
    pub dfar: f64,
    pub levels: u32,
}

/// Optimal far-field distance for a body of size `size_max`.
///
/// With no level count (or a zero one), the count is the smallest giving a far field
/// of at least `growth_factor * size_max`. The distance is then
/// `0.5 * (near_spacing * 2^levels * (min_cells - 1) - size_max)`, truncated to `10^-levels`.
pub fn compute_optimal_far_field(
    size_max: f64,
    near_spacing: f64,
    min_cells: u32,
    growth_factor: f64,
    level_count: Option<u32>,
) -> ProcResult<FarField> {
    if near_spacing.is_nan() || near_spacing <= 0.0 {
        return Err(SizingError::InvalidParameter(format!("near spacing must be positive, got {}", near_spacing)));
    }
    if min_cells < 2 {
        return Err(SizingError::InvalidParameter(format!("at least 2 coarse cells are needed, got {}", min_cells)));
    }
    let intervals = (min_cells - 1) as f64;

    let levels = match level_count {
        Some(levels) if levels > 0 => levels,
        _ if growth_factor > 0.0 => {
            let target = 2.0 * growth_factor * size_max + size_max;
            (target / (intervals * near_spacing)).log2().ceil().max(0.0) as u32
        },
        _ => {
            return Err(SizingError::InvalidParameter(
                "either a level count or a positive growth factor is needed".to_string()
            ));
        },
    };

    let exponent = i32::try_from(levels)
        .map_err(|_| SizingError::InvalidParameter(format!("level count {} is out of range", levels)))?;
    let dfar = 0.5 * (near_spacing * (2f64.powi(exponent) * intervals) - size_max);
    let precision = 10f64.powi(exponent);
    let dfar = (dfar * precision).trunc() / precision;
    if !precision.is_finite() || !dfar.is_finite() {
        return Err(SizingError::InvalidParameter(format!("{} levels cannot be truncated to 10^-{}", levels, levels)));
    }
    debug!("Far field: {} levels, dfar = {}", levels, dfar);
    Ok(FarField{dfar, levels})
}

/// Optimal far field around all zones of `node`, sized from their bounding box.
pub fn optimal_far_field_for(
    node: &Node,
    kernel: &KernelChoice,
    near_spacing: f64,
    min_cells: u32,
    growth_factor: f64,
    level_count: Option<u32>,
) -> ProcResult<FarField> {
    let zones = node.zones();
    let bbox = kernel.bounding_box(&zones)?;
    let far_field = compute_optimal_far_field(bbox.size_max(), near_spacing, min_cells, growth_factor, level_count)?;
    info!("Optimal far field around {}: dfar = {} over {} levels", node.name, far_field.dfar, far_field.levels);
    Ok(far_field)
}
