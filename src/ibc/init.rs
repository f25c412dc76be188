use serde::{Serialize, Deserialize};
use tracing::info;

use crate::ibc::{self, IbcError, IbcRecord, IbcType, ImagePoint, family_of, visit_records};
use crate::sampler::{FieldSampler, SamplerChoice};
use crate::tree::Node;

/// Interpolation order used when sampling a plane.
pub const DEFAULT_SAMPLING_ORDER: usize = 2;

/// Static pressure imposed on outflow records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutflowCondition {
    #[serde(alias = "p_static", alias = "PStatic")]
    pub static_pressure: f64,
    /// Column of the sampled tuples holding the static pressure.
    pub pressure_var: usize,
    /// Negate `Density` when false.
    #[serde(alias = "is_density_constant")]
    pub density_constant: bool,
}
impl Default for OutflowCondition {
    fn default() -> Self {
        OutflowCondition{
            static_pressure: 1e5,
            pressure_var: 0,
            density_constant: true,
        }
    }
}

/// Stagnation state and direction imposed on injection records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionCondition {
    #[serde(alias = "p_tot", alias = "PTot")]
    pub total_pressure: f64,
    #[serde(alias = "h_tot", alias = "HTot")]
    pub total_enthalpy: f64,
    #[serde(alias = "inj_dir")]
    pub direction: [f64; 3],
    /// Column of the sampled tuples holding the stagnation pressure.
    pub pressure_var: usize,
    /// Column of the sampled tuples holding the stagnation enthalpy.
    pub enthalpy_var: usize,
}
impl Default for InjectionCondition {
    fn default() -> Self {
        InjectionCondition{
            total_pressure: 1e5,
            total_enthalpy: 3e5,
            direction: [1.0, 0.0, 0.0],
            pressure_var: 0,
            enthalpy_var: 0,
        }
    }
}

/// A plane of flow data to sample at the wall points instead of using constants.
#[derive(Debug, Clone, Copy)]
pub struct SampledSource<'a> {
    pub sampler: &'a SamplerChoice,
    pub plane: &'a Node,
    pub order: usize,
}
impl<'a> SampledSource<'a> {
    pub fn new(sampler: &'a SamplerChoice, plane: &'a Node) -> Self {
        SampledSource{sampler, plane, order: DEFAULT_SAMPLING_ORDER}
    }

    /// Sample the plane at the wall points of the record and return the requested columns.
    fn columns(&self, record: &IbcRecord, columns: &[usize]) -> ibc::ProcResult<Vec<Vec<f64>>> {
        let points = record.wall_points()?;
        let samples = self.sampler.sample(self.plane, &points, self.order)?;
        if samples.len() != points.len() {
            return Err(IbcError::SampleCount{
                record: record.name().to_string(),
                expected: points.len(),
                found: samples.len(),
            });
        }

        let mut extracted = Vec::with_capacity(columns.len());
        for &column in columns.iter() {
            let mut values = Vec::with_capacity(samples.len());
            for sample in samples.iter() {
                match sample.get(column) {
                    Some(value) => values.push(*value),
                    None => {
                        return Err(IbcError::MissingColumn{
                            record: record.name().to_string(),
                            column,
                            width: sample.len(),
                        });
                    },
                }
            }
            extracted.push(values);
        }
        Ok(extracted)
    }
}

/// Apply `write` to every first-image record of type `ibc_type` in `family`.
fn for_family_records<F>(tree: &mut Node, ibc_type: IbcType, family: &str, mut write: F) -> ibc::ProcResult<usize>
where F: FnMut(&str, &mut IbcRecord) -> ibc::ProcResult<()>
{
    visit_records(
        tree,
        |node, name| {
            name.image_point == ImagePoint::First
                && name.ibc_type == ibc_type
                && family_of(node) == Some(family)
        },
        |zone_name, node, name| {
            let mut record = IbcRecord::open(node, name)?;
            write(zone_name, &mut record)
        },
    )
}

/// Impose a static pressure on the outflow records of a family, from a constant or a sampled plane.
/// Returns the number of records written.
pub fn set_outflow_pressure(
    tree: &mut Node,
    family: &str,
    condition: &OutflowCondition,
    source: Option<&SampledSource>,
) -> ibc::ProcResult<usize> {
    let count = for_family_records(tree, IbcType::OutPressure, family, |zone_name, record| {
        match source {
            Some(source) => {
                info!("Zone: {} | ZoneSubRegion: {}", zone_name, record.name());
                let columns = source.columns(record, &[condition.pressure_var])?;
                record.write(ibc::PRESSURE, &columns[0])?;
            },
            None => record.fill(ibc::PRESSURE, condition.static_pressure)?,
        }
        if !condition.density_constant {
            for density in record.field_mut("Density")?.iter_mut() {
                *density = -*density;
            }
        }
        Ok(())
    })?;
    info!("Outflow pressure set on {} records of family {}", count, family);
    Ok(count)
}

/// Impose a wall temperature on the isothermal records of a family.
/// Returns the number of records written.
pub fn set_wall_temperature(tree: &mut Node, family: &str, t_wall: f64) -> ibc::ProcResult<usize> {
    let count = for_family_records(tree, IbcType::Isothermal, family, |_, record| {
        record.fill("TemperatureWall", t_wall)?;
        record.fill("Temperature", t_wall)
    })?;
    info!("Wall temperature set on {} records of family {}", count, family);
    Ok(count)
}

/// Impose a wall heat flux on the heat-flux records of a family.
/// `Temperature` receives the flux value as well.
/// Returns the number of records written.
pub fn set_wall_heat_flux(tree: &mut Node, family: &str, q_wall: f64) -> ibc::ProcResult<usize> {
    let count = for_family_records(tree, IbcType::HeatFlux, family, |_, record| {
        record.fill("WallHeatFlux", q_wall)?;
        record.fill("Temperature", q_wall)
    })?;
    info!("Wall heat flux set on {} records of family {}", count, family);
    Ok(count)
}

/// Impose the stagnation state and flow direction on the injection records of a family.
/// Wall-law fields are removed from matching records.
/// Returns the number of records written.
pub fn set_injection_condition(
    tree: &mut Node,
    family: &str,
    condition: &InjectionCondition,
    source: Option<&SampledSource>,
) -> ibc::ProcResult<usize> {
    let count = for_family_records(tree, IbcType::Injection, family, |zone_name, record| {
        record.remove_fields(&["utau", "yplus"]);
        match source {
            Some(source) => {
                info!("Zone: {} | ZoneSubRegion: {}", zone_name, record.name());
                let columns = source.columns(record, &[condition.pressure_var, condition.enthalpy_var])?;
                record.write("StagnationPressure", &columns[0])?;
                record.write("StagnationEnthalpy", &columns[1])?;
            },
            None => {
                record.fill("StagnationPressure", condition.total_pressure)?;
                record.fill("StagnationEnthalpy", condition.total_enthalpy)?;
            },
        }
        let [dirx, diry, dirz] = condition.direction;
        record.fill("dirx", dirx)?;
        record.fill("diry", diry)?;
        record.fill("dirz", dirz)
    })?;
    info!("Injection condition set on {} records of family {}", count, family);
    Ok(count)
}
