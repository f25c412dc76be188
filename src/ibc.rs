/*!
 * Immersed boundary condition records.
 *
 * Each zone of a connectivity tree may hold `ZoneSubRegion_t` records named
 * `IBCD_<tag>_<suffix>` (or `2_IBCD_...` for the second image point). Every real-array
 * field of a record holds `nIBC` values, `nIBC` being the length of `Pressure`.
 */

use tracing::warn;

use crate::tree::{Node, NodeKind};

mod proc_errors;
mod schema;
mod record;
mod migrate;
mod init;

pub use proc_errors::{
    IbcError,
    ProcResult,
    err_str,
};
pub use schema::{
    FieldDescriptor,
    FillPolicy,
    IBM_DERIVED,
    FLOW_FIELDS,
    TYPE_OWNED,
    type_fields,
    flow_fields,
    foreign_owned,
};
pub use record::{
    IbcType,
    ImagePoint,
    RecordName,
    IbcRecord,
    RECORD_MARKER,
    SECOND_IMAGE_PREFIX,
    PRESSURE,
    WALL_POINT_FIELDS,
    family_of,
    new_record,
};
pub use migrate::{
    RemovalPolicy,
    MigrationOptions,
    migrate_ibc_type,
    promote_second_image_point_records,
};
pub use init::{
    OutflowCondition,
    InjectionCondition,
    SampledSource,
    DEFAULT_SAMPLING_ORDER,
    set_outflow_pressure,
    set_wall_temperature,
    set_wall_heat_flux,
    set_injection_condition,
};

/// Visit every IBC record of every zone below `tree` for which `select` holds.
/// Sub-regions with the marker but an unreadable tag are skipped with a warning.
/// The visitor gets the zone name, the record node and its parsed name.
/// Returns the number of records visited.
fn visit_records<S, F>(tree: &mut Node, mut select: S, mut visit: F) -> ProcResult<usize>
where
    S: FnMut(&Node, &RecordName) -> bool,
    F: FnMut(&str, &mut Node, RecordName) -> ProcResult<()>,
{
    let mut count = 0;
    for zone in tree.zones_mut() {
        let zone_name = zone.name.clone();
        for sub_region in zone.children_by_kind_mut(NodeKind::ZoneSubRegion) {
            let name = match RecordName::parse(&sub_region.name) {
                Ok(Some(name)) => name,
                Ok(None) => continue,
                Err(error) => {
                    warn!("Skipping sub-region of zone {}: {}", zone_name, error);
                    continue;
                },
            };
            if select(sub_region, &name) {
                visit(&zone_name, sub_region, name)?;
                count += 1;
            }
        }
    }
    Ok(count)
}
