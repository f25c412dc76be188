use serde::{Serialize, Deserialize};
use strum::{Display, EnumIter};
use tracing::{debug, info};

use crate::ibc::{
    self,
    FLOW_FIELDS,
    IBM_DERIVED,
    IbcRecord,
    IbcType,
    ImagePoint,
    flow_fields,
    foreign_owned,
    type_fields,
    visit_records,
};
use crate::tree::Node;

/// What to remove from a record before allocating the fields of its new type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RemovalPolicy {
    /// Only the IBM-derived fields. Other leftovers of the old type are kept.
    #[default]
    DerivedOnly,
    /// The IBM-derived fields and the type-owned fields of other types.
    PruneForeign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationOptions {
    pub removal: RemovalPolicy,
}

/// Change the type of every first-image record tagged `old` to `new`.
/// The suffix is kept, the IBM-derived fields are dropped and the fields of `new` are allocated zeroed.
/// Returns the number of migrated records.
pub fn migrate_ibc_type(tree: &mut Node, old: IbcType, new: IbcType, options: &MigrationOptions) -> ibc::ProcResult<usize> {
    let count = visit_records(
        tree,
        |_, name| name.image_point == ImagePoint::First && name.ibc_type == old,
        |zone_name, node, name| {
            let mut record = IbcRecord::open(node, name)?;
            let removed = match options.removal {
                RemovalPolicy::DerivedOnly => record.remove_fields(IBM_DERIVED),
                RemovalPolicy::PruneForeign => {
                    record.remove_fields(IBM_DERIVED) + record.remove_fields(&foreign_owned(new))
                },
            };
            let renamed = record.name().retagged(new);
            debug!("{}: {} -> {} ({} fields removed, nIBC = {})", zone_name, record.name(), renamed, removed, record.n_ibc());
            record.rename(renamed);
            record.allocate(type_fields(new));
            Ok(())
        },
    )?;
    info!("Migrated {} IBC records from type {} to type {}", count, old, new);
    Ok(count)
}

/// Turn every second-image-point record into a first-image record of the same type and suffix.
/// Flow fields come back zeroed, the IBM-derived fields are reallocated for the record type.
/// Returns the number of promoted records.
pub fn promote_second_image_point_records(tree: &mut Node) -> ibc::ProcResult<usize> {
    let count = visit_records(
        tree,
        |_, name| name.image_point == ImagePoint::Second,
        |zone_name, node, name| {
            let mut record = IbcRecord::open(node, name)?;
            record.remove_fields(FLOW_FIELDS);
            record.remove_fields(IBM_DERIVED);
            let promoted = record.name().promoted();
            debug!("{}: {} -> {} (nIBC = {})", zone_name, record.name(), promoted, record.n_ibc());
            let ibc_type = promoted.ibc_type;
            record.rename(promoted);
            record.allocate(flow_fields());
            record.allocate(type_fields(ibc_type));
            Ok(())
        },
    )?;
    info!("Promoted {} second image point records", count);
    Ok(count)
}
