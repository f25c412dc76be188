use tracing::debug;

use crate::ibc::IbcType;

/// How a freshly allocated field is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    Zero,
}

/// A type-specific field of an IBC record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub fill: FillPolicy,
}

const fn zeroed(name: &'static str) -> FieldDescriptor {
    FieldDescriptor{name, fill: FillPolicy::Zero}
}

const WALL_LAW: &[FieldDescriptor] = &[
    zeroed("utau"),
    zeroed("yplus"),
];

const INJECTION: &[FieldDescriptor] = &[
    zeroed("StagnationEnthalpy"),
    zeroed("StagnationPressure"),
    zeroed("dirx"),
    zeroed("diry"),
    zeroed("dirz"),
];

const PRESSURE_GRADIENT: &[FieldDescriptor] = &[
    zeroed("utau"),
    zeroed("yplus"),
    zeroed("gradxPressure"),
    zeroed("gradyPressure"),
    zeroed("gradzPressure"),
];

const FULL_GRADIENT: &[FieldDescriptor] = &[
    zeroed("utau"),
    zeroed("yplus"),
    zeroed("gradxPressure"),
    zeroed("gradyPressure"),
    zeroed("gradzPressure"),
    zeroed("gradxVelocityX"),
    zeroed("gradyVelocityX"),
    zeroed("gradzVelocityX"),
    zeroed("gradxVelocityY"),
    zeroed("gradyVelocityY"),
    zeroed("gradzVelocityY"),
    zeroed("gradxVelocityZ"),
    zeroed("gradyVelocityZ"),
    zeroed("gradzVelocityZ"),
];

const CURVATURE: &[FieldDescriptor] = &[
    zeroed("KCurv"),
];

const FLOW: &[FieldDescriptor] = &[
    zeroed("Density"),
    zeroed("VelocityX"),
    zeroed("VelocityY"),
    zeroed("VelocityZ"),
];

/// Fields computed by the IBM preprocessing, removed whenever a record changes type.
pub const IBM_DERIVED: &[&str] = &[
    "utau",
    "StagnationEnthalpy",
    "StagnationPressure",
    "dirx",
    "diry",
    "dirz",
    "gradxPressure",
    "gradyPressure",
    "gradzPressure",
    "gradxVelocityX",
    "gradyVelocityX",
    "gradzVelocityX",
    "gradxVelocityY",
    "gradyVelocityY",
    "gradzVelocityY",
    "gradxVelocityZ",
    "gradyVelocityZ",
    "gradzVelocityZ",
    "KCurv",
    "yplus",
];

/// Flow fields reset when a second-image-point record is promoted.
pub const FLOW_FIELDS: &[&str] = &["Density", "VelocityX", "VelocityY", "VelocityZ"];

/// Fields created upstream for one type only.
pub const TYPE_OWNED: &[(IbcType, &str)] = &[
    (IbcType::Isothermal, "TemperatureWall"),
    (IbcType::HeatFlux, "WallHeatFlux"),
];

/// Type-specific fields of an IBC type. Types without extra fields get an empty set.
pub fn type_fields(ibc_type: IbcType) -> &'static [FieldDescriptor] {
    match ibc_type {
        IbcType::Log | IbcType::Musker | IbcType::Tble => WALL_LAW,
        IbcType::Injection => INJECTION,
        IbcType::Mafzal => PRESSURE_GRADIENT,
        IbcType::TbleFull => FULL_GRADIENT,
        IbcType::SlipCurvature => CURVATURE,
        other => {
            debug!("No type-specific fields for IBC type {}", other);
            &[]
        },
    }
}

/// Flow fields as allocated on promotion.
pub fn flow_fields() -> &'static [FieldDescriptor] {
    FLOW
}

/// Type-owned fields that do not belong to `ibc_type`.
pub fn foreign_owned(ibc_type: IbcType) -> Vec<&'static str> {
    TYPE_OWNED.iter()
        .filter(|(owner, _)| *owner != ibc_type)
        .map(|(_, field)| *field)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_fields_are_removable() {
        for tag in [2, 3, 5, 6, 10, 11, 100] {
            for field in type_fields(IbcType::from_tag(tag)) {
                assert!(IBM_DERIVED.contains(&field.name), "{} is not removable", field.name);
            }
        }
        assert_eq!(IBM_DERIVED.len(), 20);
        let flow = flow_fields().iter().map(|field| field.name).collect::<Vec<_>>();
        assert_eq!(flow, FLOW_FIELDS);
    }

    #[test]
    fn table_sizes() {
        assert_eq!(type_fields(IbcType::Musker).len(), 2);
        assert_eq!(type_fields(IbcType::Injection).len(), 5);
        assert_eq!(type_fields(IbcType::Mafzal).len(), 5);
        assert_eq!(type_fields(IbcType::TbleFull).len(), 14);
        assert_eq!(type_fields(IbcType::SlipCurvature), &[zeroed("KCurv")]);
        assert!(type_fields(IbcType::NoSlip).is_empty());
        assert!(type_fields(IbcType::Other(77)).is_empty());
    }

    #[test]
    fn foreign_fields_exclude_own() {
        assert_eq!(foreign_owned(IbcType::Isothermal), vec!["WallHeatFlux"]);
        assert_eq!(foreign_owned(IbcType::Slip), vec!["TemperatureWall", "WallHeatFlux"]);
    }
}
