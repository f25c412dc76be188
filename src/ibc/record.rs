use itertools::izip;
use serde::{Serialize, Deserialize};

use crate::geo_3d::Point;
use crate::ibc::{self, FieldDescriptor, FillPolicy, IbcError};
use crate::tree::{Node, NodeKind, NodeValue, TreeError};

/// Name marker of an IBC sub-region.
pub const RECORD_MARKER: &str = "IBCD";
/// Prefix of a second-image-point record.
pub const SECOND_IMAGE_PREFIX: &str = "2_";
/// Field holding `nIBC` values on every record.
pub const PRESSURE: &str = "Pressure";
/// Wall point coordinates of a record.
pub const WALL_POINT_FIELDS: [&str; 3] = ["CoordinateX_PW", "CoordinateY_PW", "CoordinateZ_PW"];

/// Immersed boundary condition type, identified by its integer tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "IbcTypeRepr", into = "u32")]
pub enum IbcType {
    #[default]
    Slip,
    NoSlip,
    Log,
    Musker,
    OutPressure,
    Injection,
    Tble,
    MuskerMob,
    Pohlhausen,
    Thwaites,
    Mafzal,
    TbleFull,
    Isothermal,
    HeatFlux,
    SlipCurvature,
    /// Tag without a known solver name.
    Other(u32),
}

const NAMED_TYPES: &[(IbcType, u32, &str)] = &[
    (IbcType::Slip, 0, "slip"),
    (IbcType::NoSlip, 1, "noslip"),
    (IbcType::Log, 2, "Log"),
    (IbcType::Musker, 3, "Musker"),
    (IbcType::OutPressure, 4, "outpress"),
    (IbcType::Injection, 5, "inj"),
    (IbcType::Tble, 6, "TBLE"),
    (IbcType::MuskerMob, 7, "MuskerMob"),
    (IbcType::Pohlhausen, 8, "Pohlhausen"),
    (IbcType::Thwaites, 9, "Thwaites"),
    (IbcType::Mafzal, 10, "Mafzal"),
    (IbcType::TbleFull, 11, "TBLE_FULL"),
    (IbcType::Isothermal, 12, "isothermal"),
    (IbcType::HeatFlux, 13, "heatflux"),
    (IbcType::SlipCurvature, 100, "slip_cr"),
];

impl IbcType {
    pub fn from_tag(tag: u32) -> Self {
        NAMED_TYPES.iter()
            .find(|(_, named_tag, _)| *named_tag == tag)
            .map(|(ibc_type, _, _)| *ibc_type)
            .unwrap_or(IbcType::Other(tag))
    }

    pub fn tag(&self) -> u32 {
        match self {
            IbcType::Other(tag) => *tag,
            known => NAMED_TYPES.iter()
                .find(|(ibc_type, _, _)| ibc_type == known)
                .map(|(_, tag, _)| *tag)
                .unwrap_or_default(),
        }
    }

    /// Name understood by the solver, when the tag has one.
    pub fn solver_name(&self) -> Option<&'static str> {
        let tag = self.tag();
        NAMED_TYPES.iter()
            .find(|(_, named_tag, _)| *named_tag == tag)
            .map(|(_, _, name)| *name)
    }
}
impl std::fmt::Display for IbcType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.solver_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.tag()),
        }
    }
}
impl std::str::FromStr for IbcType {
    type Err = String;

    /// Parse a solver name (case-insensitive) or an integer tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(tag) = s.parse::<u32>() {
            return Ok(IbcType::from_tag(tag));
        }
        NAMED_TYPES.iter()
            .find(|(_, _, name)| name.eq_ignore_ascii_case(s))
            .map(|(ibc_type, _, _)| *ibc_type)
            .ok_or_else(|| {
                let names = NAMED_TYPES.iter().map(|(_, _, name)| *name).collect::<Vec<_>>();
                format!("Unknown IBC type \"{}\" (expected a tag or one of: {})", s, names.join(", "))
            })
    }
}
impl From<IbcType> for u32 {
    fn from(ibc_type: IbcType) -> Self {
        ibc_type.tag()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IbcTypeRepr {
    Tag(u32),
    Name(String),
}
impl TryFrom<IbcTypeRepr> for IbcType {
    type Error = String;

    fn try_from(repr: IbcTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            IbcTypeRepr::Tag(tag) => Ok(IbcType::from_tag(tag)),
            IbcTypeRepr::Name(name) => name.parse(),
        }
    }
}

/// Which image point a record interpolates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePoint {
    First,
    Second,
}

/// Parsed name of an IBC sub-region: `[2_]IBCD_<tag>_<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordName {
    pub image_point: ImagePoint,
    pub ibc_type: IbcType,
    pub suffix: String,
}
impl RecordName {
    pub fn new(image_point: ImagePoint, ibc_type: IbcType, suffix: &str) -> Self {
        RecordName{image_point, ibc_type, suffix: suffix.to_string()}
    }

    /// Parse a sub-region name.
    /// `Ok(None)` if the name does not carry the record marker,
    /// `Err` if it does but the tag is not an integer.
    pub fn parse(name: &str) -> Result<Option<Self>, String> {
        let (image_point, rest) = match name.strip_prefix(SECOND_IMAGE_PREFIX) {
            Some(rest) if rest.starts_with(RECORD_MARKER) => (ImagePoint::Second, rest),
            _ => (ImagePoint::First, name),
        };
        let rest = match rest.strip_prefix(RECORD_MARKER) {
            Some(rest) => rest,
            None => return Ok(None),
        };
        let rest = match rest.strip_prefix('_') {
            Some(rest) => rest,
            None => return Err(format!("Record name {} has no type tag", name)),
        };
        let (tag, suffix) = rest.split_once('_').unwrap_or((rest, ""));
        let tag = tag.parse::<u32>()
            .map_err(|_| format!("Record name {} has a non-integer type tag \"{}\"", name, tag))?;
        Ok(Some(RecordName::new(image_point, IbcType::from_tag(tag), suffix)))
    }

    /// Same record as a first-image-point record.
    pub fn promoted(&self) -> Self {
        RecordName{image_point: ImagePoint::First, ..self.clone()}
    }

    /// Same record with another type.
    pub fn retagged(&self, ibc_type: IbcType) -> Self {
        RecordName{ibc_type, ..self.clone()}
    }
}
impl std::fmt::Display for RecordName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.image_point == ImagePoint::Second {
            write!(f, "{}", SECOND_IMAGE_PREFIX)?;
        }
        write!(f, "{}_{}_{}", RECORD_MARKER, self.ibc_type.tag(), self.suffix)
    }
}

/// Family of a sub-region, if it has one.
pub fn family_of(node: &Node) -> Option<&str> {
    node.child_by_kind(NodeKind::FamilyName).and_then(|family| family.value.as_text())
}

/// Checked view over an IBC sub-region.
/// Every field access verifies the field holds `nIBC` values, `nIBC` being read from `Pressure` on opening.
#[derive(Debug)]
pub struct IbcRecord<'a> {
    node: &'a mut Node,
    name: RecordName,
    n_ibc: usize,
}
impl<'a> IbcRecord<'a> {
    /// Open a record. Fails if `Pressure` is missing or is not a real array.
    pub fn open(node: &'a mut Node, name: RecordName) -> ibc::ProcResult<Self> {
        let pressure = node.require_child(PRESSURE)?;
        let n_ibc = pressure.value.as_reals()
            .ok_or_else(|| TreeError::WrongValue{
                name: format!("{}/{}", node.name, PRESSURE),
                expected: "a real array".to_string(),
            })?
            .len();
        Ok(IbcRecord{node, name, n_ibc})
    }

    pub fn n_ibc(&self) -> usize {
        self.n_ibc
    }

    pub fn name(&self) -> &RecordName {
        &self.name
    }

    pub fn family(&self) -> Option<&str> {
        family_of(self.node)
    }

    /// Values of a field.
    pub fn field(&self, name: &str) -> ibc::ProcResult<&[f64]> {
        let record = &self.node.name;
        let values = self.node.require_child(name)?.value.as_reals()
            .ok_or_else(|| TreeError::WrongValue{name: format!("{}/{}", record, name), expected: "a real array".to_string()})?;
        self.check_len(name, values.len())?;
        Ok(values)
    }

    /// Mutable values of a field. The length is checked, and cannot change through the slice.
    pub fn field_mut(&mut self, name: &str) -> ibc::ProcResult<&mut [f64]> {
        let n_ibc = self.n_ibc;
        let record = self.node.name.clone();
        let values = self.node.require_child_mut(name)?.value.as_reals_mut()
            .ok_or_else(|| TreeError::WrongValue{name: format!("{}/{}", record, name), expected: "a real array".to_string()})?;
        if values.len() != n_ibc {
            return Err(IbcError::LengthMismatch{record, field: name.to_string(), expected: n_ibc, found: values.len()});
        }
        Ok(values.as_mut_slice())
    }

    /// Set every value of an existing field.
    pub fn fill(&mut self, name: &str, value: f64) -> ibc::ProcResult<()> {
        self.field_mut(name)?.fill(value);
        Ok(())
    }

    /// Overwrite an existing field with `nIBC` values.
    pub fn write(&mut self, name: &str, values: &[f64]) -> ibc::ProcResult<()> {
        self.check_len(name, values.len())?;
        self.field_mut(name)?.copy_from_slice(values);
        Ok(())
    }

    /// Remove every child named after one of `names`. Returns the number removed.
    pub fn remove_fields(&mut self, names: &[&str]) -> usize {
        names.iter().map(|name| self.node.remove_children_named(name)).sum()
    }

    /// Create the fields, filled according to their descriptor.
    /// Existing fields of the same name are overwritten.
    pub fn allocate(&mut self, fields: &[FieldDescriptor]) {
        for field in fields.iter() {
            let values = match field.fill {
                FillPolicy::Zero => vec![0.0; self.n_ibc],
            };
            self.node.create_unique_child(field.name, NodeKind::DataArray, NodeValue::Reals(values));
        }
    }

    /// Rename the record. The node name is regenerated from `name`.
    pub fn rename(&mut self, name: RecordName) {
        self.node.name = name.to_string();
        self.name = name;
    }

    /// Wall points `(CoordinateX_PW, CoordinateY_PW, CoordinateZ_PW)` in record order.
    pub fn wall_points(&self) -> ibc::ProcResult<Vec<Point>> {
        let [x_name, y_name, z_name] = WALL_POINT_FIELDS;
        let (xs, ys, zs) = (self.field(x_name)?, self.field(y_name)?, self.field(z_name)?);
        Ok(izip!(xs, ys, zs).map(|(x, y, z)| Point::new(*x, *y, *z)).collect())
    }

    /// Names of the children of the record, in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.node.child_names()
    }

    fn check_len(&self, field: &str, found: usize) -> ibc::ProcResult<()> {
        if found != self.n_ibc {
            return Err(IbcError::LengthMismatch{
                record: self.node.name.clone(),
                field: field.to_string(),
                expected: self.n_ibc,
                found,
            });
        }
        Ok(())
    }
}

/// Build an IBC sub-region with `Pressure`, the wall points and the flow fields zeroed.
pub fn new_record(name: &RecordName, family: Option<&str>, n_ibc: usize) -> Node {
    let mut node = Node::new(&name.to_string(), NodeKind::ZoneSubRegion, NodeValue::None);
    if let Some(family) = family {
        node.add_child(Node::new("FamilyName", NodeKind::FamilyName, family.into()));
    }
    node.add_child(Node::data_array(PRESSURE, vec![0.0; n_ibc]));
    for field in ibc::FLOW_FIELDS.iter().chain(WALL_POINT_FIELDS.iter()) {
        node.add_child(Node::data_array(field, vec![0.0; n_ibc]));
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_and_tags() {
        assert_eq!(IbcType::from_tag(5), IbcType::Injection);
        assert_eq!(IbcType::from_tag(42), IbcType::Other(42));
        assert_eq!(IbcType::SlipCurvature.tag(), 100);
        assert_eq!(IbcType::Musker.to_string(), "Musker");
        assert_eq!(IbcType::Other(42).to_string(), "42");
        assert_eq!("TBLE_FULL".parse::<IbcType>().unwrap(), IbcType::TbleFull);
        assert_eq!("noslip".parse::<IbcType>().unwrap(), IbcType::NoSlip);
        assert_eq!("13".parse::<IbcType>().unwrap(), IbcType::HeatFlux);
        assert!("nowhere".parse::<IbcType>().is_err());
    }

    #[test]
    fn type_deserializes_from_name_or_tag() {
        let from_tag: IbcType = serde_json::from_str("3").unwrap();
        let from_name: IbcType = serde_json::from_str("\"inj\"").unwrap();
        assert_eq!(from_tag, IbcType::Musker);
        assert_eq!(from_name, IbcType::Injection);
        assert_eq!(serde_json::to_string(&IbcType::Injection).unwrap(), "5");
    }

    #[test]
    fn record_names_parse_and_regenerate() {
        let name = RecordName::parse("IBCD_5_wall_1").unwrap().unwrap();
        assert_eq!(name, RecordName::new(ImagePoint::First, IbcType::Injection, "wall_1"));
        assert_eq!(name.to_string(), "IBCD_5_wall_1");

        let second = RecordName::parse("2_IBCD_3_a").unwrap().unwrap();
        assert_eq!(second.image_point, ImagePoint::Second);
        assert_eq!(second.to_string(), "2_IBCD_3_a");
        assert_eq!(second.promoted().to_string(), "IBCD_3_a");

        let bare = RecordName::parse("IBCD_2").unwrap().unwrap();
        assert_eq!(bare.suffix, "");
        assert_eq!(bare.to_string(), "IBCD_2_");

        assert_eq!(RecordName::parse("ID_0_a").unwrap(), None);
        assert!(RecordName::parse("IBCD_x_a").is_err());
    }

    #[test]
    fn record_view_checks_lengths() {
        let name = RecordName::new(ImagePoint::First, IbcType::OutPressure, "a");
        let mut node = new_record(&name, Some("out"), 3);
        node.add_child(Node::data_array("bad", vec![1.0]));

        let mut record = IbcRecord::open(&mut node, name).unwrap();
        assert_eq!(record.n_ibc(), 3);
        assert_eq!(record.family(), Some("out"));
        assert!(record.fill("Density", 2.0).is_ok());
        assert_eq!(record.field("Density").unwrap(), &[2.0, 2.0, 2.0]);
        match record.field("bad") {
            Err(IbcError::LengthMismatch{expected, found, ..}) => assert_eq!((expected, found), (3, 1)),
            other => panic!("expected a length mismatch, got {:?}", other),
        }
        assert!(record.write("Density", &[1.0]).is_err());
        assert!(record.field("missing").is_err());
    }

    #[test]
    fn record_without_pressure_cannot_open() {
        let name = RecordName::new(ImagePoint::First, IbcType::Injection, "a");
        let mut node = Node::new(&name.to_string(), NodeKind::ZoneSubRegion, NodeValue::None);
        assert!(matches!(IbcRecord::open(&mut node, name), Err(IbcError::TreeError(_))));
    }
}
