use serde::{Serialize, Deserialize};
use strum::{Display, EnumString};

use crate::tree::{ProcResult, not_found};

/// Kind tag of a tree node, named after the matching CGNS SIDS type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString)]
pub enum NodeKind {
    #[serde(rename = "CGNSTree_t")]
    #[strum(serialize = "CGNSTree_t")]
    Tree,
    #[serde(rename = "CGNSBase_t")]
    #[strum(serialize = "CGNSBase_t")]
    Base,
    #[serde(rename = "Zone_t")]
    #[strum(serialize = "Zone_t")]
    Zone,
    #[serde(rename = "GridCoordinates_t")]
    #[strum(serialize = "GridCoordinates_t")]
    GridCoordinates,
    #[serde(rename = "Elements_t")]
    #[strum(serialize = "Elements_t")]
    Elements,
    #[serde(rename = "FlowSolution_t")]
    #[strum(serialize = "FlowSolution_t")]
    FlowSolution,
    #[serde(rename = "ZoneSubRegion_t")]
    #[strum(serialize = "ZoneSubRegion_t")]
    ZoneSubRegion,
    #[serde(rename = "UserDefinedData_t")]
    #[strum(serialize = "UserDefinedData_t")]
    UserDefinedData,
    #[serde(rename = "DataArray_t")]
    #[strum(serialize = "DataArray_t")]
    DataArray,
    #[serde(rename = "FamilyName_t")]
    #[strum(serialize = "FamilyName_t")]
    FamilyName,
}

/// Value carried by a node.
#[derive(Debug, Clone, PartialEq, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeValue {
    #[default]
    None,
    Int(i64),
    Real(f64),
    Text(String),
    Reals(Vec<f64>),
    Ints(Vec<i64>),
}
impl NodeValue {
    /// Scalar view of the value. Integers are widened, single-element arrays are unwrapped.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            NodeValue::Real(value) => Some(*value),
            NodeValue::Int(value) => Some(*value as f64),
            NodeValue::Reals(values) if values.len() == 1 => Some(values[0]),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            NodeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_reals(&self) -> Option<&[f64]> {
        match self {
            NodeValue::Reals(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_reals_mut(&mut self) -> Option<&mut Vec<f64>> {
        match self {
            NodeValue::Reals(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            NodeValue::Ints(values) => Some(values),
            _ => None,
        }
    }
}
impl From<f64> for NodeValue {
    fn from(value: f64) -> Self {
        NodeValue::Real(value)
    }
}
impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        NodeValue::Int(value)
    }
}
impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::Text(value.to_string())
    }
}
impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::Text(value)
    }
}
impl From<Vec<f64>> for NodeValue {
    fn from(values: Vec<f64>) -> Self {
        NodeValue::Reals(values)
    }
}

/// A named, typed tree node owning its children.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub value: NodeValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}
impl Node {
    /// Create a new childless node.
    pub fn new(name: &str, kind: NodeKind, value: NodeValue) -> Self {
        Node{name: name.to_string(), kind, value, children: Vec::new()}
    }

    /// Create an empty tree root.
    pub fn new_tree() -> Self {
        Node::new("CGNSTree", NodeKind::Tree, NodeValue::None)
    }

    /// Create an empty base.
    pub fn new_base(name: &str) -> Self {
        Node::new(name, NodeKind::Base, NodeValue::None)
    }

    /// Create a data array node.
    pub fn data_array(name: &str, value: impl Into<NodeValue>) -> Self {
        Node::new(name, NodeKind::DataArray, value.into())
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Clone the node, apply an in-place operation to the clone, and return it.
    /// The original is left untouched.
    pub fn modified<E, F>(&self, operation: F) -> Result<Node, E>
    where F: FnOnce(&mut Node) -> Result<(), E>
    {
        let mut copy = self.clone();
        operation(&mut copy)?;
        Ok(copy)
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    /// First direct child with the given name, mutable.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// Direct child with the given name, or a `NotFound` error.
    pub fn require_child(&self, name: &str) -> ProcResult<&Node> {
        let parent = &self.name;
        self.child(name).ok_or_else(|| not_found(name, parent))
    }

    /// Direct child with the given name, mutable, or a `NotFound` error.
    pub fn require_child_mut(&mut self, name: &str) -> ProcResult<&mut Node> {
        let parent = self.name.clone();
        self.child_mut(name).ok_or_else(|| not_found(name, &parent))
    }

    /// First direct child of the given kind.
    pub fn child_by_kind(&self, kind: NodeKind) -> Option<&Node> {
        self.children.iter().find(|child| child.kind == kind)
    }

    /// All direct children of the given kind.
    pub fn children_by_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// All direct children of the given kind, mutable.
    pub fn children_by_kind_mut(&mut self, kind: NodeKind) -> impl Iterator<Item = &mut Node> {
        self.children.iter_mut().filter(move |child| child.kind == kind)
    }

    /// First node with the given name, at any depth, starting with `self` (pre-order).
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// First node with the given name at any depth, mutable.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Node> {
        if self.name == name {
            return Some(self);
        }
        for child in self.children.iter_mut() {
            if let Some(found) = child.find_mut(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given name, down to `depth` levels below `self`.
    pub fn find_all_within(&self, name: &str, depth: usize) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect_within(name, depth, &mut found);
        found
    }

    fn collect_within<'a>(&'a self, name: &str, depth: usize, found: &mut Vec<&'a Node>) {
        if depth == 0 {
            return;
        }
        for child in self.children.iter() {
            if child.name == name {
                found.push(child);
            }
            child.collect_within(name, depth - 1, found);
        }
    }

    /// Apply `f` to every descendant with the given name, down to `depth` levels below `self`.
    pub fn visit_within_mut<F>(&mut self, name: &str, depth: usize, f: &mut F)
    where F: FnMut(&mut Node)
    {
        if depth == 0 {
            return;
        }
        for child in self.children.iter_mut() {
            if child.name == name {
                f(child);
            }
            child.visit_within_mut(name, depth - 1, f);
        }
    }

    /// All zones at or below this node. Zones are not searched for nested zones.
    pub fn zones(&self) -> Vec<&Node> {
        let mut zones = Vec::new();
        collect_zones(self, &mut zones);
        zones
    }

    /// All zones at or below this node, mutable.
    pub fn zones_mut(&mut self) -> Vec<&mut Node> {
        let mut zones = Vec::new();
        collect_zones_mut(self, &mut zones);
        zones
    }

    /// Append a child and return it.
    pub fn add_child(&mut self, child: Node) -> &mut Node {
        let idx = self.children.len();
        self.children.push(child);
        &mut self.children[idx]
    }

    /// Return the child with that name, creating an empty one of `kind` if absent.
    /// An existing child is returned unchanged.
    pub fn ensure_child(&mut self, name: &str, kind: NodeKind) -> &mut Node {
        match self.children.iter().position(|child| child.name == name) {
            Some(idx) => &mut self.children[idx],
            None => self.add_child(Node::new(name, kind, NodeValue::None)),
        }
    }

    /// Create the child, or overwrite the kind and value of the existing one (children are kept).
    pub fn create_unique_child(&mut self, name: &str, kind: NodeKind, value: NodeValue) -> &mut Node {
        match self.children.iter().position(|child| child.name == name) {
            Some(idx) => {
                let child = &mut self.children[idx];
                child.kind = kind;
                child.value = value;
                child
            },
            None => self.add_child(Node::new(name, kind, value)),
        }
    }

    /// Remove every direct child with the given name. Returns the number removed.
    pub fn remove_children_named(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|child| child.name != name);
        before - self.children.len()
    }

    /// Names of the direct children, in order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.name.as_str()).collect()
    }
}

fn collect_zones<'a>(node: &'a Node, zones: &mut Vec<&'a Node>) {
    if node.kind == NodeKind::Zone {
        zones.push(node);
        return;
    }
    for child in node.children.iter() {
        collect_zones(child, zones);
    }
}

fn collect_zones_mut<'a>(node: &'a mut Node, zones: &mut Vec<&'a mut Node>) {
    if node.kind == NodeKind::Zone {
        zones.push(node);
        return;
    }
    for child in node.children.iter_mut() {
        collect_zones_mut(child, zones);
    }
}
