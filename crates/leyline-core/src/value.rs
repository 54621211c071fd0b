//! The closed value model for engine-emitted data.
//!
//! Everything the simulation engine reports — node attributes, agent
//! positions, belief graphs — crosses the contract boundary as a
//! [`Value`]. The adapter never sees engine-native types.

use std::fmt;

use indexmap::IndexMap;

use crate::id::NodeId;

/// A 2-D position in world coordinates.
pub type Position = [f64; 2];

/// An ordered mapping from attribute labels to values.
///
/// Label order is significant: schema synthesis fixes the order once at
/// construction, and translated observations must reproduce it exactly.
pub type ValueBundle = IndexMap<String, Value>;

/// A world graph: node positions plus an undirected edge list.
///
/// Edge endpoints index into `positions`; an endpoint at or beyond
/// `node_count()` is a contract violation.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphValue {
    /// Per-node 2-D positions.
    pub positions: Vec<Position>,
    /// Undirected edges as `(a, b)` node pairs.
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphValue {
    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }
}

/// The kind of a [`Value`], without its payload.
///
/// Used in error reporting where only the shape of the mismatch matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A boolean flag.
    Bool,
    /// A signed integer.
    Int,
    /// A double-precision real.
    Real,
    /// A text string.
    Text,
    /// An ordered sequence of values.
    List,
    /// An ordered label-to-value bundle.
    Dict,
    /// A world graph.
    Graph,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Real => "real",
            Self::Text => "text",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Graph => "graph",
        };
        write!(f, "{name}")
    }
}

/// A single value emitted by the simulation engine.
///
/// Foreign arrays arrive as [`Value::List`] regardless of element type;
/// classification normalizes them to a homogeneous element kind before
/// any further dispatch. [`Value::Dict`] and [`Value::Graph`] appear in
/// assembled observations but are not classifiable as node attributes.
///
/// # Examples
///
/// ```
/// use leyline_core::{Value, ValueKind};
///
/// let v = Value::List(vec![Value::Int(3), Value::Int(5)]);
/// assert_eq!(v.kind(), ValueKind::List);
/// assert_eq!(Value::from(2.5).kind(), ValueKind::Real);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision real.
    Real(f64),
    /// A text string.
    Text(String),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// An ordered label-to-value bundle.
    Dict(ValueBundle),
    /// A world graph.
    Graph(GraphValue),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Real(_) => ValueKind::Real,
            Self::Text(_) => ValueKind::Text,
            Self::List(_) => ValueKind::List,
            Self::Dict(_) => ValueKind::Dict,
            Self::Graph(_) => ValueKind::Graph,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
