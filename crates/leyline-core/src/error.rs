//! Error types for the Leyline environment adapter.
//!
//! One enum per failure class, organized by subsystem: engine calls,
//! agent lookup, value classification, schema synthesis, and schema
//! violation at translation time.

use std::error::Error;
use std::fmt;

use crate::id::{AgentId, NodeId};
use crate::value::ValueKind;

/// Errors from calls into the simulation engine.
///
/// Engine failures are propagated to the caller unwrapped and are never
/// retried: every engine call advances or reads deterministic simulation
/// state, and a blind retry would desynchronize the round counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// An engine contract operation reported a failure.
    CallFailed {
        /// Name of the contract operation that failed.
        op: &'static str,
        /// Engine-reported description of the failure.
        reason: String,
    },
    /// The engine returned data that breaks the contract
    /// (e.g. a reward vector whose arity differs from the live-agent count).
    ContractViolation {
        /// Name of the contract operation whose result was invalid.
        op: &'static str,
        /// Description of the violated expectation.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CallFailed { op, reason } => {
                write!(f, "engine call '{op}' failed: {reason}")
            }
            Self::ContractViolation { op, reason } => {
                write!(f, "engine contract violated in '{op}': {reason}")
            }
        }
    }
}

impl Error for EngineError {}

/// Errors from resolving an agent ID against the session's agent sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// An action batch named an agent outside the live set.
    UnknownAgent {
        /// The offending agent ID.
        agent: AgentId,
    },
    /// An action batch omitted a live agent.
    MissingAction {
        /// The live agent with no action.
        agent: AgentId,
    },
    /// A space lookup named an agent outside the possible set.
    NotPossible {
        /// The offending agent ID.
        agent: AgentId,
        /// Upper bound of the possible set.
        max_agents: u32,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAgent { agent } => write!(f, "agent {agent} is not live"),
            Self::MissingAction { agent } => write!(f, "no action supplied for agent {agent}"),
            Self::NotPossible { agent, max_agents } => {
                write!(f, "agent {agent} outside possible set 1..={max_agents}")
            }
        }
    }
}

impl Error for LookupError {}

/// Errors from classifying a single sample value.
///
/// Classification is total over the recognized kinds; anything else is
/// reported with the reason the sample fell through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    /// An empty list carries no element kind to classify.
    EmptyList,
    /// List elements disagree on kind.
    MixedList {
        /// Kind of the first element.
        expected: ValueKind,
        /// Kind of the first disagreeing element.
        found: ValueKind,
        /// Index of the first disagreeing element.
        index: usize,
    },
    /// The sample kind is not classifiable as a node attribute.
    UnsupportedKind {
        /// The unclassifiable kind.
        kind: ValueKind,
    },
    /// A list element kind is not classifiable (nested list, dict, graph).
    UnsupportedElement {
        /// The unclassifiable element kind.
        kind: ValueKind,
    },
    /// An integer bound sample admits no values.
    ///
    /// Integer samples encode cardinality, so a bound of `n` describes
    /// the value set `{0, ..., n-1}`; `n <= 0` describes the empty set.
    NonPositiveBound {
        /// The offending bound.
        value: i64,
        /// Element index for list samples, `None` for scalars.
        index: Option<usize>,
    },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyList => write!(f, "empty list has no element kind"),
            Self::MixedList {
                expected,
                found,
                index,
            } => {
                write!(f, "mixed list: element {index} is {found}, expected {expected}")
            }
            Self::UnsupportedKind { kind } => {
                write!(f, "cannot classify {kind} as a node attribute")
            }
            Self::UnsupportedElement { kind } => {
                write!(f, "cannot classify list of {kind}")
            }
            Self::NonPositiveBound { value, index } => {
                write!(f, "integer bound {value} admits no values")?;
                if let Some(idx) = index {
                    write!(f, " (element {idx})")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for ClassifyError {}

/// Errors from synthesizing an observation schema out of a node probe.
///
/// Any schema error is fatal at construction: the environment never
/// proceeds with a partial schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A probe sample could not be classified.
    Unclassifiable {
        /// Label of the unclassifiable attribute.
        label: String,
        /// The underlying classification failure.
        reason: ClassifyError,
    },
    /// The probe's label and sample counts differ.
    ProbeArityMismatch {
        /// Number of labels in the probe.
        labels: usize,
        /// Number of samples in the probe.
        samples: usize,
    },
    /// The probe repeats a label.
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclassifiable { label, reason } => {
                write!(f, "attribute '{label}': {reason}")
            }
            Self::ProbeArityMismatch { labels, samples } => {
                write!(f, "probe has {labels} labels but {samples} samples")
            }
            Self::DuplicateLabel { label } => {
                write!(f, "probe repeats label '{label}'")
            }
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unclassifiable { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors from validating engine state against the synthesized schema.
///
/// Raised when a belief world diverges from the shape fixed at
/// construction. Divergence is an invariant breach, never coerced into
/// a degraded observation.
#[derive(Clone, Debug, PartialEq)]
pub enum ViolationError {
    /// A bundle omits a schema label.
    MissingLabel {
        /// The absent label.
        label: String,
    },
    /// A bundle carries a label the schema does not define.
    UnexpectedLabel {
        /// The undefined label.
        label: String,
    },
    /// A bundle carries the schema's labels in a different order.
    LabelOrder {
        /// Position of the first out-of-order label.
        index: usize,
        /// Label the schema defines at this position.
        expected: String,
        /// Label the bundle carries at this position.
        found: String,
    },
    /// A value does not inhabit the space its label was classified into.
    ShapeMismatch {
        /// Label of the mismatching attribute.
        label: String,
        /// Description of the expected space and the offending value.
        reason: String,
    },
    /// A belief world's position and bundle counts differ.
    BundleArity {
        /// Number of node positions.
        positions: usize,
        /// Number of node bundles.
        bundles: usize,
    },
    /// An edge endpoint indexes beyond the belief world's node count.
    EdgeOutOfRange {
        /// Source endpoint.
        from: NodeId,
        /// Destination endpoint.
        to: NodeId,
        /// Node count of the belief world.
        node_count: usize,
    },
}

impl fmt::Display for ViolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLabel { label } => {
                write!(f, "bundle is missing schema label '{label}'")
            }
            Self::UnexpectedLabel { label } => {
                write!(f, "bundle carries undefined label '{label}'")
            }
            Self::LabelOrder {
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "label order diverges at {index}: expected '{expected}', found '{found}'"
                )
            }
            Self::ShapeMismatch { label, reason } => {
                write!(f, "attribute '{label}' violates its space: {reason}")
            }
            Self::BundleArity { positions, bundles } => {
                write!(f, "belief has {positions} positions but {bundles} bundles")
            }
            Self::EdgeOutOfRange {
                from,
                to,
                node_count,
            } => {
                write!(f, "edge ({from}, {to}) exceeds node count {node_count}")
            }
        }
    }
}

impl Error for ViolationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_chains_classify_source() {
        let err = SchemaError::Unclassifiable {
            label: "capacity".to_string(),
            reason: ClassifyError::NonPositiveBound {
                value: 0,
                index: None,
            },
        };
        let msg = format!("{err}");
        assert!(msg.contains("capacity"));
        assert!(msg.contains("admits no values"));
        assert!(err.source().is_some());
    }

    #[test]
    fn lookup_error_display() {
        let agent = AgentId::new(4).unwrap();
        let msg = format!("{}", LookupError::NotPossible { agent, max_agents: 3 });
        assert!(msg.contains('4'));
        assert!(msg.contains("1..=3"));
    }

    #[test]
    fn engine_error_display_names_op() {
        let err = EngineError::CallFailed {
            op: "world_step",
            reason: "solver diverged".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("world_step"));
        assert!(msg.contains("solver diverged"));
    }

    #[test]
    fn violation_error_display() {
        let err = ViolationError::LabelOrder {
            index: 1,
            expected: "capacity".to_string(),
            found: "pos".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("capacity"));
        assert!(msg.contains("pos"));
    }
}
