//! Observation schema synthesis.
//!
//! [`synthesize`] turns one node-value probe into the full observation
//! tree: the agent's own position, the believed map graph, and one
//! dict-space per node in the believed graph. Synthesis runs exactly
//! once per environment instance; every observation and every
//! `observation_space` query afterwards is answered from the result.

use indexmap::IndexSet;

use leyline_core::{NodeValueProbe, SchemaError};
use leyline_space::{BoxSpace, DictSpace, GraphSpace, SequenceSpace, Space};

use crate::classify::classify;

/// Label of the agent's own position branch.
pub const AGENT_POSITION_LABEL: &str = "agent_position";
/// Label of the believed map branch.
pub const MAP_LABEL: &str = "map";
/// Label of the per-node attribute branch.
pub const NODE_VALUES_LABEL: &str = "node_values";

/// The observation shape fixed at environment construction.
///
/// The tree is what callers see through `observation_space`; the typed
/// branches are what the translator validates against. Both views are
/// built from the same classification pass, so they cannot diverge.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationSchema {
    tree: Space,
    position_space: BoxSpace,
    node_bundle: DictSpace,
}

impl ObservationSchema {
    /// The full observation tree.
    ///
    /// `Dict{agent_position: Box(2), map: Graph, node_values:
    /// Sequence(Dict{...})}`, identical for every agent.
    pub fn tree(&self) -> &Space {
        &self.tree
    }

    /// The space of the agent's own position.
    pub fn position_space(&self) -> &BoxSpace {
        &self.position_space
    }

    /// The per-node attribute space, labels in probe order.
    pub fn node_bundle(&self) -> &DictSpace {
        &self.node_bundle
    }
}

/// Synthesize the observation schema from one node-value probe.
///
/// Labels keep the probe's order: `labels[i]` names `samples[i]`, and
/// the resulting dict-space lists its entries in exactly that order.
///
/// # Errors
///
/// [`SchemaError::ProbeArityMismatch`] when the probe's label and
/// sample counts differ, [`SchemaError::DuplicateLabel`] when a label
/// repeats, and [`SchemaError::Unclassifiable`] when a sample fails
/// classification. Any error aborts construction; there is no partial
/// schema.
pub fn synthesize(probe: &NodeValueProbe) -> Result<ObservationSchema, SchemaError> {
    // 1. Labels and samples are parallel arrays; they must pair up.
    if probe.labels.len() != probe.samples.len() {
        return Err(SchemaError::ProbeArityMismatch {
            labels: probe.labels.len(),
            samples: probe.samples.len(),
        });
    }

    // 2. Labels must be unique, or the bundle space would be ambiguous.
    let mut seen = IndexSet::with_capacity(probe.labels.len());
    for label in &probe.labels {
        if !seen.insert(label.as_str()) {
            return Err(SchemaError::DuplicateLabel {
                label: label.clone(),
            });
        }
    }

    // 3. Classify each sample, attributing failures to their label.
    let mut entries = Vec::with_capacity(probe.labels.len());
    for (label, sample) in probe.labels.iter().zip(&probe.samples) {
        let class = classify(sample).map_err(|reason| SchemaError::Unclassifiable {
            label: label.clone(),
            reason,
        })?;
        entries.push((label.clone(), class.into_space()));
    }

    // 4. Assemble the tree around the synthesized bundle.
    let node_bundle = DictSpace::new(entries).expect("labels deduplicated above");
    let position_space = BoxSpace::unbounded_vector(2);
    let tree = DictSpace::new(vec![
        (
            AGENT_POSITION_LABEL.to_string(),
            Space::Box(position_space),
        ),
        (MAP_LABEL.to_string(), Space::Graph(GraphSpace::planar())),
        (
            NODE_VALUES_LABEL.to_string(),
            Space::Sequence(SequenceSpace::new(Space::Dict(node_bundle.clone()))),
        ),
    ])
    .expect("branch labels are distinct");

    Ok(ObservationSchema {
        tree: Space::Dict(tree),
        position_space,
        node_bundle,
    })
}
