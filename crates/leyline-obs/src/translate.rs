//! Belief-to-observation translation.
//!
//! The translator is the strict side of the schema contract: every
//! world view coming back from the engine is validated against the
//! [`ObservationSchema`] before it is wrapped into an observation.
//! Divergence means the engine broke the shape it reported at probe
//! time, so translation fails instead of coercing.

use leyline_core::{BeliefWorld, GraphValue, Position, Value, ValueBundle, ViolationError};
use leyline_space::DictSpace;

use crate::schema::{ObservationSchema, AGENT_POSITION_LABEL, MAP_LABEL, NODE_VALUES_LABEL};

/// Translate one agent's position and belief into an observation.
///
/// The result is a `Dict{agent_position, map, node_values}` value that
/// inhabits [`ObservationSchema::tree`].
///
/// # Errors
///
/// Any [`ViolationError`]: arity or edge breaches of the belief graph,
/// bundles whose labels diverge from the schema, or values outside
/// their classified spaces.
pub fn translate(
    schema: &ObservationSchema,
    position: Position,
    belief: &BeliefWorld,
) -> Result<Value, ViolationError> {
    validate_view(schema, belief)?;

    // The engine's position report must inhabit the position branch.
    let agent_position = position_value(position);
    if !schema.position_space().contains(&agent_position) {
        return Err(ViolationError::ShapeMismatch {
            label: AGENT_POSITION_LABEL.to_string(),
            reason: format!("{position:?} outside {}", schema.position_space()),
        });
    }

    let mut observation = ValueBundle::with_capacity(3);
    observation.insert(AGENT_POSITION_LABEL.to_string(), agent_position);
    observation.insert(MAP_LABEL.to_string(), map_value(belief));
    observation.insert(NODE_VALUES_LABEL.to_string(), node_values(belief));
    Ok(Value::Dict(observation))
}

/// Translate the ground-truth world view into a global state value.
///
/// Global state has no agent of its own, so the result is the two-branch
/// `Dict{map, node_values}`, validated exactly like a belief.
///
/// # Errors
///
/// Same [`ViolationError`] conditions as [`translate`].
pub fn global_state(
    schema: &ObservationSchema,
    world: &BeliefWorld,
) -> Result<Value, ViolationError> {
    validate_view(schema, world)?;

    let mut state = ValueBundle::with_capacity(2);
    state.insert(MAP_LABEL.to_string(), map_value(world));
    state.insert(NODE_VALUES_LABEL.to_string(), node_values(world));
    Ok(Value::Dict(state))
}

/// Validate a world view's graph and bundles against the schema.
fn validate_view(schema: &ObservationSchema, view: &BeliefWorld) -> Result<(), ViolationError> {
    // 1. Positions and bundles must describe the same node set.
    if view.positions.len() != view.bundles.len() {
        return Err(ViolationError::BundleArity {
            positions: view.positions.len(),
            bundles: view.bundles.len(),
        });
    }

    // 2. Every edge endpoint must name an existing node.
    let node_count = view.positions.len();
    for &(from, to) in &view.edges {
        if from.0 as usize >= node_count || to.0 as usize >= node_count {
            return Err(ViolationError::EdgeOutOfRange {
                from,
                to,
                node_count,
            });
        }
    }

    // 3. Every bundle must carry the schema's labels, in order, with
    //    every value inside its classified space.
    for bundle in &view.bundles {
        validate_bundle(schema.node_bundle(), bundle)?;
    }
    Ok(())
}

/// Validate one node bundle against the bundle space.
///
/// Key-set differences are reported before order differences: a missing
/// or undefined label is more specific than "order diverged".
fn validate_bundle(space: &DictSpace, bundle: &ValueBundle) -> Result<(), ViolationError> {
    for label in space.labels() {
        if !bundle.contains_key(label) {
            return Err(ViolationError::MissingLabel {
                label: label.to_string(),
            });
        }
    }
    for label in bundle.keys() {
        if space.get(label).is_none() {
            return Err(ViolationError::UnexpectedLabel {
                label: label.clone(),
            });
        }
    }
    // Equal key sets from here on, so the walks are the same length.
    for (index, ((found, value), (expected, entry_space))) in
        bundle.iter().zip(space.iter()).enumerate()
    {
        if found != expected {
            return Err(ViolationError::LabelOrder {
                index,
                expected: expected.to_string(),
                found: found.clone(),
            });
        }
        if !entry_space.contains(value) {
            return Err(ViolationError::ShapeMismatch {
                label: expected.to_string(),
                reason: format!("{value:?} outside {entry_space}"),
            });
        }
    }
    Ok(())
}

fn position_value(position: Position) -> Value {
    Value::List(position.iter().copied().map(Value::Real).collect())
}

fn map_value(view: &BeliefWorld) -> Value {
    Value::Graph(GraphValue {
        positions: view.positions.clone(),
        edges: view.edges.clone(),
    })
}

fn node_values(view: &BeliefWorld) -> Value {
    Value::List(view.bundles.iter().cloned().map(Value::Dict).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::synthesize;
    use leyline_core::NodeId;
    use leyline_test_utils::{reference_belief, reference_probe};

    fn schema() -> ObservationSchema {
        synthesize(&reference_probe()).unwrap()
    }

    const POSITION: Position = [2.0, -1.5];

    // ── Well-formed views ───────────────────────────────────────────────

    #[test]
    fn observation_inhabits_the_schema_tree() {
        let schema = schema();
        let obs = translate(&schema, POSITION, &reference_belief(5)).unwrap();
        assert!(schema.tree().contains(&obs));
    }

    #[test]
    fn observation_carries_the_belief_verbatim() {
        let schema = schema();
        let belief = reference_belief(3);
        let obs = translate(&schema, POSITION, &belief).unwrap();

        let Value::Dict(branches) = obs else {
            panic!("observation is not a dict");
        };
        assert_eq!(
            branches.get(AGENT_POSITION_LABEL),
            Some(&Value::List(vec![Value::Real(2.0), Value::Real(-1.5)]))
        );
        assert_eq!(
            branches.get(MAP_LABEL),
            Some(&Value::Graph(GraphValue {
                positions: belief.positions.clone(),
                edges: belief.edges.clone(),
            }))
        );
        let Some(Value::List(nodes)) = branches.get(NODE_VALUES_LABEL) else {
            panic!("node_values branch is not a list");
        };
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1], Value::Dict(belief.bundles[1].clone()));
    }

    #[test]
    fn empty_belief_translates_to_empty_branches() {
        let schema = schema();
        let obs = translate(&schema, POSITION, &reference_belief(0)).unwrap();
        assert!(schema.tree().contains(&obs));
    }

    #[test]
    fn global_state_has_no_agent_branch() {
        let schema = schema();
        let state = global_state(&schema, &reference_belief(4)).unwrap();

        let Value::Dict(branches) = state else {
            panic!("state is not a dict");
        };
        let labels: Vec<&str> = branches.keys().map(String::as_str).collect();
        assert_eq!(labels, [MAP_LABEL, NODE_VALUES_LABEL]);
    }

    // ── Violations ──────────────────────────────────────────────────────

    #[test]
    fn bundle_arity_breach_fails() {
        let mut belief = reference_belief(4);
        belief.bundles.pop();
        assert_eq!(
            translate(&schema(), POSITION, &belief),
            Err(ViolationError::BundleArity {
                positions: 4,
                bundles: 3,
            })
        );
    }

    #[test]
    fn out_of_range_edge_fails() {
        let mut belief = reference_belief(3);
        belief.edges.push((NodeId(1), NodeId(3)));
        assert_eq!(
            translate(&schema(), POSITION, &belief),
            Err(ViolationError::EdgeOutOfRange {
                from: NodeId(1),
                to: NodeId(3),
                node_count: 3,
            })
        );
    }

    #[test]
    fn missing_label_fails() {
        let mut belief = reference_belief(3);
        belief.bundles[2].shift_remove("capacity");
        assert_eq!(
            translate(&schema(), POSITION, &belief),
            Err(ViolationError::MissingLabel {
                label: "capacity".to_string(),
            })
        );
    }

    #[test]
    fn undefined_label_fails() {
        let mut belief = reference_belief(2);
        belief.bundles[0].insert("garrison".to_string(), Value::Int(1));
        assert_eq!(
            translate(&schema(), POSITION, &belief),
            Err(ViolationError::UnexpectedLabel {
                label: "garrison".to_string(),
            })
        );
    }

    #[test]
    fn reordered_labels_fail() {
        let mut belief = reference_belief(2);
        let bundle = &mut belief.bundles[1];
        let capacity = bundle.shift_remove("capacity").unwrap();
        bundle.insert("capacity".to_string(), capacity);

        assert_eq!(
            translate(&schema(), POSITION, &belief),
            Err(ViolationError::LabelOrder {
                index: 1,
                expected: "capacity".to_string(),
                found: "pos".to_string(),
            })
        );
    }

    #[test]
    fn out_of_space_value_fails() {
        let mut belief = reference_belief(3);
        belief.bundles[1].insert("capacity".to_string(), Value::Int(4));

        match translate(&schema(), POSITION, &belief) {
            Err(ViolationError::ShapeMismatch { label, reason }) => {
                assert_eq!(label, "capacity");
                assert!(reason.contains("Discrete(4)"));
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn nan_position_fails() {
        match translate(&schema(), [f64::NAN, 0.0], &reference_belief(2)) {
            Err(ViolationError::ShapeMismatch { label, .. }) => {
                assert_eq!(label, AGENT_POSITION_LABEL);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn violations_apply_to_global_state_too() {
        let mut world = reference_belief(3);
        world.bundles[0].insert("capacity".to_string(), Value::Real(2.0));
        assert!(matches!(
            global_state(&schema(), &world),
            Err(ViolationError::ShapeMismatch { .. })
        ));
    }
}
