//! Reusable engine test fixtures.
//!
//! [`MockEngine`] is a deterministic in-memory engine: a path graph of
//! `node_count` nodes, agents that move wherever they are told, and a
//! reward of half the target node index. Contract breaches and
//! deterministic failures are opt-in through the `with_*` builders:
//!
//! - [`with_fail_on`](MockEngine::with_fail_on) — fail the nth call of
//!   one named contract op, succeed before and after.
//! - [`with_bad_reward_arity`](MockEngine::with_bad_reward_arity) —
//!   return one reward too many from every step.
//! - [`with_divergent_bundles`](MockEngine::with_divergent_bundles) —
//!   emit belief bundles whose labels diverge from the probe.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use leyline_core::{
    ActionBatch, BeliefWorld, Engine, EngineError, EngineIndex, NodeId, NodeValueProbe, Position,
    RoundReport, ScenarioConfig, Value, ValueBundle,
};

/// Viewer tag for the ground-truth view in bundle generation.
const GLOBAL_VIEWER: u32 = u32::MAX;

/// The probe every [`MockEngine`] reports by default: one flag, one
/// bounded integer, and one 2-vector of reals.
pub fn reference_probe() -> NodeValueProbe {
    NodeValueProbe {
        labels: vec![
            "is_blocked".to_string(),
            "capacity".to_string(),
            "pos".to_string(),
        ],
        samples: vec![
            Value::Bool(false),
            Value::Int(4),
            Value::List(vec![Value::Real(12.0), Value::Real(-3.5)]),
        ],
    }
}

/// A well-formed belief over `node_count` nodes, matching the schema
/// synthesized from [`reference_probe`].
pub fn reference_belief(node_count: usize) -> BeliefWorld {
    let positions: Vec<Position> = (0..node_count).map(|i| [i as f64, 0.0]).collect();
    let bundles = positions
        .iter()
        .enumerate()
        .map(|(i, pos)| {
            let mut bundle = ValueBundle::with_capacity(3);
            bundle.insert("is_blocked".to_string(), Value::Bool(i % 2 == 0));
            bundle.insert("capacity".to_string(), Value::Int((i % 4) as i64));
            bundle.insert(
                "pos".to_string(),
                Value::List(vec![Value::Real(pos[0]), Value::Real(pos[1])]),
            );
            bundle
        })
        .collect();
    BeliefWorld {
        positions,
        edges: path_edges(node_count),
        bundles,
    }
}

fn path_edges(node_count: usize) -> Vec<(NodeId, NodeId)> {
    (1..node_count as u32).map(|i| (NodeId(i - 1), NodeId(i))).collect()
}

/// World handle of [`MockEngine`]: a path graph plus a round counter.
#[derive(Clone, Debug)]
pub struct MockWorld {
    pub positions: Vec<Position>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub round: u64,
}

/// Agent handle of [`MockEngine`].
#[derive(Clone, Debug)]
pub struct MockAgents {
    /// Current node per engine index.
    pub node: Vec<NodeId>,
    /// Actions staged by `submit_actions`, consumed by `world_step`.
    pub staged: Option<Vec<NodeId>>,
    /// Map geometry captured at spawn time.
    pub node_positions: Vec<Position>,
    pub edges: Vec<(NodeId, NodeId)>,
    /// Rounds completed, advanced in lockstep with the world.
    pub round: u64,
}

/// Deterministic failure injection: the `nth` call (1-based) of `op`
/// fails, every other call succeeds.
struct FailPlan {
    op: &'static str,
    nth: usize,
    seen: AtomicUsize,
}

/// In-memory [`Engine`] for adapter tests.
pub struct MockEngine {
    scenario: ScenarioConfig,
    attributes: Vec<(String, Value)>,
    seed: u64,
    horizon: Option<u64>,
    bad_reward_arity: bool,
    divergent_bundles: bool,
    fail: Option<FailPlan>,
}

impl MockEngine {
    /// A mock scenario named `name` with `node_count` nodes and
    /// `n_agents` agents.
    ///
    /// Nodes expose the [`reference_probe`] attributes; agent `k`
    /// starts at node `k % node_count`.
    pub fn new(name: impl Into<String>, node_count: u32, n_agents: u32) -> Self {
        let name = name.into();
        let world_path = format!("maps/{name}.graph");
        let agent_starts = (0..n_agents)
            .map(|i| NodeId(i % node_count.max(1)))
            .collect();
        let probe = reference_probe();
        Self {
            scenario: ScenarioConfig {
                name,
                world_path,
                obstacle_map: vec![vec![false; node_count as usize]; node_count as usize],
                node_count,
                n_agents,
                agent_starts,
            },
            attributes: probe.labels.into_iter().zip(probe.samples).collect(),
            seed: 0,
            horizon: None,
            bad_reward_arity: false,
            divergent_bundles: false,
            fail: None,
        }
    }

    /// Append one probed attribute.
    pub fn with_attribute(mut self, label: impl Into<String>, sample: Value) -> Self {
        self.attributes.push((label.into(), sample));
        self
    }

    /// Seed for deterministic bundle generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the scenario's start nodes.
    pub fn with_starts(mut self, starts: Vec<NodeId>) -> Self {
        self.scenario.agent_starts = starts;
        self
    }

    /// Report `running = false` once `horizon` rounds have completed.
    pub fn with_horizon(mut self, horizon: u64) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Fail the `nth` call (1-based) of the named contract op.
    pub fn with_fail_on(mut self, op: &'static str, nth: usize) -> Self {
        self.fail = Some(FailPlan {
            op,
            nth,
            seen: AtomicUsize::new(0),
        });
        self
    }

    /// Return one reward too many from every `world_step`.
    pub fn with_bad_reward_arity(mut self) -> Self {
        self.bad_reward_arity = true;
        self
    }

    /// Emit belief bundles whose labels diverge from the probe.
    pub fn with_divergent_bundles(mut self) -> Self {
        self.divergent_bundles = true;
        self
    }

    fn trip(&self, op: &'static str) -> Result<(), EngineError> {
        if let Some(plan) = &self.fail {
            if plan.op == op {
                let call = plan.seen.fetch_add(1, Ordering::Relaxed) + 1;
                if call == plan.nth {
                    return Err(EngineError::CallFailed {
                        op,
                        reason: format!("injected failure on call {call}"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Rng keyed by seed, round, node, and viewer so every view is
    /// reproducible and distinct.
    fn bundle_rng(&self, round: u64, node: u32, viewer: u32) -> ChaCha8Rng {
        let mut key = self
            .seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(round);
        key = key
            .wrapping_mul(0xBF58_476D_1CE4_E5B9)
            .wrapping_add(u64::from(node));
        key = key
            .wrapping_mul(0x94D0_49BB_1331_11EB)
            .wrapping_add(u64::from(viewer));
        ChaCha8Rng::seed_from_u64(key)
    }

    /// Draw one value of the same shape as `template`.
    fn generate(&self, template: &Value, rng: &mut ChaCha8Rng) -> Value {
        match template {
            Value::Bool(_) => Value::Bool(rng.random()),
            Value::Int(n) => Value::Int(rng.random_range(0..(*n).max(1))),
            Value::Real(_) => Value::Real(rng.random_range(-10.0..10.0)),
            Value::Text(s) => {
                let len = rng.random_range(0..=s.chars().count());
                Value::Text(
                    (0..len)
                        .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
                        .collect(),
                )
            }
            Value::List(items) => Value::List(
                items.iter().map(|item| self.generate(item, rng)).collect(),
            ),
            other => other.clone(),
        }
    }

    fn view(
        &self,
        positions: &[Position],
        edges: &[(NodeId, NodeId)],
        round: u64,
        viewer: u32,
    ) -> BeliefWorld {
        let bundles = (0..positions.len() as u32)
            .map(|node| {
                let mut rng = self.bundle_rng(round, node, viewer);
                let mut bundle = ValueBundle::with_capacity(self.attributes.len());
                for (label, template) in &self.attributes {
                    bundle.insert(label.clone(), self.generate(template, &mut rng));
                }
                if self.divergent_bundles {
                    if let Some(label) = self.attributes.first().map(|(l, _)| l.clone()) {
                        bundle.shift_remove(&label);
                    }
                    bundle.insert("intruder".to_string(), Value::Int(0));
                }
                bundle
            })
            .collect();
        BeliefWorld {
            positions: positions.to_vec(),
            edges: edges.to_vec(),
            bundles,
        }
    }
}

impl Engine for MockEngine {
    type World = MockWorld;
    type Agents = MockAgents;

    fn load_scenario(&mut self, name: &str) -> Result<ScenarioConfig, EngineError> {
        self.trip("load_scenario")?;
        if name != self.scenario.name {
            return Err(EngineError::CallFailed {
                op: "load_scenario",
                reason: format!("unknown scenario '{name}'"),
            });
        }
        Ok(self.scenario.clone())
    }

    fn create_world(&mut self, world_path: &str) -> Result<MockWorld, EngineError> {
        self.trip("create_world")?;
        if world_path != self.scenario.world_path {
            return Err(EngineError::CallFailed {
                op: "create_world",
                reason: format!("no world definition at '{world_path}'"),
            });
        }
        let node_count = self.scenario.node_count as usize;
        Ok(MockWorld {
            positions: (0..node_count).map(|i| [i as f64, 0.0]).collect(),
            edges: path_edges(node_count),
            round: 0,
        })
    }

    fn spawn_agents(
        &mut self,
        n_agents: u32,
        starts: &[NodeId],
        world: &MockWorld,
    ) -> Result<MockAgents, EngineError> {
        self.trip("spawn_agents")?;
        if starts.len() != n_agents as usize {
            return Err(EngineError::CallFailed {
                op: "spawn_agents",
                reason: format!("{} starts for {n_agents} agents", starts.len()),
            });
        }
        let node_count = world.positions.len() as u32;
        if let Some(start) = starts.iter().find(|s| s.0 >= node_count) {
            return Err(EngineError::CallFailed {
                op: "spawn_agents",
                reason: format!("start node {start} outside 0..{node_count}"),
            });
        }
        Ok(MockAgents {
            node: starts.to_vec(),
            staged: None,
            node_positions: world.positions.clone(),
            edges: world.edges.clone(),
            round: 0,
        })
    }

    fn submit_actions(
        &mut self,
        agents: &mut MockAgents,
        world: &MockWorld,
        _render: bool,
        batch: &ActionBatch,
    ) -> Result<(), EngineError> {
        self.trip("submit_actions")?;
        if batch.len() != agents.node.len() {
            return Err(EngineError::CallFailed {
                op: "submit_actions",
                reason: format!("{} actions for {} agents", batch.len(), agents.node.len()),
            });
        }
        let node_count = world.positions.len() as u32;
        let mut staged = vec![NodeId(0); batch.len()];
        for &(index, target) in batch.entries() {
            if target.0 >= node_count {
                return Err(EngineError::CallFailed {
                    op: "submit_actions",
                    reason: format!("target {target} outside 0..{node_count}"),
                });
            }
            let slot = staged.get_mut(index.0 as usize).ok_or_else(|| {
                EngineError::CallFailed {
                    op: "submit_actions",
                    reason: format!("engine index {index} outside the batch"),
                }
            })?;
            *slot = target;
        }
        agents.staged = Some(staged);
        Ok(())
    }

    fn world_step(
        &mut self,
        world: MockWorld,
        agents: &mut MockAgents,
    ) -> Result<RoundReport<MockWorld>, EngineError> {
        self.trip("world_step")?;
        let Some(staged) = agents.staged.take() else {
            return Err(EngineError::CallFailed {
                op: "world_step",
                reason: "no actions staged for this round".to_string(),
            });
        };
        let mut rewards: Vec<f64> = staged.iter().map(|t| f64::from(t.0) * 0.5).collect();
        if self.bad_reward_arity {
            rewards.push(0.0);
        }
        agents.node = staged;
        agents.round += 1;
        let world = MockWorld {
            round: world.round + 1,
            ..world
        };
        let running = self.horizon.is_none_or(|h| world.round < h);
        Ok(RoundReport {
            running,
            world,
            rewards,
        })
    }

    fn node_value_probe(&mut self, _world: &MockWorld) -> Result<NodeValueProbe, EngineError> {
        self.trip("node_value_probe")?;
        Ok(NodeValueProbe {
            labels: self.attributes.iter().map(|(l, _)| l.clone()).collect(),
            samples: self.attributes.iter().map(|(_, s)| s.clone()).collect(),
        })
    }

    fn agent_position(
        &self,
        agents: &MockAgents,
        index: EngineIndex,
    ) -> Result<Position, EngineError> {
        self.trip("agent_position")?;
        let node = agents.node.get(index.0 as usize).ok_or_else(|| {
            EngineError::CallFailed {
                op: "agent_position",
                reason: format!("engine index {index} outside 0..{}", agents.node.len()),
            }
        })?;
        agents
            .node_positions
            .get(node.0 as usize)
            .copied()
            .ok_or_else(|| EngineError::CallFailed {
                op: "agent_position",
                reason: format!("node {node} has no position"),
            })
    }

    fn belief_world(
        &self,
        agents: &MockAgents,
        index: EngineIndex,
    ) -> Result<BeliefWorld, EngineError> {
        self.trip("belief_world")?;
        if index.0 as usize >= agents.node.len() {
            return Err(EngineError::CallFailed {
                op: "belief_world",
                reason: format!("engine index {index} outside 0..{}", agents.node.len()),
            });
        }
        Ok(self.view(&agents.node_positions, &agents.edges, agents.round, index.0))
    }

    fn global_world(&self, world: &MockWorld) -> Result<BeliefWorld, EngineError> {
        self.trip("global_world")?;
        Ok(self.view(&world.positions, &world.edges, world.round, GLOBAL_VIEWER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use leyline_core::AgentId;

    fn batch(targets: &[u32]) -> ActionBatch {
        let live: Vec<AgentId> = (1..=targets.len() as u32)
            .map(|i| AgentId::new(i).unwrap())
            .collect();
        let actions: IndexMap<AgentId, NodeId> = live
            .iter()
            .zip(targets)
            .map(|(&agent, &t)| (agent, NodeId(t)))
            .collect();
        ActionBatch::from_actions(&actions, &live).unwrap()
    }

    fn spawned(engine: &mut MockEngine) -> (MockWorld, MockAgents) {
        let scenario = engine.load_scenario("patrol").unwrap();
        let world = engine.create_world(&scenario.world_path).unwrap();
        let agents = engine
            .spawn_agents(scenario.n_agents, &scenario.agent_starts, &world)
            .unwrap();
        (world, agents)
    }

    #[test]
    fn lifecycle_moves_agents_and_scores_targets() {
        let mut engine = MockEngine::new("patrol", 5, 3);
        let (world, mut agents) = spawned(&mut engine);

        let batch = batch(&[2, 0, 4]);
        engine.submit_actions(&mut agents, &world, false, &batch).unwrap();
        let report = engine.world_step(world, &mut agents).unwrap();

        assert!(report.running);
        assert_eq!(report.world.round, 1);
        assert_eq!(report.rewards, vec![1.0, 0.0, 2.0]);
        assert_eq!(agents.node, vec![NodeId(2), NodeId(0), NodeId(4)]);
    }

    #[test]
    fn step_without_submission_fails() {
        let mut engine = MockEngine::new("patrol", 5, 3);
        let (world, mut agents) = spawned(&mut engine);
        assert!(matches!(
            engine.world_step(world, &mut agents),
            Err(EngineError::CallFailed { op: "world_step", .. })
        ));
    }

    #[test]
    fn fail_on_trips_exactly_once() {
        let mut engine = MockEngine::new("patrol", 5, 2).with_fail_on("world_step", 2);
        let (world, mut agents) = spawned(&mut engine);

        let b = batch(&[1, 3]);
        engine.submit_actions(&mut agents, &world, false, &b).unwrap();
        let report = engine.world_step(world, &mut agents).unwrap();

        engine.submit_actions(&mut agents, &report.world, false, &b).unwrap();
        assert!(engine.world_step(report.world.clone(), &mut agents).is_err());

        // The failure never consumed the staged actions, and the third
        // call is past the plan.
        assert!(engine.world_step(report.world, &mut agents).is_ok());
    }

    #[test]
    fn horizon_flips_the_running_flag() {
        let mut engine = MockEngine::new("patrol", 5, 1).with_horizon(2);
        let (world, mut agents) = spawned(&mut engine);

        let b = batch(&[3]);
        engine.submit_actions(&mut agents, &world, false, &b).unwrap();
        let first = engine.world_step(world, &mut agents).unwrap();
        assert!(first.running);

        engine.submit_actions(&mut agents, &first.world, false, &b).unwrap();
        let second = engine.world_step(first.world, &mut agents).unwrap();
        assert!(!second.running);
    }

    #[test]
    fn views_are_deterministic_per_round_and_viewer() {
        let mut engine = MockEngine::new("patrol", 4, 2).with_seed(99);
        let (world, agents) = spawned(&mut engine);

        let a = engine.belief_world(&agents, EngineIndex(0)).unwrap();
        let b = engine.belief_world(&agents, EngineIndex(0)).unwrap();
        assert_eq!(a, b);

        let other_agent = engine.belief_world(&agents, EngineIndex(1)).unwrap();
        assert_ne!(a.bundles, other_agent.bundles);

        let global = engine.global_world(&world).unwrap();
        assert_eq!(global.positions, a.positions);
        assert_eq!(global.bundles.len(), 4);
    }

    #[test]
    fn unknown_scenario_fails() {
        let mut engine = MockEngine::new("patrol", 5, 3);
        assert!(matches!(
            engine.load_scenario("warehouse"),
            Err(EngineError::CallFailed { op: "load_scenario", .. })
        ));
    }
}
