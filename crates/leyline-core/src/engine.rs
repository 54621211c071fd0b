//! The simulation engine contract.
//!
//! [`Engine`] is the seam between the environment adapter and the
//! foreign simulation. The adapter owns the *current* world and agent
//! handles as opaque associated types and threads them into every call;
//! the engine holds no ambient session state of its own.
//!
//! # Handle semantics
//!
//! [`world_step()`](Engine::world_step) consumes the world handle and
//! returns its successor inside [`RoundReport`]. The adapter replaces,
//! never aliases, the previous world — once a round has advanced, the
//! old handle no longer exists. Agent handles are mutated in place.
//!
//! All calls are synchronous call-and-block with no cancellation or
//! timeout; a hang inside the engine hangs the caller.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::{EngineError, LookupError};
use crate::id::{AgentId, EngineIndex, NodeId};
use crate::value::{Position, Value, ValueBundle};

/// Scenario parameters reported by the engine at load time.
///
/// Captured once at construction and reused verbatim by every reset:
/// a reset is a full restart from this configuration, not a checkpoint
/// restore.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioConfig {
    /// Scenario name as the engine knows it.
    pub name: String,
    /// Path to the world definition file.
    pub world_path: String,
    /// Row-major occupancy grid. Opaque to the adapter; stored and
    /// exposed for callers that want it.
    pub obstacle_map: Vec<Vec<bool>>,
    /// Number of nodes in the world graph.
    pub node_count: u32,
    /// Number of agents the scenario spawns.
    pub n_agents: u32,
    /// Start node per agent, in engine index order.
    pub agent_starts: Vec<NodeId>,
}

/// One probed node's labeled sample values.
///
/// `labels[i]` names `samples[i]`; the arrays are parallel because that
/// is how the engine reports them, and the synthesizer checks the arity
/// before pairing. Only the *type and shape* of each sample binds the
/// schema — sample contents are bounds and length hints, not data.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeValueProbe {
    /// Attribute labels, in the engine's reporting order.
    pub labels: Vec<String>,
    /// One sample value per label.
    pub samples: Vec<Value>,
}

/// A world view: node positions, edges, and per-node attribute bundles.
///
/// Serves both an agent's belief (possibly partial) and the global
/// ground truth. `positions[i]` and `bundles[i]` describe the same node;
/// the translator rejects views where the two counts differ.
#[derive(Clone, Debug, PartialEq)]
pub struct BeliefWorld {
    /// Per-node 2-D positions.
    pub positions: Vec<Position>,
    /// Undirected edges as `(a, b)` node pairs.
    pub edges: Vec<(NodeId, NodeId)>,
    /// Per-node attribute bundles, labels in schema order.
    pub bundles: Vec<ValueBundle>,
}

/// Result of advancing the engine one round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundReport<W> {
    /// Whether the simulation considers itself still running.
    pub running: bool,
    /// Successor world handle. The world passed to
    /// [`world_step()`](Engine::world_step) was consumed producing it.
    pub world: W,
    /// One reward per live agent, in engine index order.
    pub rewards: Vec<f64>,
}

/// A round's actions, encoded for submission to the engine.
///
/// Entries are in engine index order. Building a batch is the one place
/// where 1-based agent IDs become 0-based engine indices.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use leyline_core::{ActionBatch, AgentId, EngineIndex, NodeId};
///
/// let live: Vec<AgentId> = (1..=2).map(|i| AgentId::new(i).unwrap()).collect();
/// let mut actions = IndexMap::new();
/// actions.insert(live[1], NodeId(0));
/// actions.insert(live[0], NodeId(3));
///
/// let batch = ActionBatch::from_actions(&actions, &live).unwrap();
/// assert_eq!(batch.entries(), &[(EngineIndex(0), NodeId(3)), (EngineIndex(1), NodeId(0))]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionBatch {
    entries: SmallVec<[(EngineIndex, NodeId); 8]>,
}

impl ActionBatch {
    /// Encode one action per live agent into engine submission order.
    ///
    /// `live` is the session's live set in ascending ID order. The map
    /// must cover it exactly: an entry outside `live` or a live agent
    /// with no entry fails the whole batch, and nothing is submitted.
    ///
    /// # Errors
    ///
    /// [`LookupError::UnknownAgent`] for an entry outside the live set,
    /// [`LookupError::MissingAction`] for a live agent without one.
    pub fn from_actions(
        actions: &IndexMap<AgentId, NodeId>,
        live: &[AgentId],
    ) -> Result<Self, LookupError> {
        // 1. Every supplied agent must be live.
        for agent in actions.keys() {
            if !live.contains(agent) {
                return Err(LookupError::UnknownAgent { agent: *agent });
            }
        }
        // 2. Every live agent must act. Encoding walks the live set in
        //    ID order, so entry k belongs to engine index k.
        let mut entries = SmallVec::with_capacity(live.len());
        for &agent in live {
            let target = actions
                .get(&agent)
                .ok_or(LookupError::MissingAction { agent })?;
            entries.push((agent.engine_index(), *target));
        }
        Ok(Self { entries })
    }

    /// Encoded entries in engine index order.
    pub fn entries(&self) -> &[(EngineIndex, NodeId)] {
        &self.entries
    }

    /// Number of encoded actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch holds no actions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Contract the environment adapter requires from a simulation engine.
///
/// Implementations own world creation, physics, agent movement, and
/// reward computation. The adapter drives them through this trait and
/// treats both handle types as opaque.
///
/// All methods return [`EngineError`] on failure. Failures propagate to
/// the adapter's caller unwrapped; the adapter never retries a call.
pub trait Engine {
    /// Opaque world handle.
    type World;
    /// Opaque agent-collection handle.
    type Agents;

    /// Resolve a scenario name into its configuration.
    ///
    /// Called once at environment construction. The returned
    /// [`ScenarioConfig`] is captured and reused by every reset.
    fn load_scenario(&mut self, name: &str) -> Result<ScenarioConfig, EngineError>;

    /// Create a fresh world from a world definition file.
    fn create_world(&mut self, world_path: &str) -> Result<Self::World, EngineError>;

    /// Spawn `n_agents` agents at the given start nodes.
    ///
    /// `starts[k]` is the start node of engine index `k`.
    fn spawn_agents(
        &mut self,
        n_agents: u32,
        starts: &[NodeId],
        world: &Self::World,
    ) -> Result<Self::Agents, EngineError>;

    /// Submit one round's actions for all live agents.
    ///
    /// Submission is atomic: on error, no action from `batch` may have
    /// been applied. `render` requests engine-side visualization and is
    /// always `false` under this adapter.
    fn submit_actions(
        &mut self,
        agents: &mut Self::Agents,
        world: &Self::World,
        render: bool,
        batch: &ActionBatch,
    ) -> Result<(), EngineError>;

    /// Advance the world exactly one round.
    ///
    /// Consumes the current world handle and returns its successor in
    /// the [`RoundReport`], along with per-agent rewards and the
    /// engine's running flag.
    fn world_step(
        &mut self,
        world: Self::World,
        agents: &mut Self::Agents,
    ) -> Result<RoundReport<Self::World>, EngineError>;

    /// Report one node's labeled sample values for schema synthesis.
    ///
    /// Called exactly once per environment instance, at construction.
    fn node_value_probe(&mut self, world: &Self::World) -> Result<NodeValueProbe, EngineError>;

    /// An agent's current 2-D position.
    fn agent_position(
        &self,
        agents: &Self::Agents,
        index: EngineIndex,
    ) -> Result<Position, EngineError>;

    /// An agent's believed view of the world.
    ///
    /// Bundles must carry the labels fixed at synthesis time, in order;
    /// divergence is reported by the translator as a schema violation.
    fn belief_world(
        &self,
        agents: &Self::Agents,
        index: EngineIndex,
    ) -> Result<BeliefWorld, EngineError>;

    /// The ground-truth world view, independent of any agent's belief.
    fn global_world(&self, world: &Self::World) -> Result<BeliefWorld, EngineError>;
}
