//! The parallel multi-agent environment session.
//!
//! [`ParallelEnv`] drives a simulation engine through synchronized
//! rounds: all live agents act, the world advances exactly once, and
//! every agent observes. Construction probes the engine once to fix the
//! observation schema; every later round is validated against it.
//!
//! # Session lifecycle
//!
//! ```text
//! UNINITIALIZED ──reset──▶ READY ◀──▶ STEPPING
//!        │                   │            │ (round failed)
//!        └───────close───────┴─────▶ CLOSED
//! ```
//!
//! A failed round leaves the session in `STEPPING`: the engine's round
//! counter can no longer be trusted, so only `reset` or `close` may
//! follow. Re-stepping a desynchronized engine is never allowed.
//!
//! # Ownership model
//!
//! The session owns the engine and the *current* world and agent
//! handles. `world_step` consumes the world and returns its successor,
//! so an already-advanced world cannot be stepped twice. All mutating
//! methods take `&mut self`; no two rounds can be in flight at once.

use std::fmt;
use std::time::Instant;

use indexmap::IndexMap;

use leyline_core::{
    ActionBatch, AgentId, Engine, EngineError, LookupError, NodeId, RoundId, ScenarioConfig,
    Value, ValueBundle, ViolationError,
};
use leyline_obs::{global_state, synthesize, translate, ObservationSchema};
use leyline_space::{Discrete, Space};

use crate::config::{ConfigError, EnvConfig};
use crate::metrics::RoundMetrics;
use crate::outcome::StepOutcome;

// ── Phase ──────────────────────────────────────────────────────────

/// Lifecycle phase of a [`ParallelEnv`] session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but never reset; no world or agent handles exist.
    Uninitialized,
    /// A world is live and the session accepts `step` calls.
    Ready,
    /// A round is in flight, or a round failed and poisoned the session.
    Stepping,
    /// Terminal. Every later `step`/`reset` fails.
    Closed,
}

// ── EnvError ───────────────────────────────────────────────────────

/// Errors from `reset`, `step`, and the session's query methods.
#[derive(Clone, Debug, PartialEq)]
pub enum EnvError {
    /// The session has no live world: `reset` has not been called yet.
    NotReady,
    /// A failed round desynchronized the session; only `reset` or
    /// `close` can leave this state.
    RoundInFlight,
    /// The session was closed.
    Closed,
    /// An agent ID could not be resolved against the session's sets.
    Lookup(LookupError),
    /// An engine call failed, propagated unwrapped.
    Engine(EngineError),
    /// Engine state diverged from the schema fixed at construction.
    Violation(ViolationError),
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "session not ready: call reset() first"),
            Self::RoundInFlight => {
                write!(f, "a failed round poisoned the session: reset() or close()")
            }
            Self::Closed => write!(f, "session is closed"),
            Self::Lookup(e) => write!(f, "agent lookup: {e}"),
            Self::Engine(e) => write!(f, "{e}"),
            Self::Violation(e) => write!(f, "schema violation: {e}"),
        }
    }
}

impl std::error::Error for EnvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lookup(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Violation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LookupError> for EnvError {
    fn from(e: LookupError) -> Self {
        Self::Lookup(e)
    }
}

impl From<EngineError> for EnvError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<ViolationError> for EnvError {
    fn from(e: ViolationError) -> Self {
        Self::Violation(e)
    }
}

// ── ParallelEnv ────────────────────────────────────────────────────

/// The current world and agent handles, present only while the session
/// has a live world.
struct Handles<E: Engine> {
    world: E::World,
    agents: E::Agents,
}

/// A parallel multi-agent environment over a simulation engine.
///
/// Created from an [`EnvConfig`] via [`new()`](ParallelEnv::new), which
/// resolves the scenario, probes one node's attribute samples, and
/// synthesizes the observation schema. The schema is fixed for the
/// lifetime of the instance; `reset` rebuilds the world but never the
/// schema.
///
/// # Example
///
/// ```ignore
/// let mut env = ParallelEnv::new(engine, EnvConfig::new("patrol"))?;
/// let mut observations = env.reset(Some(42))?;
/// for _ in 0..max_rounds {
///     let actions = policy(&observations);
///     let outcome = env.step(&actions)?;
///     observations = outcome.observations;
/// }
/// ```
pub struct ParallelEnv<E: Engine> {
    engine: E,
    config: EnvConfig,
    scenario: ScenarioConfig,
    schema: ObservationSchema,
    action_space: Space,
    live: Vec<AgentId>,
    possible: Vec<AgentId>,
    handles: Option<Handles<E>>,
    phase: Phase,
    round: RoundId,
    seed: Option<u64>,
    last_metrics: RoundMetrics,
}

impl<E: Engine> ParallelEnv<E> {
    /// Build a session over `engine`.
    ///
    /// Resolves the scenario, checks it against the configuration,
    /// creates a throwaway world to probe one node's attribute samples,
    /// and synthesizes the observation schema. The session comes up in
    /// [`Phase::Uninitialized`]; call [`reset()`](Self::reset) before
    /// the first `step`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for invalid configuration, out-of-bounds
    /// scenarios, engine failures during construction, or a probe that
    /// fails schema synthesis. Construction never proceeds with a
    /// partial schema.
    pub fn new(mut engine: E, config: EnvConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let scenario = engine.load_scenario(&config.scenario)?;
        config.validate_scenario(&scenario)?;

        // Probe through a throwaway world; the first reset builds the
        // world the session actually runs.
        let world = engine.create_world(&scenario.world_path)?;
        let probe = engine.node_value_probe(&world)?;
        let schema = synthesize(&probe)?;

        let action_space = Space::Discrete(
            Discrete::new(i64::from(scenario.node_count)).expect("node count validated"),
        );
        let live = agent_ids(scenario.n_agents);
        let possible = agent_ids(config.max_agents);

        Ok(Self {
            engine,
            config,
            scenario,
            schema,
            action_space,
            live,
            possible,
            handles: None,
            phase: Phase::Uninitialized,
            round: RoundId(0),
            seed: None,
            last_metrics: RoundMetrics::default(),
        })
    }

    /// Restart the session from the construction-time scenario.
    ///
    /// Discards any prior world and agent handles and re-creates them
    /// from the scenario captured at construction: a full restart, not
    /// a checkpoint restore. Returns the live agents' first
    /// observations.
    ///
    /// `seed` is stored and readable via [`seed()`](Self::seed), but the
    /// engine contract has no seeding operation, so determinism across
    /// resets is not promised.
    ///
    /// # Errors
    ///
    /// [`EnvError::Closed`] after `close`; engine and schema-violation
    /// failures propagate, leaving the session without a live world.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<IndexMap<AgentId, Value>, EnvError> {
        if self.phase == Phase::Closed {
            return Err(EnvError::Closed);
        }
        if seed.is_some() {
            self.seed = seed;
        }

        // Old handles are discarded before the rebuild is attempted; a
        // failed reset leaves the session uninitialized, not poisoned.
        self.handles = None;
        self.phase = Phase::Uninitialized;

        let world = self.engine.create_world(&self.scenario.world_path)?;
        let agents =
            self.engine
                .spawn_agents(self.scenario.n_agents, &self.scenario.agent_starts, &world)?;
        let handles = Handles { world, agents };
        let observations = self.collect_observations(&handles)?;

        self.handles = Some(handles);
        self.round = RoundId(0);
        self.phase = Phase::Ready;
        Ok(observations)
    }

    /// Advance the session exactly one synchronized round.
    ///
    /// `actions` must supply one target node per live agent. The round
    /// runs in three ordered phases: the batch is encoded and submitted
    /// atomically, the world advances exactly once, and only then is
    /// every live agent's observation read back. Rewards come straight
    /// from the engine's round report, one per live agent in agent-ID
    /// order. `terminated` and `truncated` are always `false`.
    ///
    /// # Errors
    ///
    /// Phase errors ([`EnvError::NotReady`], [`EnvError::RoundInFlight`],
    /// [`EnvError::Closed`]) and lookup errors for a malformed action
    /// map leave the session unchanged. An engine or schema-violation
    /// failure mid-round poisons the session: the phase stays
    /// [`Phase::Stepping`] and only `reset` or `close` can leave it.
    pub fn step(&mut self, actions: &IndexMap<AgentId, NodeId>) -> Result<StepOutcome, EnvError> {
        match self.phase {
            Phase::Ready => {}
            Phase::Uninitialized => return Err(EnvError::NotReady),
            Phase::Stepping => return Err(EnvError::RoundInFlight),
            Phase::Closed => return Err(EnvError::Closed),
        }
        // The batch is validated before any engine call, so a malformed
        // action map never costs a round.
        let batch = ActionBatch::from_actions(actions, &self.live)?;
        let Some(handles) = self.handles.take() else {
            return Err(EnvError::NotReady);
        };

        self.phase = Phase::Stepping;
        let outcome = self.run_round(handles, &batch)?;
        self.phase = Phase::Ready;
        Ok(outcome)
    }

    /// Execute one round. Any error leaves the session poisoned in
    /// [`Phase::Stepping`] with no live handles.
    fn run_round(
        &mut self,
        handles: Handles<E>,
        batch: &ActionBatch,
    ) -> Result<StepOutcome, EnvError> {
        let round_start = Instant::now();
        let Handles { world, mut agents } = handles;

        // 1. Submit all actions as one atomic batch.
        let submit_start = Instant::now();
        self.engine.submit_actions(&mut agents, &world, false, batch)?;
        let submit_us = submit_start.elapsed().as_micros() as u64;

        // 2. Advance the world exactly one round; the old handle is
        //    consumed producing its successor.
        let advance_start = Instant::now();
        let report = self.engine.world_step(world, &mut agents)?;
        let advance_us = advance_start.elapsed().as_micros() as u64;
        if report.rewards.len() != self.live.len() {
            return Err(EnvError::Engine(EngineError::ContractViolation {
                op: "world_step",
                reason: format!(
                    "{} rewards for {} live agents",
                    report.rewards.len(),
                    self.live.len()
                ),
            }));
        }

        // 3. Only after the world has advanced, read every live agent
        //    back through the schema.
        let translate_start = Instant::now();
        let handles = Handles {
            world: report.world,
            agents,
        };
        let observations = self.collect_observations(&handles)?;
        let translate_us = translate_start.elapsed().as_micros() as u64;

        // 4. Assemble the five parallel maps over one key set.
        let rewards: IndexMap<AgentId, f64> = self
            .live
            .iter()
            .copied()
            .zip(report.rewards.iter().copied())
            .collect();
        let terminated = self.live.iter().map(|&a| (a, false)).collect();
        let truncated = self.live.iter().map(|&a| (a, false)).collect();
        let infos = self.live.iter().map(|&a| (a, ValueBundle::new())).collect();

        self.handles = Some(handles);
        self.round = RoundId(self.round.0 + 1);
        self.last_metrics = RoundMetrics {
            total_us: round_start.elapsed().as_micros() as u64,
            submit_us,
            advance_us,
            translate_us,
            live_agents: self.live.len() as u32,
            engine_running: report.running,
            round: self.round,
        };

        Ok(StepOutcome {
            observations,
            rewards,
            terminated,
            truncated,
            infos,
        })
    }

    /// Translate every live agent's position and belief into an
    /// observation, in ascending agent-ID order.
    fn collect_observations(
        &self,
        handles: &Handles<E>,
    ) -> Result<IndexMap<AgentId, Value>, EnvError> {
        let mut observations = IndexMap::with_capacity(self.live.len());
        for &agent in &self.live {
            let index = agent.engine_index();
            let position = self.engine.agent_position(&handles.agents, index)?;
            let belief = self.engine.belief_world(&handles.agents, index)?;
            observations.insert(agent, translate(&self.schema, position, &belief)?);
        }
        Ok(observations)
    }

    /// The ground-truth world snapshot, independent of any agent's
    /// belief: a `Dict{map, node_values}` value.
    ///
    /// # Errors
    ///
    /// Same phase errors as [`step()`](Self::step); engine and
    /// schema-violation failures propagate without consuming a round.
    pub fn state(&self) -> Result<Value, EnvError> {
        let handles = self.live_handles()?;
        let view = self.engine.global_world(&handles.world)?;
        Ok(global_state(&self.schema, &view)?)
    }

    fn live_handles(&self) -> Result<&Handles<E>, EnvError> {
        match self.phase {
            Phase::Ready => self.handles.as_ref().ok_or(EnvError::NotReady),
            Phase::Uninitialized => Err(EnvError::NotReady),
            Phase::Stepping => Err(EnvError::RoundInFlight),
            Phase::Closed => Err(EnvError::Closed),
        }
    }

    /// The observation space for `agent`.
    ///
    /// Every possible agent shares the one tree synthesized at
    /// construction, including agents not currently live.
    ///
    /// # Errors
    ///
    /// [`LookupError::NotPossible`] for an agent outside `1..=max_agents`.
    pub fn observation_space(&self, agent: AgentId) -> Result<&Space, EnvError> {
        self.check_possible(agent)?;
        Ok(self.schema.tree())
    }

    /// The action space for `agent`: `Discrete(node_count)`, one action
    /// per target node.
    ///
    /// # Errors
    ///
    /// [`LookupError::NotPossible`] for an agent outside `1..=max_agents`.
    pub fn action_space(&self, agent: AgentId) -> Result<&Space, EnvError> {
        self.check_possible(agent)?;
        Ok(&self.action_space)
    }

    fn check_possible(&self, agent: AgentId) -> Result<(), EnvError> {
        if agent.get() > self.config.max_agents {
            return Err(EnvError::Lookup(LookupError::NotPossible {
                agent,
                max_agents: self.config.max_agents,
            }));
        }
        Ok(())
    }

    /// Rendering is unsupported; this is an explicit no-op.
    pub fn render(&self) {}

    /// Close the session: discard all handles and refuse every later
    /// `step`/`reset`. Idempotent.
    pub fn close(&mut self) {
        self.handles = None;
        self.phase = Phase::Closed;
    }

    /// Live agent IDs, ascending. A contiguous prefix of
    /// [`possible_agents()`](Self::possible_agents).
    pub fn agents(&self) -> &[AgentId] {
        &self.live
    }

    /// Every possible agent ID, `1..=max_agents`.
    pub fn possible_agents(&self) -> &[AgentId] {
        &self.possible
    }

    /// Number of live agents.
    pub fn num_agents(&self) -> usize {
        self.live.len()
    }

    /// Upper bound on concurrent agents.
    pub fn max_num_agents(&self) -> usize {
        self.possible.len()
    }

    /// Rounds completed since construction or the last reset.
    pub fn current_round(&self) -> RoundId {
        self.round
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Metrics from the most recent successful round.
    pub fn last_metrics(&self) -> &RoundMetrics {
        &self.last_metrics
    }

    /// The most recent seed passed to [`reset()`](Self::reset).
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The engine scenario captured at construction.
    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }
}

impl<E: Engine> fmt::Debug for ParallelEnv<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelEnv")
            .field("scenario", &self.scenario.name)
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("live_agents", &self.live.len())
            .field("max_agents", &self.config.max_agents)
            .finish()
    }
}

fn agent_ids(n: u32) -> Vec<AgentId> {
    (1..=n)
        .map(|i| AgentId::new(i).expect("IDs start at 1"))
        .collect()
}
