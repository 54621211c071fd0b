//! Per-round performance metrics for the environment session.
//!
//! [`RoundMetrics`] captures timing data for a single synchronized
//! round. The session populates it after each successful `step()`;
//! consumers read it from
//! [`last_metrics()`](crate::ParallelEnv::last_metrics).

use leyline_core::RoundId;

/// Timing metrics collected during a single round.
///
/// All durations are in microseconds. The three stage timings cover the
/// round's ordered phases: encode-and-submit actions, advance the engine
/// world, translate per-agent observations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundMetrics {
    /// Wall-clock time for the entire round, in microseconds.
    pub total_us: u64,
    /// Time spent submitting the action batch, in microseconds.
    pub submit_us: u64,
    /// Time spent advancing the engine world, in microseconds.
    pub advance_us: u64,
    /// Time spent translating per-agent observations, in microseconds.
    pub translate_us: u64,
    /// Number of live agents this round.
    pub live_agents: u32,
    /// The engine's running flag from this round's report.
    ///
    /// The session never terminates episodes itself; this is where an
    /// engine-side end-of-episode signal would first become visible.
    pub engine_running: bool,
    /// The round this data describes.
    pub round: RoundId,
}
