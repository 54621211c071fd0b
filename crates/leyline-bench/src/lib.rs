//! Benchmark profiles and utilities for the Leyline environment adapter.
//!
//! Provides pre-built engine/session profiles for benchmarking and
//! examples:
//!
//! - [`patrol_profile`]: 64-node path world, 4 agents
//! - [`stress_profile`]: 1024-node path world, 16 agents, wide probe
//! - [`wide_probe_engine`]: attribute-heavy engine for schema benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use leyline_core::Value;
use leyline_env::{EnvConfig, ParallelEnv};
use leyline_test_utils::MockEngine;

/// Build the reference benchmark profile: 64 nodes, 4 agents, the
/// default three-attribute probe.
pub fn patrol_profile(seed: u64) -> ParallelEnv<MockEngine> {
    let engine = MockEngine::new("patrol", 64, 4).with_seed(seed);
    ParallelEnv::new(engine, EnvConfig::new("patrol")).expect("profile is well-formed")
}

/// Build the stress benchmark profile: 1024 nodes, 16 agents, probe
/// widened to a dozen attributes.
pub fn stress_profile(seed: u64) -> ParallelEnv<MockEngine> {
    let engine = wide_probe_engine("stress", 1024, 16, 9).with_seed(seed);
    ParallelEnv::new(engine, EnvConfig::new("stress")).expect("profile is well-formed")
}

/// A mock engine whose probe carries `extra` attributes beyond the
/// default three, cycling through every recognized scalar and list kind.
pub fn wide_probe_engine(name: &str, node_count: u32, n_agents: u32, extra: u32) -> MockEngine {
    let mut engine = MockEngine::new(name, node_count, n_agents);
    for i in 0..extra {
        let label = format!("attr_{i}");
        let sample = match i % 5 {
            0 => Value::Bool(true),
            1 => Value::Int(8),
            2 => Value::Real(0.0),
            3 => Value::Text("wxyz".to_string()),
            _ => Value::List(vec![Value::Int(3), Value::Int(5), Value::Int(7)]),
        };
        engine = engine.with_attribute(label, sample);
    }
    engine
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patrol_profile_builds_and_steps() {
        let mut env = patrol_profile(42);
        let observations = env.reset(Some(42)).unwrap();
        assert_eq!(observations.len(), 4);
    }

    #[test]
    fn stress_profile_builds() {
        let env = stress_profile(42);
        assert_eq!(env.num_agents(), 16);
        assert_eq!(env.scenario().node_count, 1024);
    }

    #[test]
    fn wide_probe_engine_widens_the_schema() {
        let mut env = ParallelEnv::new(
            wide_probe_engine("stress", 16, 2, 5),
            EnvConfig::new("stress"),
        )
        .unwrap();
        env.reset(None).unwrap();
        // 3 default attributes + 5 extra.
        let leyline_core::Value::Dict(branches) = env.state().unwrap() else {
            panic!("state is not a dict");
        };
        let Some(leyline_core::Value::List(nodes)) = branches.get("node_values") else {
            panic!("node_values branch is not a list");
        };
        let leyline_core::Value::Dict(bundle) = &nodes[0] else {
            panic!("node entry is not a bundle");
        };
        assert_eq!(bundle.len(), 8);
    }
}
