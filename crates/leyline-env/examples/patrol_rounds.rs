//! End-to-end parallel environment loop example.
//!
//! Demonstrates: build engine → ParallelEnv → reset → step with per-agent
//! actions → read rewards and observations → reset → repeat.

use indexmap::IndexMap;
use leyline_core::{AgentId, NodeId, Value};
use leyline_env::{EnvConfig, ParallelEnv};
use leyline_test_utils::MockEngine;

fn main() {
    println!("=== Leyline Patrol Rounds Example ===\n");

    let engine = MockEngine::new("patrol", 8, 3).with_seed(42);
    let mut env = ParallelEnv::new(engine, EnvConfig::new("patrol")).unwrap();

    println!(
        "scenario '{}': {} nodes, {} live agents (of {} possible)",
        env.scenario().name,
        env.scenario().node_count,
        env.num_agents(),
        env.max_num_agents(),
    );
    let first = env.agents()[0];
    println!("observation space: {}", env.observation_space(first).unwrap());
    println!("action space:      {}\n", env.action_space(first).unwrap());

    // --- Episode 1: round-robin patrol ---
    println!("Episode 1: 20 rounds of round-robin patrol");
    env.reset(Some(42)).unwrap();
    let node_count = env.scenario().node_count;

    let mut episode_reward = 0.0;
    for round in 0..20u32 {
        let actions: IndexMap<AgentId, NodeId> = env
            .agents()
            .iter()
            .map(|&agent| (agent, NodeId((round + agent.get()) % node_count)))
            .collect();

        let outcome = env.step(&actions).unwrap();
        let round_reward: f64 = outcome.rewards.values().sum();
        episode_reward += round_reward;

        if round % 5 == 0 || round == 19 {
            println!(
                "  round {:>2}: reward={:>5.2}, total={:>6.2}, time={:>4}us",
                round + 1,
                round_reward,
                episode_reward,
                env.last_metrics().total_us,
            );
        }
    }

    // --- Reset and Episode 2 ---
    println!("\nResetting session...");
    let observations = env.reset(Some(99)).unwrap();
    println!("Episode 2: 10 rounds, everyone holds node 0");

    if let Some(Value::Dict(branches)) = observations.get(&first) {
        println!("  first observation branches: {:?}", branches.keys().collect::<Vec<_>>());
    }

    for round in 0..10u32 {
        let actions: IndexMap<AgentId, NodeId> = env
            .agents()
            .iter()
            .map(|&agent| (agent, NodeId(0)))
            .collect();
        let outcome = env.step(&actions).unwrap();

        if round % 5 == 0 || round == 9 {
            let reward: f64 = outcome.rewards.values().sum();
            println!(
                "  round {:>2}: reward={:>5.2}, round_id={}",
                round + 1,
                reward,
                env.current_round(),
            );
        }
    }

    env.close();
    println!("\nSession closed. Done.");
}
