//! Nodes command - compare search effort across policies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: measure_all(), report_results()
//! - Level 3: measure_policy()
//! - Level 4: formatting utilities

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use gambit_arena::{ArenaEvaluator, ArenaState, Direction, EvaluatorKind, Heuristics, Layout};
use gambit_core::{Policy, SearchAgent, SearchConfig, SearchStats, MAX_DEPTH};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct NodesArgs {
    /// Built-in layout name or layout file
    #[arg(long, default_value = "small")]
    pub layout: String,

    /// Deepest search to measure, in rounds
    #[arg(long, default_value = "3")]
    pub depth: u32,

    /// Only measure this policy
    #[arg(long)]
    pub policy: Option<Policy>,

    /// Leaf evaluator (score, heuristic)
    #[arg(long, default_value = "heuristic")]
    pub eval: EvaluatorKind,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One search from the layout's initial position
#[derive(Clone, Debug, Serialize)]
struct Measurement {
    policy: Policy,
    depth: u32,
    action: Option<Direction>,
    score: f64,
    stats: SearchStats,
    #[serde(serialize_with = "as_millis")]
    elapsed: Duration,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run nodes command
///
/// 1. Resolve the layout
/// 2. Search its initial position with every policy at depths 0..=D
/// 3. Report counts
pub fn run(args: NodesArgs, search: SearchConfig) -> Result<()> {
    if args.depth > MAX_DEPTH {
        anyhow::bail!("depth {} exceeds maximum {}", args.depth, MAX_DEPTH);
    }
    let layout = Layout::resolve(&args.layout)
        .with_context(|| format!("Failed to resolve layout '{}'", args.layout))?;

    tracing::info!("Measuring '{}' up to depth {}", layout.name, args.depth);

    let policies = match args.policy {
        Some(policy) => vec![policy],
        None => Policy::ALL.to_vec(),
    };
    let measurements = measure_all(&layout, &policies, args.depth, search, args.eval)?;

    report_results(&measurements, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn measure_all(
    layout: &Layout,
    policies: &[Policy],
    max_depth: u32,
    base: SearchConfig,
    evaluator: EvaluatorKind,
) -> Result<Vec<Measurement>> {
    let state = ArenaState::new(layout);
    let mut measurements = Vec::new();

    for depth in 0..=max_depth {
        for &policy in policies {
            let config = SearchConfig {
                policy,
                depth,
                ..base
            };
            measurements.push(measure_policy(&state, config, evaluator)?);
        }
    }

    Ok(measurements)
}

fn report_results(measurements: &[Measurement], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(measurements)?);
    } else {
        print_text_results(measurements);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn measure_policy(
    state: &ArenaState,
    config: SearchConfig,
    evaluator: EvaluatorKind,
) -> Result<Measurement> {
    let agent = SearchAgent::new(config, ArenaEvaluator::new(evaluator, Heuristics::default()))?;

    let start = Instant::now();
    let decision = agent
        .analyze(state)
        .with_context(|| format!("{} search at depth {} failed", config.policy, config.depth))?;
    let elapsed = start.elapsed();

    Ok(Measurement {
        policy: config.policy,
        depth: config.depth,
        action: decision.action,
        score: decision.score,
        stats: decision.stats,
        elapsed,
    })
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

fn print_text_results(measurements: &[Measurement]) {
    println!("\n=== Search Effort ===");
    println!(
        "{:<12} {:>5} {:>10} {:>10} {:>8} {:>7} {:>10}  {}",
        "Policy", "Depth", "Nodes", "Leaves", "Cutoffs", "MaxPly", "Time (ms)", "Action"
    );
    println!("{}", "-".repeat(80));

    for m in measurements {
        let action = m
            .action
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:>5} {:>10} {:>10} {:>8} {:>7} {:>10.2}  {}",
            m.policy.to_string(),
            m.depth,
            m.stats.nodes,
            m.stats.leaves,
            m.stats.cutoffs,
            m.stats.max_ply,
            m.elapsed.as_secs_f64() * 1000.0,
            action
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Layout {
        gambit_arena::layouts::builtin("corridor").unwrap()
    }

    #[test]
    fn test_measure_all_covers_every_depth_and_policy() {
        let measurements = measure_all(
            &corridor(),
            &Policy::ALL,
            2,
            SearchConfig::default(),
            EvaluatorKind::Heuristic,
        )
        .unwrap();
        assert_eq!(measurements.len(), 9);

        let root_only = &measurements[0];
        assert_eq!(root_only.depth, 0);
        assert_eq!(root_only.stats.nodes, 1);
        assert_eq!(root_only.action, None);
    }

    #[test]
    fn test_pruning_never_expands_more() {
        let layout = gambit_arena::layouts::builtin("small").unwrap();
        let measurements = measure_all(
            &layout,
            &[Policy::Minimax, Policy::AlphaBeta],
            2,
            SearchConfig::default(),
            EvaluatorKind::Heuristic,
        )
        .unwrap();

        for pair in measurements.chunks(2) {
            assert!(pair[1].stats.nodes <= pair[0].stats.nodes);
            assert_eq!(pair[0].action, pair[1].action);
        }
    }

    #[test]
    fn test_evaluator_does_not_change_effort_without_pruning() {
        let layout = corridor();
        let policies = [Policy::Minimax, Policy::Expectimax];
        let heuristic =
            measure_all(&layout, &policies, 2, SearchConfig::default(), EvaluatorKind::Heuristic)
                .unwrap();
        let score =
            measure_all(&layout, &policies, 2, SearchConfig::default(), EvaluatorKind::Score)
                .unwrap();

        for (h, s) in heuristic.iter().zip(&score) {
            assert_eq!(h.stats.nodes, s.stats.nodes);
        }
        assert_ne!(heuristic.last().unwrap().score, score.last().unwrap().score);
    }
}
