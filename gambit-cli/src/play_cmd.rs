//! Play command - run full arena games with one runner controller
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_runner_config(), play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;

use gambit_arena::{
    ArenaState, ChaserBehavior, Controller, Direction, EvaluatorKind, GameOutcome, GameRunner,
    Heuristics, Layout, RunnerConfig,
};
use gambit_core::{GameResult, Policy, SearchConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Built-in layout name or layout file
    #[arg(long, default_value = "small")]
    pub layout: String,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Search policy (minimax, alpha-beta, expectimax); overrides --config
    #[arg(long)]
    pub policy: Option<Policy>,

    /// Search depth in rounds; overrides --config
    #[arg(long)]
    pub depth: Option<u32>,

    /// Use the one-ply reflex agent instead of search
    #[arg(long)]
    pub reflex: bool,

    /// Leaf evaluator (score, heuristic)
    #[arg(long, default_value = "heuristic")]
    pub eval: EvaluatorKind,

    /// Chaser behavior (random, directional)
    #[arg(long, default_value = "random")]
    pub chasers: ChaserBehavior,

    /// Heuristic weights JSON file
    #[arg(long, value_name = "FILE")]
    pub heuristics: Option<PathBuf>,

    /// Runner moves before a game is abandoned
    #[arg(long, default_value = "200")]
    pub max_moves: u32,

    /// Play games one after another
    #[arg(long)]
    pub sequential: bool,

    /// Record each game's runner moves in the report
    #[arg(long)]
    pub paths: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    result: GameResult,
    score: i32,
    moves: usize,
    /// Runner moves in order, only with `--paths`
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<Direction>>,
}

/// Aggregated results over all games
#[derive(Clone, Debug, Serialize)]
struct PlayResults {
    layout: String,
    controller: String,
    evaluator: EvaluatorKind,
    chasers: ChaserBehavior,
    wins: usize,
    losses: usize,
    unfinished: usize,
    avg_score: f64,
    avg_moves: f64,
    games: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Resolve the layout and build the runner configuration
/// 2. Play all games
/// 3. Report results
pub fn run(args: PlayArgs, seed: Option<u64>, search: SearchConfig) -> Result<()> {
    let layout = Layout::resolve(&args.layout)
        .with_context(|| format!("Failed to resolve layout '{}'", args.layout))?;
    let config = build_runner_config(&args, seed, search)?;

    tracing::info!(
        "Playing {} games on '{}' ({}, {} evaluator, {} chasers)",
        args.games,
        layout.name,
        controller_name(&config.controller),
        config.evaluator,
        config.chasers
    );

    let records = play_games(&layout, &config, args.games, !args.sequential, args.paths)?;
    let results = compute_statistics(&layout.name, &config, records);

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_runner_config(
    args: &PlayArgs,
    seed: Option<u64>,
    mut search: SearchConfig,
) -> Result<RunnerConfig> {
    if let Some(policy) = args.policy {
        search.policy = policy;
    }
    if let Some(depth) = args.depth {
        search.depth = depth;
    }
    search.validate()?;

    let heuristics = match &args.heuristics {
        Some(path) => load_heuristics(path)?,
        None => Heuristics::default(),
    };

    Ok(RunnerConfig {
        controller: if args.reflex {
            Controller::Reflex
        } else {
            Controller::Search(search)
        },
        evaluator: args.eval,
        heuristics,
        chasers: args.chasers,
        max_moves: args.max_moves,
        seed: seed.unwrap_or(42),
    })
}

/// Play `games` games, game `i` seeded with `seed + i`
fn play_games(
    layout: &Layout,
    config: &RunnerConfig,
    games: usize,
    parallel: bool,
    keep_paths: bool,
) -> Result<Vec<GameRecord>> {
    let initial = ArenaState::new(layout);

    let records: Vec<Result<GameRecord>> = if parallel {
        (0..games)
            .into_par_iter()
            .map(|i| play_single_game(&initial, config, i, keep_paths))
            .collect()
    } else {
        (0..games)
            .map(|i| play_single_game(&initial, config, i, keep_paths))
            .collect()
    };

    let records = records.into_iter().collect::<Result<Vec<_>>>()?;
    for record in &records {
        tracing::info!(
            "Game {}: {:?} score {} ({} moves)",
            record.game_number,
            record.result,
            record.score,
            record.moves
        );
    }
    Ok(records)
}

fn report_results(results: &PlayResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    initial: &ArenaState,
    config: &RunnerConfig,
    index: usize,
    keep_paths: bool,
) -> Result<GameRecord> {
    let seed = config.seed.wrapping_add(index as u64);
    let mut runner = GameRunner::new(config.clone());
    runner.reset_seed(seed);

    let outcome = runner
        .play_game(initial.clone())
        .with_context(|| format!("Game {} (seed {}) failed", index + 1, seed))?;

    Ok(to_record(index + 1, seed, outcome, keep_paths))
}

fn compute_statistics(layout: &str, config: &RunnerConfig, games: Vec<GameRecord>) -> PlayResults {
    let wins = games.iter().filter(|g| g.result == GameResult::Win).count();
    let losses = games.iter().filter(|g| g.result == GameResult::Lose).count();
    let unfinished = games.len() - wins - losses;

    let (avg_score, avg_moves) = if games.is_empty() {
        (0.0, 0.0)
    } else {
        let n = games.len() as f64;
        (
            games.iter().map(|g| g.score as f64).sum::<f64>() / n,
            games.iter().map(|g| g.moves as f64).sum::<f64>() / n,
        )
    };

    PlayResults {
        layout: layout.to_string(),
        controller: controller_name(&config.controller),
        evaluator: config.evaluator,
        chasers: config.chasers,
        wins,
        losses,
        unfinished,
        avg_score,
        avg_moves,
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn load_heuristics(path: &Path) -> Result<Heuristics> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read heuristics: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse heuristics: {}", path.display()))
}

fn to_record(game_number: usize, seed: u64, outcome: GameOutcome, keep_path: bool) -> GameRecord {
    GameRecord {
        game_number,
        seed,
        result: outcome.result,
        score: outcome.score,
        moves: outcome.moves.len(),
        path: keep_path.then_some(outcome.moves),
    }
}

fn controller_name(controller: &Controller) -> String {
    match controller {
        Controller::Search(config) => format!("{} depth {}", config.policy, config.depth),
        Controller::Reflex => "reflex".to_string(),
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

fn print_text_results(results: &PlayResults) {
    let total = results.games.len();

    println!("\n=== Play Results ===");
    println!("Layout:      {}", results.layout);
    println!("Controller:  {}", results.controller);
    println!("Evaluator:   {}", results.evaluator);
    println!("Chasers:     {}", results.chasers);
    println!("Total games: {}", total);
    println!("Wins:        {} ({:.1}%)", results.wins, percent(results.wins, total));
    println!("Losses:      {} ({:.1}%)", results.losses, percent(results.losses, total));
    println!(
        "Unfinished:  {} ({:.1}%)",
        results.unfinished,
        percent(results.unfinished, total)
    );
    println!("Avg score:   {:.1}", results.avg_score);
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {} (seed {}): {:?}, score {} in {} moves",
            game.game_number, game.seed, game.result, game.score, game.moves
        );
        if let Some(path) = &game.path {
            let path: Vec<String> = path.iter().map(|d| d.to_string()).collect();
            println!("    {}", path.join(" "));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
