//! Position evaluation

use std::fmt;
use std::str::FromStr;

use gambit_core::{Evaluator, GameResult, GameState, ScoreEvaluator};
use serde::{Deserialize, Serialize};

use crate::game::ArenaState;

/// Win value (effectively infinite, yet finite so sums stay defined)
pub const WIN_VALUE: f64 = 1e10;

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Weight of the game score
    pub score_weight: f64,
    /// Numerator of the inverse distance to each food pellet
    pub food_weight: f64,
    /// Numerator of the inverse distance to each capsule
    pub capsule_weight: f64,
    /// Numerator of the inverse distance to each scared chaser
    pub scared_weight: f64,
    /// Weight per cell of distance to each dangerous chaser
    pub chaser_weight: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            score_weight: 1000.0,
            food_weight: 1000.0,
            capsule_weight: 10.0,
            scared_weight: 10.0,
            chaser_weight: 1.0,
        }
    }
}

/// Evaluate position from the runner's perspective
pub fn evaluate(state: &ArenaState, heuristics: &Heuristics) -> f64 {
    match state.result() {
        GameResult::Win => return WIN_VALUE,
        GameResult::Lose => return -WIN_VALUE,
        GameResult::Ongoing => {}
    }

    let runner = state.runner();
    let inverse = |weight: f64, distance: u32| weight / distance.max(1) as f64;

    let mut score = heuristics.score_weight * state.points() as f64;

    for food in state.food() {
        score += inverse(heuristics.food_weight, runner.distance_to(food));
    }

    for chaser in state.chasers() {
        let distance = runner.distance_to(chaser.pos);
        if chaser.is_scared() {
            score += inverse(heuristics.scared_weight, distance);
        } else {
            score += heuristics.chaser_weight * distance as f64;
        }
    }

    for &capsule in state.capsules() {
        score += inverse(heuristics.capsule_weight, runner.distance_to(capsule));
    }

    score
}

/// [`Evaluator`] running [`evaluate`] with fixed weights
#[derive(Clone, Debug, Default)]
pub struct HeuristicEvaluator {
    pub heuristics: Heuristics,
}

impl HeuristicEvaluator {
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }
}

impl Evaluator<ArenaState> for HeuristicEvaluator {
    fn evaluate(&self, state: &ArenaState) -> f64 {
        evaluate(state, &self.heuristics)
    }
}

/// Leaf evaluator chosen by name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluatorKind {
    /// The game score as displayed
    Score,
    /// Weighted [`Heuristics`]
    Heuristic,
}

impl Default for EvaluatorKind {
    fn default() -> Self {
        EvaluatorKind::Heuristic
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Score => f.write_str("score"),
            EvaluatorKind::Heuristic => f.write_str("heuristic"),
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(EvaluatorKind::Score),
            "heuristic" => Ok(EvaluatorKind::Heuristic),
            other => Err(format!(
                "unknown evaluator '{}' (expected score or heuristic)",
                other
            )),
        }
    }
}

/// Arena evaluator selected at runtime
#[derive(Clone, Debug)]
pub enum ArenaEvaluator {
    Score(ScoreEvaluator),
    Heuristic(HeuristicEvaluator),
}

impl ArenaEvaluator {
    /// `heuristics` is ignored by the score evaluator
    pub fn new(kind: EvaluatorKind, heuristics: Heuristics) -> Self {
        match kind {
            EvaluatorKind::Score => ArenaEvaluator::Score(ScoreEvaluator),
            EvaluatorKind::Heuristic => ArenaEvaluator::Heuristic(HeuristicEvaluator::new(heuristics)),
        }
    }

    pub fn kind(&self) -> EvaluatorKind {
        match self {
            ArenaEvaluator::Score(_) => EvaluatorKind::Score,
            ArenaEvaluator::Heuristic(_) => EvaluatorKind::Heuristic,
        }
    }
}

impl Evaluator<ArenaState> for ArenaEvaluator {
    fn evaluate(&self, state: &ArenaState) -> f64 {
        match self {
            ArenaEvaluator::Score(e) => e.evaluate(state),
            ArenaEvaluator::Heuristic(e) => e.evaluate(state),
        }
    }
}
