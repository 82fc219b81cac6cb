//! Game runner - plays full arena games

use gambit_core::{GameResult, GameState, ReflexAgent, Result, SearchAgent, SearchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::Direction;
use crate::chaser::ChaserBehavior;
use crate::eval::{ArenaEvaluator, EvaluatorKind, Heuristics};
use crate::game::ArenaState;

/// How the runner picks its moves
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Controller {
    /// Depth-limited search
    Search(SearchConfig),
    /// One-ply greedy baseline
    Reflex,
}

impl Default for Controller {
    fn default() -> Self {
        Controller::Search(SearchConfig::default())
    }
}

/// Configuration for playing games
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    pub controller: Controller,
    /// Leaf evaluator of the runner's agent
    pub evaluator: EvaluatorKind,
    /// Weights used by the heuristic evaluator
    pub heuristics: Heuristics,
    pub chasers: ChaserBehavior,
    /// Runner moves before the game is abandoned
    pub max_moves: u32,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            controller: Controller::default(),
            evaluator: EvaluatorKind::default(),
            heuristics: Heuristics::default(),
            chasers: ChaserBehavior::Random,
            max_moves: 200,
            seed: 42,
        }
    }
}

impl RunnerConfig {
    pub fn search(config: SearchConfig) -> Self {
        Self {
            controller: Controller::Search(config),
            ..Default::default()
        }
    }

    pub fn reflex() -> Self {
        Self {
            controller: Controller::Reflex,
            ..Default::default()
        }
    }

    pub fn with_evaluator(mut self, evaluator: EvaluatorKind) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_chasers(mut self, chasers: ChaserBehavior) -> Self {
        self.chasers = chasers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }
}

/// Outcome of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameOutcome {
    /// Final result; `Ongoing` when the move limit was hit
    pub result: GameResult,
    pub score: i32,
    /// Runner moves in order
    pub moves: Vec<Direction>,
}

impl GameOutcome {
    pub fn won(&self) -> bool {
        self.result == GameResult::Win
    }

    pub fn lost(&self) -> bool {
        self.result == GameResult::Lose
    }

    /// Abandoned at the move limit
    pub fn is_unfinished(&self) -> bool {
        self.result == GameResult::Ongoing
    }
}

enum Player {
    Search(SearchAgent<ArenaEvaluator>),
    Reflex(ReflexAgent<ArenaEvaluator>),
}

impl Player {
    fn decide(&mut self, state: &ArenaState) -> Result<Option<Direction>> {
        match self {
            Player::Search(agent) => agent.decide(state),
            Player::Reflex(agent) => agent.decide(state),
        }
    }
}

/// Plays games with one runner controller against the configured chasers
pub struct GameRunner {
    config: RunnerConfig,
    seed_counter: u64,
}

impl GameRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let seed_counter = config.seed;
        Self {
            config,
            seed_counter,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Play one game from `initial`
    ///
    /// Fails only when the search reports an error; the game is then
    /// abandoned rather than continued with a guessed move.
    pub fn play_game(&mut self, initial: ArenaState) -> Result<GameOutcome> {
        let seed = self.next_seed();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut player = self.create_player(seed)?;

        let mut state = initial;
        let mut moves = Vec::new();

        'game: while !state.is_terminal() && state.moves < self.config.max_moves {
            let Some(mv) = player.decide(&state)? else {
                tracing::warn!("runner has no move, abandoning game");
                break;
            };
            state = state.apply_move(0, mv);
            moves.push(mv);

            for agent in 1..state.agent_count() {
                if state.is_terminal() {
                    break 'game;
                }
                if let Some(mv) = self.config.chasers.choose(&state, agent, &mut rng) {
                    state = state.apply_move(agent, mv);
                }
            }
        }

        tracing::debug!(
            seed,
            evaluator = %self.config.evaluator,
            result = ?state.result(),
            score = state.points(),
            moves = moves.len(),
            "game finished"
        );

        Ok(GameOutcome {
            result: state.result(),
            score: state.points(),
            moves,
        })
    }

    fn create_player(&self, seed: u64) -> Result<Player> {
        let evaluator = ArenaEvaluator::new(self.config.evaluator, self.config.heuristics.clone());
        Ok(match self.config.controller {
            Controller::Search(config) => Player::Search(SearchAgent::new(config, evaluator)?),
            Controller::Reflex => Player::Reflex(ReflexAgent::with_seed(evaluator, seed)),
        })
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }
}
