//! GAMBIT Arena - Pursuit maze game driven by the GAMBIT search engine
//!
//! A runner (agent 0) collects food while chasers hunt it down:
//! - Maze geometry and ASCII layouts
//! - Game rules implementing the core `GameState` contract
//! - Heuristic leaf evaluation
//! - Chaser controllers and a seeded game runner

pub mod board;
pub mod layouts;
pub mod game;
pub mod eval;
pub mod chaser;
pub mod runner;
pub mod error;

pub use board::{Direction, Layout, Maze, Pos, MAX_SIDE};
pub use game::{ArenaState, Chaser};
pub use eval::{evaluate, ArenaEvaluator, EvaluatorKind, HeuristicEvaluator, Heuristics, WIN_VALUE};
pub use chaser::ChaserBehavior;
pub use runner::{Controller, GameOutcome, GameRunner, RunnerConfig};
pub use error::LayoutError;
