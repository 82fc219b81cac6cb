//! GAMBIT Core - Multi-agent adversarial search
//!
//! This crate provides the search engine behind GAMBIT agents:
//! - Simulation adapter trait and leaf evaluators
//! - Turn order across any number of agents
//! - Depth-limited search with Minimax, Alpha-Beta and Expectimax policies
//! - A seeded one-ply reflex baseline

pub mod state;
pub mod eval;
pub mod turn;
pub mod policy;
pub mod prune;
pub mod search;
pub mod agent;
pub mod reflex;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use state::{AgentIndex, GameResult, GameState, CONTROLLING_AGENT};
pub use eval::{Evaluator, ScoreEvaluator};
pub use turn::TurnOrder;
pub use policy::{NodeRole, Policy};
pub use prune::Bounds;
pub use search::{Search, SearchOutcome, SearchStats};
pub use agent::{Decision, SearchAgent};
pub use reflex::ReflexAgent;
pub use config::{EmptyActions, SearchConfig, MAX_DEPTH};
pub use error::{ContractViolation, Result, SearchError};
