//! Simulation adapter
//!
//! The search engine never looks inside a simulation. Everything it needs
//! goes through [`GameState`]: legal actions per agent, successor
//! generation, terminal status, the number of agents and a raw score.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Index of an agent. Agent 0 is the controlling (maximizing) agent.
pub type AgentIndex = usize;

/// The controlling agent
pub const CONTROLLING_AGENT: AgentIndex = 0;

/// Terminal status from the controlling agent's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Win,
    Lose,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }
}

/// A turn-ordered simulation state the engine can search
///
/// Implementations must be pure: `successor` returns a new state and never
/// alters `self`, so sibling branches explored after backtracking see the
/// same ancestor.
pub trait GameState: Sized {
    /// An opaque move token
    type Action: Clone + PartialEq + Debug;

    /// Legal actions for `agent`, in a fixed order. The order is the
    /// tie-break between equally scored actions.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// State after `agent` plays `action`
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;

    fn result(&self) -> GameResult;

    /// Number of agents taking turns, controlling agent included
    fn agent_count(&self) -> usize;

    /// Raw score of the state, higher is better for agent 0
    fn score(&self) -> f64;

    fn is_terminal(&self) -> bool {
        self.result().is_over()
    }
}
