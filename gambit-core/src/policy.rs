//! Combination policies
//!
//! A policy decides how a node folds its children's scores. The controlling
//! agent always maximizes; the other agents minimize under Minimax and
//! Alpha-Beta, or act uniformly at random under Expectimax.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::state::{AgentIndex, CONTROLLING_AGENT};

/// Search variant chosen by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Minimax
    }
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Minimax, Policy::AlphaBeta, Policy::Expectimax];

    /// How a node owned by `agent` combines its children
    pub fn role(self, agent: AgentIndex) -> NodeRole {
        if agent == CONTROLLING_AGENT {
            return NodeRole::Max;
        }
        match self {
            Policy::Minimax | Policy::AlphaBeta => NodeRole::Min,
            Policy::Expectimax => NodeRole::Chance,
        }
    }

    /// Whether alpha-beta bounds are threaded through the search
    pub fn prunes(self) -> bool {
        self == Policy::AlphaBeta
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::Minimax => "minimax",
            Policy::AlphaBeta => "alpha-beta",
            Policy::Expectimax => "expectimax",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Policy::Minimax),
            "alpha-beta" | "alphabeta" | "alpha_beta" => Ok(Policy::AlphaBeta),
            "expectimax" => Ok(Policy::Expectimax),
            other => Err(format!(
                "unknown policy '{}' (expected minimax, alpha-beta or expectimax)",
                other
            )),
        }
    }
}

/// Fold rule of a single node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    /// Maximize and remember the argmax action
    Max,
    /// Minimize and remember the argmin action
    Min,
    /// Uniform expectation over all actions, no action chosen
    Chance,
}

/// Running value of one node while its children are folded in
#[derive(Clone, Debug)]
pub(crate) struct Accumulator<A> {
    role: NodeRole,
    value: f64,
    action: Option<A>,
    weight: f64,
}

impl<A> Accumulator<A> {
    /// `branching` is the number of legal actions at the node, used as the
    /// uniform weight of chance nodes.
    pub(crate) fn new(role: NodeRole, branching: usize) -> Self {
        let value = match role {
            NodeRole::Max => f64::NEG_INFINITY,
            NodeRole::Min => f64::INFINITY,
            NodeRole::Chance => 0.0,
        };
        Self {
            role,
            value,
            action: None,
            weight: 1.0 / branching.max(1) as f64,
        }
    }

    /// Fold one child. Ties keep the earliest action.
    pub(crate) fn fold(&mut self, score: f64, action: A) {
        match self.role {
            NodeRole::Max => {
                if self.action.is_none() || score > self.value {
                    self.value = score;
                    self.action = Some(action);
                }
            }
            NodeRole::Min => {
                if self.action.is_none() || score < self.value {
                    self.value = score;
                    self.action = Some(action);
                }
            }
            NodeRole::Chance => self.value += self.weight * score,
        }
    }

    pub(crate) fn value(&self) -> f64 {
        self.value
    }

    pub(crate) fn role(&self) -> NodeRole {
        self.role
    }

    pub(crate) fn finish(self) -> (f64, Option<A>) {
        (self.value, self.action)
    }
}
