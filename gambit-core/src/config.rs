//! Search configuration

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::policy::Policy;

/// Deepest search accepted, in rounds
pub const MAX_DEPTH: u32 = 32;

/// What to do when a non-terminal node inside the depth limit has no legal actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyActions {
    /// Fail the decision with a contract violation
    Reject,
    /// Score the node with the leaf evaluator, as if it were terminal
    Evaluate,
}

impl Default for EmptyActions {
    fn default() -> Self {
        EmptyActions::Reject
    }
}

impl fmt::Display for EmptyActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyActions::Reject => f.write_str("reject"),
            EmptyActions::Evaluate => f.write_str("evaluate"),
        }
    }
}

impl FromStr for EmptyActions {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(EmptyActions::Reject),
            "evaluate" => Ok(EmptyActions::Evaluate),
            other => Err(format!(
                "unknown empty-action policy '{}' (expected reject or evaluate)",
                other
            )),
        }
    }
}

/// Search configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Combination policy
    pub policy: Policy,
    /// Depth limit in rounds (0 = evaluate the root)
    pub depth: u32,
    /// Handling of nodes without legal actions
    pub empty_actions: EmptyActions,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Minimax,
            depth: 2,
            empty_actions: EmptyActions::Reject,
        }
    }
}

impl SearchConfig {
    pub fn new(policy: Policy, depth: u32) -> Self {
        Self {
            policy,
            depth,
            ..Default::default()
        }
    }

    /// Create config for plain minimax at given depth
    pub fn minimax(depth: u32) -> Self {
        Self::new(Policy::Minimax, depth)
    }

    /// Create config for alpha-beta at given depth
    pub fn alpha_beta(depth: u32) -> Self {
        Self::new(Policy::AlphaBeta, depth)
    }

    /// Create config for expectimax at given depth
    pub fn expectimax(depth: u32) -> Self {
        Self::new(Policy::Expectimax, depth)
    }

    pub fn with_empty_actions(mut self, empty_actions: EmptyActions) -> Self {
        self.empty_actions = empty_actions;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth > MAX_DEPTH {
            return Err(SearchError::InvalidConfig(format!(
                "depth {} exceeds maximum {}",
                self.depth, MAX_DEPTH
            )));
        }
        Ok(())
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search config: {}", path.display()))?;
        let config: SearchConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse search config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}
