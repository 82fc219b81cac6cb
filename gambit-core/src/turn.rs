//! Turn order
//!
//! A round is one move by agent 0 followed by one move from each other
//! agent in index order. The ply counter advances exactly when the agent
//! index wraps back to 0.

use crate::error::{Result, SearchError};
use crate::state::AgentIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnOrder {
    agents: usize,
}

impl TurnOrder {
    pub fn new(agents: usize) -> Result<Self> {
        if agents == 0 {
            return Err(SearchError::InvalidConfig(
                "simulation reports zero agents".to_string(),
            ));
        }
        Ok(Self { agents })
    }

    pub fn agents(&self) -> usize {
        self.agents
    }

    /// Agent and ply that follow `agent` moving at `ply`
    pub fn next(&self, agent: AgentIndex, ply: u32) -> (AgentIndex, u32) {
        if agent + 1 >= self.agents {
            (0, ply + 1)
        } else {
            (agent + 1, ply)
        }
    }
}
