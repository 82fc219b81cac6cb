//! Depth-limited game-tree search
//!
//! One recursive driver serves every policy. The [`Policy`] picks the fold
//! rule of each node from the agent that owns it, the [`TurnOrder`] moves
//! the (agent, ply) pair forward, and alpha-beta bounds are threaded
//! through only when the policy prunes.

use serde::{Deserialize, Serialize};

use crate::config::{EmptyActions, SearchConfig};
use crate::error::{ContractViolation, Result};
use crate::eval::Evaluator;
use crate::policy::{Accumulator, Policy};
use crate::prune::Bounds;
use crate::state::{AgentIndex, GameState};
use crate::turn::TurnOrder;

// ============================================================================
// RESULTS
// ============================================================================

/// Score of a node and the action chosen there
///
/// `action` is `None` at leaves and at chance nodes, which make no decision.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<A> {
    pub score: f64,
    pub action: Option<A>,
}

impl<A> SearchOutcome<A> {
    pub fn leaf(score: f64) -> Self {
        Self {
            score,
            action: None,
        }
    }
}

/// Counters collected during one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Every node entered, leaves included
    pub nodes: u64,
    /// Nodes scored by the evaluator
    pub leaves: u64,
    /// Nodes that stopped early on an alpha-beta cutoff
    pub cutoffs: u64,
    /// Deepest ply reached
    pub max_ply: u32,
}

// ============================================================================
// SEARCH DRIVER
// ============================================================================

/// State of one search call tree
pub struct Search<'a, S: GameState, E: Evaluator<S>> {
    evaluator: &'a E,
    policy: Policy,
    depth_limit: u32,
    empty_actions: EmptyActions,
    turns: TurnOrder,
    stats: SearchStats,
    _state: std::marker::PhantomData<fn(&S)>,
}

impl<'a, S: GameState, E: Evaluator<S>> Search<'a, S, E> {
    /// Prepare a search from `root`. Fails on an invalid configuration or a
    /// root reporting zero agents.
    pub fn new(config: &SearchConfig, evaluator: &'a E, root: &S) -> Result<Self> {
        config.validate()?;
        let turns = TurnOrder::new(root.agent_count())?;
        Ok(Self {
            evaluator,
            policy: config.policy,
            depth_limit: config.depth,
            empty_actions: config.empty_actions,
            turns,
            stats: SearchStats::default(),
            _state: std::marker::PhantomData,
        })
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search from `root` with the controlling agent to move at ply 0
    pub fn run(&mut self, root: &S) -> Result<SearchOutcome<S::Action>> {
        self.search(root, 0, 0, Bounds::OPEN)
    }

    /// Value of `state` with `agent` to move at `ply`
    pub fn search(
        &mut self,
        state: &S,
        agent: AgentIndex,
        ply: u32,
        bounds: Bounds,
    ) -> Result<SearchOutcome<S::Action>> {
        self.stats.nodes += 1;
        self.stats.max_ply = self.stats.max_ply.max(ply);

        if state.is_terminal() || ply >= self.depth_limit {
            return self.leaf(state, agent, ply);
        }

        let found = state.agent_count();
        if found != self.turns.agents() {
            return Err(ContractViolation::AgentCountChanged {
                expected: self.turns.agents(),
                found,
            }
            .into());
        }

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return match self.empty_actions {
                EmptyActions::Reject => {
                    Err(ContractViolation::NoLegalActions { agent, ply }.into())
                }
                EmptyActions::Evaluate => self.leaf(state, agent, ply),
            };
        }

        let (next_agent, next_ply) = self.turns.next(agent, ply);
        let mut acc = Accumulator::new(self.policy.role(agent), actions.len());
        let mut bounds = bounds;

        for action in actions {
            let child = state.successor(agent, &action);
            let outcome = self.search(&child, next_agent, next_ply, bounds)?;
            acc.fold(outcome.score, action);

            if self.policy.prunes() && bounds.cutoff(acc.role(), acc.value()) {
                self.stats.cutoffs += 1;
                tracing::trace!(agent, ply, value = acc.value(), "alpha-beta cutoff");
                break;
            }
        }

        let (score, action) = acc.finish();
        Ok(SearchOutcome { score, action })
    }

    fn leaf(&mut self, state: &S, agent: AgentIndex, ply: u32) -> Result<SearchOutcome<S::Action>> {
        self.stats.leaves += 1;
        let score = self.evaluator.evaluate(state);
        if score.is_nan() {
            return Err(ContractViolation::NanEvaluation { agent, ply }.into());
        }
        Ok(SearchOutcome::leaf(score))
    }
}
