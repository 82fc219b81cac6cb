//! Search-based decision maker

use serde::Serialize;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::eval::{Evaluator, ScoreEvaluator};
use crate::search::{Search, SearchStats};
use crate::state::GameState;

/// Result of one decision
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Decision<A> {
    /// Chosen action; `None` when the root itself is a leaf
    pub action: Option<A>,
    /// Backed-up value of the root
    pub score: f64,
    pub stats: SearchStats,
}

/// Agent 0 choosing its moves by depth-limited search
#[derive(Clone, Debug)]
pub struct SearchAgent<E = ScoreEvaluator> {
    config: SearchConfig,
    evaluator: E,
}

impl SearchAgent<ScoreEvaluator> {
    /// Agent scoring leaves with the simulation's own score
    pub fn with_score(config: SearchConfig) -> Result<Self> {
        Self::new(config, ScoreEvaluator)
    }
}

impl<E> SearchAgent<E> {
    pub fn new(config: SearchConfig, evaluator: E) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, evaluator })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Best action for the controlling agent in `state`
    pub fn decide<S>(&self, state: &S) -> Result<Option<S::Action>>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        Ok(self.analyze(state)?.action)
    }

    /// Search `state` and report the action, root value and counters
    pub fn analyze<S>(&self, state: &S) -> Result<Decision<S::Action>>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let mut search = Search::new(&self.config, &self.evaluator, state)?;
        let outcome = search.run(state)?;
        let stats = search.stats();

        tracing::debug!(
            policy = %self.config.policy,
            depth = self.config.depth,
            score = outcome.score,
            nodes = stats.nodes,
            leaves = stats.leaves,
            cutoffs = stats.cutoffs,
            "search finished"
        );

        Ok(Decision {
            action: outcome.action,
            score: outcome.score,
            stats,
        })
    }
}
