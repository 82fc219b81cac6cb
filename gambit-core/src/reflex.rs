//! One-ply greedy baseline

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::{ContractViolation, Result};
use crate::eval::Evaluator;
use crate::state::{GameState, CONTROLLING_AGENT};

/// Scores every successor of the controlling agent and picks uniformly at
/// random among the best. The RNG is owned and seeded, so a run is
/// reproducible.
pub struct ReflexAgent<E> {
    evaluator: E,
    rng: ChaCha8Rng,
}

impl<E> ReflexAgent<E> {
    pub fn new(evaluator: E) -> Self {
        Self::with_seed(evaluator, 42)
    }

    pub fn with_seed(evaluator: E, seed: u64) -> Self {
        Self {
            evaluator,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Best-scoring action of the controlling agent, `None` when the state
    /// is terminal or offers no actions. A NaN successor score fails the
    /// decision, as it does in search.
    pub fn decide<S>(&mut self, state: &S) -> Result<Option<S::Action>>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        if state.is_terminal() {
            return Ok(None);
        }

        let actions = state.legal_actions(CONTROLLING_AGENT);
        let mut scores = Vec::with_capacity(actions.len());
        for action in &actions {
            let score = self
                .evaluator
                .evaluate(&state.successor(CONTROLLING_AGENT, action));
            if score.is_nan() {
                return Err(ContractViolation::NanEvaluation {
                    agent: CONTROLLING_AGENT,
                    ply: 0,
                }
                .into());
            }
            scores.push(score);
        }

        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_indices: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == best)
            .map(|(i, _)| i)
            .collect();

        let Some(&chosen) = best_indices.choose(&mut self.rng) else {
            return Ok(None);
        };
        Ok(actions.into_iter().nth(chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::state::{AgentIndex, GameResult};

    /// One agent picking a number; the score is the number picked.
    #[derive(Clone, Debug)]
    struct Pick {
        options: Vec<i32>,
        picked: Option<i32>,
    }

    impl GameState for Pick {
        type Action = usize;

        fn legal_actions(&self, _agent: AgentIndex) -> Vec<usize> {
            if self.picked.is_some() {
                Vec::new()
            } else {
                (0..self.options.len()).collect()
            }
        }

        fn successor(&self, _agent: AgentIndex, action: &usize) -> Self {
            Pick {
                options: self.options.clone(),
                picked: Some(self.options[*action]),
            }
        }

        fn result(&self) -> GameResult {
            if self.picked.is_some() {
                GameResult::Win
            } else {
                GameResult::Ongoing
            }
        }

        fn agent_count(&self) -> usize {
            1
        }

        fn score(&self) -> f64 {
            self.picked.unwrap_or(0) as f64
        }
    }

    fn pick(options: &[i32]) -> Pick {
        Pick {
            options: options.to_vec(),
            picked: None,
        }
    }

    #[test]
    fn test_picks_best_action() {
        let mut agent = ReflexAgent::new(crate::eval::ScoreEvaluator);
        assert_eq!(agent.decide(&pick(&[3, 9, 1])).unwrap(), Some(1));
    }

    #[test]
    fn test_ties_only_choose_best_actions() {
        let mut agent = ReflexAgent::with_seed(crate::eval::ScoreEvaluator, 7);
        for _ in 0..50 {
            let action = agent.decide(&pick(&[5, 1, 5, 2])).unwrap().unwrap();
            assert!(action == 0 || action == 2);
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let state = pick(&[4, 4, 4, 4]);
        let mut a = ReflexAgent::with_seed(crate::eval::ScoreEvaluator, 11);
        let mut b = ReflexAgent::with_seed(crate::eval::ScoreEvaluator, 11);
        let first: Vec<_> = (0..20).map(|_| a.decide(&state).unwrap()).collect();
        let second: Vec<_> = (0..20).map(|_| b.decide(&state).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_terminal_or_empty_gives_none() {
        let mut agent = ReflexAgent::new(crate::eval::ScoreEvaluator);
        let done = pick(&[1]).successor(0, &0);
        assert_eq!(agent.decide(&done).unwrap(), None);
        assert_eq!(agent.decide(&pick(&[])).unwrap(), None);
    }

    #[test]
    fn test_nan_successor_rejected() {
        let evaluator = |s: &Pick| if s.picked == Some(2) { f64::NAN } else { s.score() };
        let mut agent = ReflexAgent::new(evaluator);

        let err = agent.decide(&pick(&[1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            SearchError::Contract(ContractViolation::NanEvaluation { agent: 0, ply: 0 })
        );

        let all_nan = |_: &Pick| f64::NAN;
        assert!(ReflexAgent::new(all_nan).decide(&pick(&[1])).is_err());
    }
}
