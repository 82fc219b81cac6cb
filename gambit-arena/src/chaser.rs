//! Chaser controllers for real play
//!
//! During search the engine models chasers itself (adversarial or uniform).
//! These controllers decide what the chasers actually do in a game.

use std::fmt;
use std::str::FromStr;

use gambit_core::AgentIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::Direction;
use crate::game::ArenaState;

/// Probability a directional chaser takes one of its best moves
pub const ATTACK_PROBABILITY: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChaserBehavior {
    /// Uniformly random legal move
    Random,
    /// Usually closes in on the runner, or flees while scared
    Directional,
}

impl Default for ChaserBehavior {
    fn default() -> Self {
        ChaserBehavior::Random
    }
}

impl ChaserBehavior {
    /// Move for chaser `agent`; `None` when it has no legal move
    pub fn choose(self, state: &ArenaState, agent: AgentIndex, rng: &mut ChaCha8Rng) -> Option<Direction> {
        let moves = state.legal_moves(agent);
        match self {
            ChaserBehavior::Random => moves.choose(rng).copied(),
            ChaserBehavior::Directional => {
                let chaser = state.chasers().get(agent.checked_sub(1)?)?;
                let runner = state.runner();
                let distances: Vec<u32> = moves
                    .iter()
                    .map(|&d| chaser.pos.step(d).distance_to(runner))
                    .collect();
                let target = if chaser.is_scared() {
                    distances.iter().copied().max()?
                } else {
                    distances.iter().copied().min()?
                };
                let best: Vec<Direction> = moves
                    .iter()
                    .zip(&distances)
                    .filter(|&(_, &d)| d == target)
                    .map(|(&m, _)| m)
                    .collect();

                if rng.gen_bool(ATTACK_PROBABILITY) {
                    best.choose(rng).copied()
                } else {
                    moves.choose(rng).copied()
                }
            }
        }
    }
}

impl fmt::Display for ChaserBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChaserBehavior::Random => f.write_str("random"),
            ChaserBehavior::Directional => f.write_str("directional"),
        }
    }
}

impl FromStr for ChaserBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(ChaserBehavior::Random),
            "directional" => Ok(ChaserBehavior::Directional),
            other => Err(format!(
                "unknown chaser behavior '{}' (expected random or directional)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;

    fn open_room() -> ArenaState {
        ArenaState::new(&Layout::parse("room", "%%%%%%%\n%P   .%\n%    G%\n%%%%%%%\n").unwrap())
    }

    #[test]
    fn test_random_picks_legal_moves() {
        let state = open_room();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let legal = state.legal_moves(1);
        for _ in 0..50 {
            let mv = ChaserBehavior::Random.choose(&state, 1, &mut rng).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_directional_mostly_closes_in() {
        let state = open_room();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut closer = 0;
        for _ in 0..200 {
            let mv = ChaserBehavior::Directional.choose(&state, 1, &mut rng).unwrap();
            if mv == Direction::North || mv == Direction::West {
                closer += 1;
            }
        }
        // Best moves are taken with probability 0.8 plus their share of the rest.
        assert!(closer > 140, "only {closer} of 200 moves closed in");
    }

    #[test]
    fn test_unknown_agent_has_no_move() {
        let state = open_room();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(ChaserBehavior::Directional.choose(&state, 5, &mut rng), None);
        assert_eq!(ChaserBehavior::Random.choose(&state, 5, &mut rng), None);
    }

    #[test]
    fn test_parse_behavior() {
        assert_eq!("Directional".parse::<ChaserBehavior>().unwrap(), ChaserBehavior::Directional);
        assert!("smart".parse::<ChaserBehavior>().is_err());
    }
}
