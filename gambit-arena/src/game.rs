//! Arena state and rules
//!
//! Agent 0 is the runner; agents 1.. are the chasers in layout order.
//! The runner collects food while the chasers try to catch it.

use std::sync::Arc;

use gambit_core::{AgentIndex, GameResult, GameState};
use rustc_hash::FxHashSet;

use crate::board::{Direction, Layout, Maze, Pos};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Points lost per runner move
pub const TIME_PENALTY: i32 = 1;

/// Points per food pellet
pub const FOOD_POINTS: i32 = 10;

/// Bonus for clearing the last pellet
pub const WIN_POINTS: i32 = 500;

/// Penalty for being caught
pub const LOSE_POINTS: i32 = 500;

/// Points for catching a scared chaser
pub const CHASER_POINTS: i32 = 200;

/// Chaser moves a capsule keeps chasers scared
pub const SCARED_MOVES: u16 = 40;

// ============================================================================
// CORE TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chaser {
    pub pos: Pos,
    pub start: Pos,
    /// Remaining scared moves, 0 when dangerous
    pub scared: u16,
}

impl Chaser {
    pub fn is_scared(&self) -> bool {
        self.scared > 0
    }
}

/// Arena state (clone to mutate)
#[derive(Clone, Debug)]
pub struct ArenaState {
    maze: Arc<Maze>,
    runner: Pos,
    chasers: Vec<Chaser>,
    food: FxHashSet<Pos>,
    capsules: Vec<Pos>,
    score: i32,
    result: GameResult,
    /// Runner moves made so far
    pub moves: u32,
}

impl ArenaState {
    pub fn new(layout: &Layout) -> Self {
        let mut state = Self {
            maze: Arc::new(layout.maze.clone()),
            runner: layout.runner,
            chasers: layout
                .chasers
                .iter()
                .map(|&pos| Chaser {
                    pos,
                    start: pos,
                    scared: 0,
                })
                .collect(),
            food: layout.food.iter().copied().collect(),
            capsules: layout.capsules.clone(),
            score: 0,
            result: GameResult::Ongoing,
            moves: 0,
        };
        if state.food.is_empty() {
            state.result = GameResult::Win;
        }
        state
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn runner(&self) -> Pos {
        self.runner
    }

    pub fn chasers(&self) -> &[Chaser] {
        &self.chasers
    }

    pub fn food(&self) -> impl Iterator<Item = Pos> + '_ {
        self.food.iter().copied()
    }

    pub fn food_count(&self) -> usize {
        self.food.len()
    }

    pub fn has_food(&self, pos: Pos) -> bool {
        self.food.contains(&pos)
    }

    pub fn capsules(&self) -> &[Pos] {
        &self.capsules
    }

    pub fn points(&self) -> i32 {
        self.score
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Legal moves of `agent`. Empty once the game is over.
    pub fn legal_moves(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.result.is_over() {
            return Vec::new();
        }

        if agent == 0 {
            let mut moves = self.maze.open_moves(self.runner);
            moves.push(Direction::Stop);
            return moves;
        }

        match self.chasers.get(agent - 1) {
            Some(chaser) => {
                let moves = self.maze.open_moves(chaser.pos);
                if moves.is_empty() {
                    vec![Direction::Stop]
                } else {
                    moves
                }
            }
            None => Vec::new(),
        }
    }

    // ========================================================================
    // MOVE APPLICATION
    // ========================================================================

    /// State after `agent` moves in `dir`
    pub fn apply_move(&self, agent: AgentIndex, dir: Direction) -> ArenaState {
        let mut next = self.clone();
        if next.result.is_over() {
            return next;
        }

        if agent == 0 {
            next.move_runner(dir);
        } else if agent <= next.chasers.len() {
            next.move_chaser(agent - 1, dir);
        }
        next
    }

    fn move_runner(&mut self, dir: Direction) {
        let target = self.runner.step(dir);
        if !self.maze.is_wall(target) {
            self.runner = target;
        }
        self.moves += 1;
        self.score -= TIME_PENALTY;

        if self.food.remove(&self.runner) {
            self.score += FOOD_POINTS;
            if self.food.is_empty() {
                self.score += WIN_POINTS;
                self.result = GameResult::Win;
                return;
            }
        }

        if let Some(i) = self.capsules.iter().position(|&c| c == self.runner) {
            self.capsules.remove(i);
            for chaser in &mut self.chasers {
                chaser.scared = SCARED_MOVES;
            }
        }

        for i in 0..self.chasers.len() {
            self.resolve_contact(i);
        }
    }

    fn move_chaser(&mut self, index: usize, dir: Direction) {
        let chaser = &mut self.chasers[index];
        let target = chaser.pos.step(dir);
        if !self.maze.is_wall(target) {
            chaser.pos = target;
        }
        chaser.scared = chaser.scared.saturating_sub(1);
        self.resolve_contact(index);
    }

    /// Runner and chaser `index` on the same cell
    fn resolve_contact(&mut self, index: usize) {
        if self.result.is_over() || self.chasers[index].pos != self.runner {
            return;
        }
        let chaser = &mut self.chasers[index];
        if chaser.is_scared() {
            chaser.pos = chaser.start;
            chaser.scared = 0;
            self.score += CHASER_POINTS;
        } else {
            self.score -= LOSE_POINTS;
            self.result = GameResult::Lose;
        }
    }
}

impl GameState for ArenaState {
    type Action = Direction;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        self.legal_moves(agent)
    }

    fn successor(&self, agent: AgentIndex, action: &Direction) -> Self {
        self.apply_move(agent, *action)
    }

    fn result(&self) -> GameResult {
        self.result
    }

    fn agent_count(&self) -> usize {
        1 + self.chasers.len()
    }

    fn score(&self) -> f64 {
        self.score as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts;

    fn corridor() -> ArenaState {
        ArenaState::new(&layouts::builtin("corridor").unwrap())
    }

    #[test]
    fn test_initial_state() {
        let state = corridor();
        assert_eq!(state.runner(), Pos::new(3, 1));
        assert_eq!(state.chasers().len(), 1);
        assert_eq!(state.agent_count(), 2);
        assert_eq!(state.food_count(), 1);
        assert_eq!(GameState::result(&state), GameResult::Ongoing);
    }

    #[test]
    fn test_runner_moves_include_stop() {
        let state = corridor();
        assert_eq!(
            state.legal_moves(0),
            vec![Direction::East, Direction::West, Direction::Stop]
        );
        assert_eq!(state.legal_moves(1), vec![Direction::East]);
        assert!(state.legal_moves(2).is_empty());
    }

    #[test]
    fn test_eating_last_food_wins() {
        let state = corridor()
            .apply_move(0, Direction::East)
            .apply_move(1, Direction::East)
            .apply_move(0, Direction::East);
        assert_eq!(GameState::result(&state), GameResult::Win);
        assert_eq!(state.points(), -2 + FOOD_POINTS + WIN_POINTS);
        assert!(state.legal_moves(0).is_empty());
    }

    #[test]
    fn test_caught_by_chaser_loses() {
        let state = corridor()
            .apply_move(0, Direction::West)
            .apply_move(1, Direction::East);
        assert_eq!(GameState::result(&state), GameResult::Lose);
        assert_eq!(state.points(), -1 - LOSE_POINTS);
    }

    #[test]
    fn test_runner_walking_into_chaser_loses() {
        let state = corridor()
            .apply_move(0, Direction::West)
            .apply_move(1, Direction::Stop)
            .apply_move(0, Direction::West);
        assert_eq!(GameState::result(&state), GameResult::Lose);
    }

    #[test]
    fn test_capsule_scares_and_chaser_can_be_eaten() {
        let layout = crate::board::Layout::parse("cap", "%%%%%%%\n%.Po G%\n%%%%%%%\n").unwrap();
        let state = ArenaState::new(&layout).apply_move(0, Direction::East);
        assert!(state.chasers()[0].is_scared());
        assert!(state.capsules().is_empty());

        let state = state.apply_move(1, Direction::West);
        assert_eq!(state.chasers()[0].scared, SCARED_MOVES - 1);

        // Chaser now sits next to the runner; stepping onto it eats it.
        let state = state.apply_move(0, Direction::East);
        assert_eq!(GameState::result(&state), GameResult::Ongoing);
        assert_eq!(state.chasers()[0].pos, Pos::new(5, 1));
        assert_eq!(state.chasers()[0].scared, 0);
        assert_eq!(state.points(), -2 + CHASER_POINTS);
    }

    #[test]
    fn test_successor_leaves_parent_untouched() {
        let state = corridor();
        let child = state.successor(0, &Direction::East);
        assert_eq!(state.runner(), Pos::new(3, 1));
        assert_eq!(child.runner(), Pos::new(4, 1));
        assert_eq!(state.moves, 0);
        assert_eq!(child.moves, 1);
    }
}
