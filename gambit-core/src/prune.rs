//! Alpha-beta bounds
//!
//! Each search call receives its own copy of the bounds and narrows it as
//! its children come back. Nothing is shared between siblings; the caller's
//! bounds are untouched when a call returns.

use crate::policy::NodeRole;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Best score the maximizer can already guarantee on this path
    pub alpha: f64,
    /// Best (lowest) score a minimizer above can already guarantee
    pub beta: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::OPEN
    }
}

impl Bounds {
    pub const OPEN: Bounds = Bounds {
        alpha: f64::NEG_INFINITY,
        beta: f64::INFINITY,
    };

    /// Check the node's running value after a child was folded in.
    ///
    /// Returns `true` when the remaining siblings can be skipped; otherwise
    /// narrows the bound owned by `role`. Chance nodes never cut.
    pub fn cutoff(&mut self, role: NodeRole, running: f64) -> bool {
        match role {
            NodeRole::Max => {
                if running > self.beta {
                    return true;
                }
                self.alpha = self.alpha.max(running);
                false
            }
            NodeRole::Min => {
                if running < self.alpha {
                    return true;
                }
                self.beta = self.beta.min(running);
                false
            }
            NodeRole::Chance => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_bounds_never_cut() {
        let mut bounds = Bounds::OPEN;
        assert!(!bounds.cutoff(NodeRole::Max, 1e12));
        assert_eq!(bounds.alpha, 1e12);

        let mut bounds = Bounds::OPEN;
        assert!(!bounds.cutoff(NodeRole::Min, -1e12));
        assert_eq!(bounds.beta, -1e12);
    }

    #[test]
    fn test_max_cuts_strictly_above_beta() {
        let mut bounds = Bounds { alpha: 0.0, beta: 5.0 };
        assert!(!bounds.cutoff(NodeRole::Max, 5.0));
        assert_eq!(bounds.alpha, 5.0);
        assert!(bounds.cutoff(NodeRole::Max, 5.5));
    }

    #[test]
    fn test_min_cuts_strictly_below_alpha() {
        let mut bounds = Bounds { alpha: 3.0, beta: 9.0 };
        assert!(!bounds.cutoff(NodeRole::Min, 3.0));
        assert_eq!(bounds.beta, 3.0);
        assert!(bounds.cutoff(NodeRole::Min, 2.0));
    }

    #[test]
    fn test_chance_leaves_bounds_alone() {
        let mut bounds = Bounds { alpha: 1.0, beta: 2.0 };
        assert!(!bounds.cutoff(NodeRole::Chance, -100.0));
        assert_eq!(bounds, Bounds { alpha: 1.0, beta: 2.0 });
    }
}
