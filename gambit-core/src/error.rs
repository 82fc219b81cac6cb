//! Search errors

use thiserror::Error;

/// A broken promise by the simulation behind the [`GameState`](crate::GameState) adapter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractViolation {
    #[error("agent {agent} has no legal actions in a non-terminal state at ply {ply}")]
    NoLegalActions { agent: usize, ply: u32 },

    #[error("agent count changed during search: expected {expected}, found {found}")]
    AgentCountChanged { expected: usize, found: usize },

    #[error("leaf evaluation returned NaN (agent {agent}, ply {ply})")]
    NanEvaluation { agent: usize, ply: u32 },
}

/// Errors that stop a decision
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("adapter contract violation: {0}")]
    Contract(#[from] ContractViolation),
}

impl SearchError {
    pub fn is_config_error(&self) -> bool {
        matches!(self, SearchError::InvalidConfig(_))
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, SearchError::Contract(_))
    }
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::from(ContractViolation::NoLegalActions { agent: 2, ply: 1 });
        assert_eq!(
            err.to_string(),
            "adapter contract violation: agent 2 has no legal actions in a non-terminal state at ply 1"
        );

        let err = SearchError::InvalidConfig("depth 99 exceeds maximum 32".to_string());
        assert_eq!(
            err.to_string(),
            "invalid search configuration: depth 99 exceeds maximum 32"
        );
    }

    #[test]
    fn test_error_classification() {
        let config = SearchError::InvalidConfig("zero agents".to_string());
        assert!(config.is_config_error());
        assert!(!config.is_contract_violation());

        let contract = SearchError::from(ContractViolation::AgentCountChanged {
            expected: 3,
            found: 2,
        });
        assert!(contract.is_contract_violation());
        assert!(!contract.is_config_error());
    }
}
