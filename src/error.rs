//! Error types for the pacsearch crate

use thiserror::Error;

use crate::game::Action;

/// Main error type for the pacsearch crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown search strategy '{input}'. Expected one of: {expected}")]
    ParseStrategy { input: String, expected: String },

    #[error("unknown evaluation function '{input}'. Expected one of: {expected}")]
    ParseEvaluator { input: String, expected: String },

    #[error("search depth must be at least 1 full round, got {depth}")]
    ZeroSearchDepth { depth: usize },

    #[error("no legal actions available for agent {agent}")]
    NoLegalActions { agent: usize },

    #[error("illegal action {action} for agent {agent} in state '{context}'")]
    IllegalAction {
        action: Action,
        agent: usize,
        context: String,
    },

    #[error("scenario declares duplicate node id '{id}'")]
    DuplicateScenarioNode { id: String },

    #[error("scenario node '{id}' references unknown successor '{target}'")]
    UnknownScenarioNode { id: String, target: String },

    #[error("scenario root '{root}' is not a defined node")]
    UnknownScenarioRoot { root: String },

    #[error("scenario must declare at least one agent, got {num_agents}")]
    NoAgents { num_agents: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
