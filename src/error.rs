// Error types for the player

use thiserror::Error;

use crate::types::Score;

/// Failures reported by the game state machine
///
/// These indicate the search reached a state the game description does not
/// define, and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    #[error("move definition error: {0}")]
    MoveDefinition(String),

    #[error("transition definition error: {0}")]
    TransitionDefinition(String),

    #[error("goal definition error: {0}")]
    GoalDefinition(String),
}

/// Main error type for the player
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    StateMachine(#[from] StateMachineError),

    #[error("no legal moves for role {role} in a non-terminal state")]
    NoLegalMoves { role: String },

    #[error("goal value {value} for role {role} is outside [0, 100]")]
    GoalOutOfRange { role: String, value: Score },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for the player
pub type Result<T> = std::result::Result<T, Error>;
