// Library exports for the alpha-beta player
// The search core, its configuration and the observer plumbing

pub mod config;
pub mod deadline;
pub mod debug_logger;
pub mod error;
pub mod gamer;
pub mod heuristic;
pub mod observer;
pub mod search;
pub mod state_machine;
pub mod types;

pub use config::Config;
pub use deadline::Deadline;
pub use error::{Error, Result, StateMachineError};
pub use gamer::{choose_move, Decision, Gamer};
pub use heuristic::{Heuristic, MatchContext};
pub use search::{SearchStats, Searcher};
pub use state_machine::StateMachine;
pub use types::{JointMove, Score, SearchBound, SearchOutcome};
