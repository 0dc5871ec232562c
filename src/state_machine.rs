// Game state oracle
//
// The search only ever sees the game through this trait. Implementations are
// expected to be deterministic and side-effect free.

use std::fmt::Debug;

use crate::error::StateMachineError;
use crate::types::{JointMove, Score};

/// Read-only view of a game's rules
///
/// ## Implementation Notes
///
/// - `legal_moves` must be non-empty for every role in a non-terminal state
/// - `legal_joint_moves` orders each joint move by `roles()`
/// - `goal` must be defined for every role in a terminal state
pub trait StateMachine {
    type State;
    type Role: Clone + PartialEq + Debug;
    type Move: Clone + PartialEq + Debug;

    /// All roles of the match, in joint-move order
    fn roles(&self) -> Vec<Self::Role>;

    /// Legal moves for `role`, in a stable order
    fn legal_moves(
        &self,
        state: &Self::State,
        role: &Self::Role,
    ) -> Result<Vec<Self::Move>, StateMachineError>;

    /// Successor of `state` when every role plays its slot of `joint_move`
    fn next_state(
        &self,
        state: &Self::State,
        joint_move: &JointMove<Self::Move>,
    ) -> Result<Self::State, StateMachineError>;

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Goal value for `role`, in [0, 100]
    fn goal(&self, state: &Self::State, role: &Self::Role) -> Result<Score, StateMachineError>;

    /// Every joint move in which `role` plays `fixed_move`.
    ///
    /// Default implementation builds the cartesian product of the other
    /// roles' legal moves in `roles()` order, so the first role varies slowest.
    fn legal_joint_moves(
        &self,
        state: &Self::State,
        role: &Self::Role,
        fixed_move: &Self::Move,
    ) -> Result<Vec<JointMove<Self::Move>>, StateMachineError> {
        let mut joint_moves: Vec<JointMove<Self::Move>> = vec![Vec::new()];

        for other in self.roles() {
            let options = if &other == role {
                vec![fixed_move.clone()]
            } else {
                self.legal_moves(state, &other)?
            };

            let mut extended = Vec::with_capacity(joint_moves.len() * options.len());
            for partial in &joint_moves {
                for option in &options {
                    let mut next = partial.clone();
                    next.push(option.clone());
                    extended.push(next);
                }
            }
            joint_moves = extended;
        }

        Ok(joint_moves)
    }
}
