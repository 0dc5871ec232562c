// Cutoff evaluation
//
// Scores a non-terminal state once the depth limit is reached. The mobility
// and focus strategies are normalized against the largest move count seen
// so far in the match, which lives in `MatchContext`.

use serde::Deserialize;

use crate::error::Result;
use crate::search::checked_goal;
use crate::state_machine::StateMachine;
use crate::types::Score;

/// Ceiling for mobility-based estimates, below a certain win
pub const MOBILITY_CEILING: Score = 80;

/// Per-match state shared by every decision of one match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchContext {
    max_move_count: usize,
}

impl MatchContext {
    pub fn new() -> Self {
        MatchContext::default()
    }

    /// Largest legal-move or joint-move count observed this match
    pub fn max_move_count(&self) -> usize {
        self.max_move_count
    }

    /// Records an enumeration of `count` moves; the maximum never decreases
    pub fn observe(&mut self, count: usize) {
        if count > self.max_move_count {
            self.max_move_count = count;
        }
    }

    /// Forgets everything observed; called at match boundaries
    pub fn reset(&mut self) {
        self.max_move_count = 0;
    }
}

/// Heuristic strategy, chosen once per match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// The role's current goal value
    #[default]
    GoalProximity,
    /// More own moves is better
    Mobility,
    /// Fewer own moves is better
    Focus,
}

impl Heuristic {
    /// Evaluates a non-terminal `state` for `role`
    pub fn evaluate<M: StateMachine>(
        &self,
        machine: &M,
        state: &M::State,
        role: &M::Role,
        context: &mut MatchContext,
    ) -> Result<Score> {
        match self {
            Heuristic::GoalProximity => checked_goal(machine, state, role),
            Heuristic::Mobility | Heuristic::Focus => {
                let count = machine.legal_moves(state, role)?.len();
                context.observe(count);
                let max = context.max_move_count();
                Ok(if *self == Heuristic::Mobility {
                    mobility_score(count, max)
                } else {
                    focus_score(count, max)
                })
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Heuristic::GoalProximity => "goal_proximity",
            Heuristic::Mobility => "mobility",
            Heuristic::Focus => "focus",
        }
    }
}

/// `80 * count / max`, or 0 before any move count has been observed
pub fn mobility_score(count: usize, max: usize) -> Score {
    if max == 0 {
        return 0;
    }
    let count = count.min(max);
    (MOBILITY_CEILING as usize * count / max) as Score
}

/// `80 * (1 - count / max)`, or 0 before any move count has been observed
pub fn focus_score(count: usize, max: usize) -> Score {
    if max == 0 {
        return 0;
    }
    let count = count.min(max);
    (MOBILITY_CEILING as usize * (max - count) / max) as Score
}
