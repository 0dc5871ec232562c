// Alpha-beta search over joint moves
//
// Maximize explores the searching role's moves; Minimize explores every joint
// move consistent with a fixed own move, treating all other roles as one
// coordinated opponent. Both poll the deadline on entry and return
// `SearchOutcome::Expired` untouched up the stack once it has passed.

use log::trace;

use crate::config::SearchConfig;
use crate::deadline::Deadline;
use crate::error::{Error, Result};
use crate::heuristic::MatchContext;
use crate::state_machine::StateMachine;
use crate::types::{is_valid_score, Score, SearchBound, SearchOutcome};

/// Counters for one decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Maximize and Minimize steps that started work
    pub nodes: u64,
    /// Terminal states scored by their goal value
    pub terminal_evaluations: u64,
    /// Non-terminal states scored at the depth limit
    pub heuristic_evaluations: u64,
    /// Alpha and beta cutoffs
    pub cutoffs: u64,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.terminal_evaluations += other.terminal_evaluations;
        self.heuristic_evaluations += other.heuristic_evaluations;
        self.cutoffs += other.cutoffs;
    }
}

/// Search context for a single role and a single deadline
///
/// Borrows the state machine and the match context for the duration of one
/// decision.
pub struct Searcher<'a, M: StateMachine> {
    machine: &'a M,
    role: &'a M::Role,
    deadline: Deadline,
    config: &'a SearchConfig,
    context: &'a mut MatchContext,
    stats: SearchStats,
}

impl<'a, M: StateMachine> Searcher<'a, M> {
    pub fn new(
        machine: &'a M,
        role: &'a M::Role,
        deadline: Deadline,
        config: &'a SearchConfig,
        context: &'a mut MatchContext,
    ) -> Self {
        Searcher {
            machine,
            role,
            deadline,
            config,
            context,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The searching role's turn.
    ///
    /// Returns the goal value at terminal states, the heuristic value once
    /// `depth` reaches the configured limit, and otherwise the best value over
    /// the role's moves within `bound` (fail-hard: `beta` on a cutoff).
    pub fn maximize(
        &mut self,
        state: &M::State,
        bound: SearchBound,
        depth: u32,
    ) -> Result<SearchOutcome> {
        if self.deadline.is_expired() {
            return Ok(SearchOutcome::Expired);
        }
        debug_assert!(bound.alpha <= bound.beta);
        self.stats.nodes += 1;

        if self.machine.is_terminal(state) {
            self.stats.terminal_evaluations += 1;
            let goal = checked_goal(self.machine, state, self.role)?;
            return Ok(SearchOutcome::Score(goal));
        }

        if self.config.is_depth_cutoff(depth) {
            self.stats.heuristic_evaluations += 1;
            let estimate =
                self.config
                    .heuristic
                    .evaluate(self.machine, state, self.role, self.context)?;
            return Ok(SearchOutcome::Score(estimate));
        }

        let moves = self.machine.legal_moves(state, self.role)?;
        if moves.is_empty() {
            return Err(no_legal_moves(self.role));
        }
        self.context.observe(moves.len());

        let mut alpha = bound.alpha;
        for own_move in &moves {
            let child = SearchBound {
                alpha,
                beta: bound.beta,
            };
            let score = match self.minimize(own_move, state, child, depth + 1)? {
                SearchOutcome::Score(score) => score,
                SearchOutcome::Expired => return Ok(SearchOutcome::Expired),
            };

            alpha = alpha.max(score);
            if alpha >= bound.beta {
                self.stats.cutoffs += 1;
                trace!("Beta cutoff at depth {} ({} >= {})", depth, alpha, bound.beta);
                return Ok(SearchOutcome::Score(bound.beta));
            }
        }

        Ok(SearchOutcome::Score(alpha))
    }

    /// Every other role's turn, with the searching role committed to `own_move`.
    ///
    /// Returns the lowest value over all consistent joint moves within `bound`
    /// (fail-hard: `alpha` on a cutoff).
    pub fn minimize(
        &mut self,
        own_move: &M::Move,
        state: &M::State,
        bound: SearchBound,
        depth: u32,
    ) -> Result<SearchOutcome> {
        if self.deadline.is_expired() {
            return Ok(SearchOutcome::Expired);
        }
        debug_assert!(bound.alpha <= bound.beta);
        self.stats.nodes += 1;

        let joint_moves = self
            .machine
            .legal_joint_moves(state, self.role, own_move)?;
        if joint_moves.is_empty() {
            return Err(no_legal_moves(self.role));
        }
        self.context.observe(joint_moves.len());

        let mut beta = bound.beta;
        for joint_move in &joint_moves {
            let next = self.machine.next_state(state, joint_move)?;
            let child = SearchBound {
                alpha: bound.alpha,
                beta,
            };
            let score = match self.maximize(&next, child, depth + 1)? {
                SearchOutcome::Score(score) => score,
                SearchOutcome::Expired => return Ok(SearchOutcome::Expired),
            };

            beta = beta.min(score);
            if beta <= bound.alpha {
                self.stats.cutoffs += 1;
                trace!("Alpha cutoff at depth {} ({} <= {})", depth, beta, bound.alpha);
                return Ok(SearchOutcome::Score(bound.alpha));
            }
        }

        Ok(SearchOutcome::Score(beta))
    }
}

/// Reads a goal value and rejects anything outside [0, 100]
pub fn checked_goal<M: StateMachine>(
    machine: &M,
    state: &M::State,
    role: &M::Role,
) -> Result<Score> {
    let value = machine.goal(state, role)?;
    if is_valid_score(value) {
        Ok(value)
    } else {
        Err(Error::GoalOutOfRange {
            role: format!("{:?}", role),
            value,
        })
    }
}

pub(crate) fn no_legal_moves<R: std::fmt::Debug>(role: &R) -> Error {
    Error::NoLegalMoves {
        role: format!("{:?}", role),
    }
}
