// Core search value types
//
// Scores, alpha/beta bounds and the tagged result every search step returns.

/// A goal or heuristic value. Always within [`MIN_SCORE`, `MAX_SCORE`] once defined.
pub type Score = i32;

/// Lowest possible goal value
pub const MIN_SCORE: Score = 0;

/// Highest possible goal value
pub const MAX_SCORE: Score = 100;

/// One move per role, in the state machine's role order
pub type JointMove<M> = Vec<M>;

/// Returns true if the value is a legal score
pub fn is_valid_score(value: Score) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&value)
}

/// Alpha/beta window at one node of the search
///
/// `alpha` is the value the maximizer can already guarantee, `beta` the value
/// the minimizer can already guarantee. `alpha <= beta` holds on entry to
/// every search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBound {
    pub alpha: Score,
    pub beta: Score,
}

impl SearchBound {
    /// The window used at the root of every decision: [0, 100]
    pub fn full() -> Self {
        SearchBound {
            alpha: MIN_SCORE,
            beta: MAX_SCORE,
        }
    }

    /// Creates a window, returning None if `alpha > beta` or either end is out of range
    pub fn new(alpha: Score, beta: Score) -> Option<Self> {
        if is_valid_score(alpha) && is_valid_score(beta) && alpha <= beta {
            Some(SearchBound { alpha, beta })
        } else {
            None
        }
    }

    /// True once the window has closed and further siblings cannot matter
    pub fn is_closed(&self) -> bool {
        self.alpha >= self.beta
    }
}

impl Default for SearchBound {
    fn default() -> Self {
        SearchBound::full()
    }
}

/// Result of one Maximize/Minimize step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A definite value in [0, 100]
    Score(Score),
    /// The deadline was reached before a value could be computed
    Expired,
}

impl SearchOutcome {
    /// Returns the score, or None if the search expired
    pub fn score(self) -> Option<Score> {
        match self {
            SearchOutcome::Score(score) => Some(score),
            SearchOutcome::Expired => None,
        }
    }

    pub fn is_expired(self) -> bool {
        matches!(self, SearchOutcome::Expired)
    }
}
