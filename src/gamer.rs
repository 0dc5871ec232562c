// Move selection for one role
//
// `choose_move` runs one top-level decision. `Gamer` wraps it with the
// per-match lifecycle: configuration, match context and observers.

use log::{debug, info, warn};
use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::config::{Config, SearchConfig};
use crate::deadline::Deadline;
use crate::debug_logger::JsonlEventLogger;
use crate::error::Result;
use crate::heuristic::MatchContext;
use crate::observer::{Observer, SelectedMoveEvent};
use crate::search::{no_legal_moves, SearchStats, Searcher};
use crate::state_machine::StateMachine;
use crate::types::{Score, SearchBound, SearchOutcome, MAX_SCORE};

/// Result of one top-level decision
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<M> {
    pub selection: M,
    /// Every legal root move, in oracle order
    pub candidates: Vec<M>,
    /// Score of `selection`, None if no candidate finished before the deadline
    pub score: Option<Score>,
    /// True if the deadline cut the enumeration short
    pub expired: bool,
    pub elapsed: Duration,
    pub stats: SearchStats,
}

/// Picks a move for `role` in `state`.
///
/// Candidates are evaluated in oracle order with a full [0, 100] window; a
/// later candidate replaces the incumbent only with a strictly greater score.
/// On expiry the best move found so far is returned, or the first legal move
/// if nothing finished.
///
/// # Errors
/// Fails if the state offers `role` no legal move, or if the state machine
/// fails anywhere in the search.
pub fn choose_move<M: StateMachine>(
    machine: &M,
    role: &M::Role,
    state: &M::State,
    deadline: Deadline,
    config: &SearchConfig,
    context: &mut MatchContext,
) -> Result<Decision<M::Move>> {
    let start_time = Instant::now();

    let candidates = machine.legal_moves(state, role)?;
    let mut best_move = candidates
        .first()
        .cloned()
        .ok_or_else(|| no_legal_moves(role))?;
    context.observe(candidates.len());

    let mut best_score: Option<Score> = None;
    let mut expired = false;
    let mut searcher = Searcher::new(machine, role, deadline, config, context);

    for candidate in &candidates {
        let score = match searcher.minimize(candidate, state, SearchBound::full(), 0)? {
            SearchOutcome::Score(score) => score,
            SearchOutcome::Expired => {
                warn!(
                    "Deadline reached, falling back to {:?} (score: {:?})",
                    best_move, best_score
                );
                expired = true;
                break;
            }
        };
        debug!("Candidate {:?} scored {}", candidate, score);

        if best_score.map_or(true, |best| score > best) {
            best_score = Some(score);
            best_move = candidate.clone();
        }

        if config.stop_on_perfect_score && score == MAX_SCORE {
            debug!("Perfect score found, skipping remaining candidates");
            break;
        }
    }

    let stats = *searcher.stats();
    let elapsed = start_time.elapsed();

    info!(
        "Chose {:?} (score: {:?}, nodes: {}, cutoffs: {}, time: {}ms)",
        best_move,
        best_score,
        stats.nodes,
        stats.cutoffs,
        elapsed.as_millis()
    );

    Ok(Decision {
        selection: best_move,
        candidates,
        score: best_score,
        expired,
        elapsed,
        stats,
    })
}

/// Alpha-beta player for one role over one match at a time
pub struct Gamer<M: StateMachine> {
    machine: M,
    role: M::Role,
    config: Config,
    context: MatchContext,
    observers: Vec<Box<dyn Observer<M::Move>>>,
    turn: u32,
    match_stats: SearchStats,
}

impl<M: StateMachine> Gamer<M> {
    /// Creates a new Gamer playing `role`
    ///
    /// # Arguments
    /// * `machine` - Rules of the game being played
    /// * `role` - The role this player moves for
    /// * `config` - Static configuration that does not change during the gamer's lifetime
    pub fn new(machine: M, role: M::Role, config: Config) -> Self {
        Gamer {
            machine,
            role,
            config,
            context: MatchContext::new(),
            observers: Vec::new(),
            turn: 0,
            match_stats: SearchStats::default(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer<M::Move>>) {
        self.observers.push(observer);
    }

    pub fn role(&self) -> &M::Role {
        &self.role
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn context(&self) -> &MatchContext {
        &self.context
    }

    /// Search counters summed over every decision of the current match
    pub fn match_stats(&self) -> &SearchStats {
        &self.match_stats
    }

    /// Called when a match starts
    pub fn meta_game(&mut self) {
        info!(
            "MATCH START: role {:?}, heuristic {}, depth limit {:?}",
            self.role,
            self.config.search.heuristic.as_str(),
            self.config.search.depth_limit
        );
        self.reset_match();
    }

    /// Computes the move to play before `timeout`, the host's absolute limit
    /// for this turn. The safety margin is taken off before searching.
    pub fn select_move(&mut self, state: &M::State, timeout: Instant) -> Result<M::Move> {
        let deadline = Deadline::from_timeout(timeout, self.config.timing.safety_margin());
        self.select_move_before(state, deadline)
    }

    /// Computes a move with an already-derived search deadline
    pub fn select_move_before(&mut self, state: &M::State, deadline: Deadline) -> Result<M::Move> {
        self.turn += 1;
        info!(
            "Turn {}: Computing move ({}ms available)",
            self.turn,
            deadline.remaining().as_millis()
        );

        let decision = choose_move(
            &self.machine,
            &self.role,
            state,
            deadline,
            &self.config.search,
            &mut self.context,
        )?;
        self.match_stats.merge(&decision.stats);

        let event = SelectedMoveEvent {
            candidates: decision.candidates,
            selection: decision.selection,
            elapsed: decision.elapsed,
        };
        for observer in &self.observers {
            observer.on_move_selected(&event);
        }

        Ok(event.selection)
    }

    /// Called when a match ends normally
    pub fn stop(&mut self) {
        info!(
            "MATCH OVER after {} turns ({} nodes, {} cutoffs)",
            self.turn, self.match_stats.nodes, self.match_stats.cutoffs
        );
        self.reset_match();
    }

    /// Called when a match is cancelled
    pub fn abort(&mut self) {
        info!("MATCH ABORTED after {} turns", self.turn);
        self.reset_match();
    }

    fn reset_match(&mut self) {
        self.context.reset();
        self.turn = 0;
        self.match_stats = SearchStats::default();
    }
}

impl<M: StateMachine> Gamer<M>
where
    M::Move: Display,
{
    /// Adds a JSONL decision log per the `[debug]` section of the config.
    /// Does nothing when debug logging is disabled.
    pub async fn enable_debug_logging(&mut self) {
        let logger =
            JsonlEventLogger::new(self.config.debug.enabled, &self.config.debug.log_file_path)
                .await;
        if logger.is_enabled() {
            self.add_observer(Box::new(logger));
        }
    }
}
