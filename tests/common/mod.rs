//! Synthetic two-role game trees for exercising the search
//!
//! States are node indices. Every inner node lists role "a"'s moves and role
//! "b"'s moves; its children are stored row-major, one per (a, b) pair.

#![allow(dead_code)]

use std::cell::Cell;

use ggp_alphabeta::{JointMove, Score, StateMachine, StateMachineError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const ROLE_A: &str = "a";
pub const ROLE_B: &str = "b";

#[derive(Debug, Clone)]
pub enum Node {
    Terminal {
        goal: Score,
    },
    Inner {
        a_moves: Vec<String>,
        b_moves: Vec<String>,
        children: Vec<usize>,
        goal: Score,
    },
}

/// A finite game tree with role "a" scored by `goal` and role "b" by `100 - goal`
#[derive(Debug, Default)]
pub struct TreeGame {
    nodes: Vec<Node>,
    legal_move_calls: Cell<usize>,
}

impl TreeGame {
    pub fn new() -> Self {
        TreeGame::default()
    }

    pub fn add_terminal(&mut self, goal: Score) -> usize {
        self.nodes.push(Node::Terminal { goal });
        self.nodes.len() - 1
    }

    /// `children[i * b_moves.len() + j]` follows a_moves[i] with b_moves[j]
    pub fn add_inner(
        &mut self,
        a_moves: &[&str],
        b_moves: &[&str],
        children: Vec<usize>,
        goal: Score,
    ) -> usize {
        self.nodes.push(Node::Inner {
            a_moves: a_moves.iter().map(|m| m.to_string()).collect(),
            b_moves: b_moves.iter().map(|m| m.to_string()).collect(),
            children,
            goal,
        });
        self.nodes.len() - 1
    }

    /// A line of `turns` inner nodes ending in a terminal with `goal`.
    /// Role "b" has two replies at every step, both leading down the line.
    /// Inner nodes report `goal` as well, so goal proximity sees it early.
    pub fn add_line(&mut self, turns: usize, goal: Score) -> usize {
        let mut next = self.add_terminal(goal);
        for _ in 0..turns {
            next = self.add_inner(&["noop"], &["x", "y"], vec![next, next], goal);
        }
        next
    }

    pub fn node(&self, state: usize) -> &Node {
        &self.nodes[state]
    }

    pub fn legal_move_calls(&self) -> usize {
        self.legal_move_calls.get()
    }

    fn goal_of(&self, state: usize) -> Result<Score, StateMachineError> {
        match self.nodes.get(state) {
            Some(Node::Terminal { goal }) | Some(Node::Inner { goal, .. }) => Ok(*goal),
            None => Err(StateMachineError::GoalDefinition(format!("no state {}", state))),
        }
    }
}

impl StateMachine for TreeGame {
    type State = usize;
    type Role = String;
    type Move = String;

    fn roles(&self) -> Vec<String> {
        vec![ROLE_A.to_string(), ROLE_B.to_string()]
    }

    fn legal_moves(&self, state: &usize, role: &String) -> Result<Vec<String>, StateMachineError> {
        self.legal_move_calls.set(self.legal_move_calls.get() + 1);
        match self.nodes.get(*state) {
            Some(Node::Inner {
                a_moves, b_moves, ..
            }) => match role.as_str() {
                ROLE_A => Ok(a_moves.clone()),
                ROLE_B => Ok(b_moves.clone()),
                other => Err(StateMachineError::MoveDefinition(format!("unknown role {}", other))),
            },
            _ => Err(StateMachineError::MoveDefinition(format!(
                "no legal moves in state {}",
                state
            ))),
        }
    }

    fn next_state(
        &self,
        state: &usize,
        joint_move: &JointMove<String>,
    ) -> Result<usize, StateMachineError> {
        let undefined = || {
            StateMachineError::TransitionDefinition(format!(
                "no transition from {} on {:?}",
                state, joint_move
            ))
        };
        match self.nodes.get(*state) {
            Some(Node::Inner {
                a_moves,
                b_moves,
                children,
                ..
            }) => {
                let i = a_moves
                    .iter()
                    .position(|m| Some(m) == joint_move.first())
                    .ok_or_else(undefined)?;
                let j = b_moves
                    .iter()
                    .position(|m| Some(m) == joint_move.get(1))
                    .ok_or_else(undefined)?;
                let child = *children.get(i * b_moves.len() + j).ok_or_else(undefined)?;
                if child < self.nodes.len() {
                    Ok(child)
                } else {
                    Err(undefined())
                }
            }
            _ => Err(undefined()),
        }
    }

    fn is_terminal(&self, state: &usize) -> bool {
        matches!(self.nodes.get(*state), Some(Node::Terminal { .. }))
    }

    fn goal(&self, state: &usize, role: &String) -> Result<Score, StateMachineError> {
        let goal = self.goal_of(*state)?;
        Ok(if role == ROLE_A { goal } else { 100 - goal })
    }
}

/// Builds a random finite tree; returns the game and its root
pub fn random_tree(seed: u64, max_depth: usize) -> (TreeGame, usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = TreeGame::new();
    let root = grow(&mut game, &mut rng, 0, max_depth);
    (game, root)
}

fn grow(game: &mut TreeGame, rng: &mut StdRng, depth: usize, max_depth: usize) -> usize {
    let goal = rng.random_range(0..=100);
    if depth > 0 && (depth >= max_depth || rng.random_bool(0.15)) {
        return game.add_terminal(goal);
    }

    let a_count = rng.random_range(1..=3);
    let b_count = rng.random_range(1..=3);
    let a_moves: Vec<String> = (0..a_count).map(|i| format!("a{}", i)).collect();
    let b_moves: Vec<String> = (0..b_count).map(|i| format!("b{}", i)).collect();

    let mut children = Vec::with_capacity(a_count * b_count);
    for _ in 0..a_count * b_count {
        children.push(grow(game, rng, depth + 1, max_depth));
    }

    let a_refs: Vec<&str> = a_moves.iter().map(String::as_str).collect();
    let b_refs: Vec<&str> = b_moves.iter().map(String::as_str).collect();
    game.add_inner(&a_refs, &b_refs, children, goal)
}

/// Plain minimax with goal-proximity cutoffs and no pruning.
/// Depth counts both halves of a turn, starting at 0 below the root move.
pub fn reference_min(
    game: &TreeGame,
    own_move: &str,
    state: usize,
    depth: u32,
    limit: Option<u32>,
) -> Score {
    let Node::Inner {
        a_moves,
        b_moves,
        children,
        ..
    } = game.node(state)
    else {
        panic!("reference_min on terminal state");
    };
    let i = a_moves.iter().position(|m| m == own_move).expect("legal move");
    (0..b_moves.len())
        .map(|j| reference_max(game, children[i * b_moves.len() + j], depth + 1, limit))
        .min()
        .expect("at least one reply")
}

pub fn reference_max(game: &TreeGame, state: usize, depth: u32, limit: Option<u32>) -> Score {
    match game.node(state) {
        Node::Terminal { goal } => *goal,
        Node::Inner { goal, .. } if limit.map_or(false, |l| depth >= l) => *goal,
        Node::Inner { a_moves, .. } => a_moves
            .iter()
            .map(|m| reference_min(game, m, state, depth + 1, limit))
            .max()
            .expect("at least one move"),
    }
}

/// Root move an unpruned search picks: first strictly greatest
pub fn reference_choice(game: &TreeGame, root: usize, limit: Option<u32>) -> String {
    let Node::Inner { a_moves, .. } = game.node(root) else {
        panic!("reference_choice on terminal state");
    };
    let mut best = a_moves[0].clone();
    let mut best_score = None;
    for m in a_moves {
        let score = reference_min(game, m, root, 0, limit);
        if best_score.map_or(true, |b| score > b) {
            best_score = Some(score);
            best = m.clone();
        }
    }
    best
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
