// Decision notifications
//
// Observers receive one event per top-level decision. Delivery is
// fire-and-forget: an observer has no way to fail or delay the decision.

use std::time::Duration;

/// Emitted once per decision, on every return path
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedMoveEvent<M> {
    /// Every legal move considered at the root, in oracle order
    pub candidates: Vec<M>,
    pub selection: M,
    pub elapsed: Duration,
}

/// Receives decision events
pub trait Observer<M> {
    fn on_move_selected(&self, event: &SelectedMoveEvent<M>);
}

/// Observer that forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl<M: std::fmt::Debug> Observer<M> for LogObserver {
    fn on_move_selected(&self, event: &SelectedMoveEvent<M>) {
        log::info!(
            "Selected {:?} from {} candidates in {}ms",
            event.selection,
            event.candidates.len(),
            event.elapsed.as_millis()
        );
    }
}
