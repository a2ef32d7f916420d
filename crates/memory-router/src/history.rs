//! Linear navigation history
//!
//! The top of `entries` is always the committed route. Going back moves the
//! top onto the forward stack; a new push discards the forward stack.

use crate::RouteState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<RouteState>,
    forward: Vec<RouteState>,
}

impl History {
    pub fn new(initial: RouteState) -> Self {
        Self {
            entries: vec![initial],
            forward: Vec::new(),
        }
    }

    pub fn push(&mut self, state: RouteState) {
        self.entries.push(state);
        self.forward.clear();
    }

    /// Overwrites the current entry
    pub fn replace(&mut self, state: RouteState) {
        match self.entries.last_mut() {
            Some(current) => *current = state,
            None => self.entries.push(state),
        }
    }

    /// Resets to a single entry
    pub fn set(&mut self, state: RouteState) {
        self.entries = vec![state];
        self.forward.clear();
    }

    pub fn current(&self) -> Option<&RouteState> {
        self.entries.last()
    }

    /// The entry `back` would restore
    pub fn previous(&self) -> Option<&RouteState> {
        self.entries.iter().rev().nth(1)
    }

    /// The entry `forward` would restore
    pub fn following(&self) -> Option<&RouteState> {
        self.forward.last()
    }

    /// Pops the current entry, returning the newly current one
    pub fn go_back(&mut self) -> Option<&RouteState> {
        if self.entries.len() < 2 {
            return None;
        }
        let left = self.entries.pop()?;
        self.forward.push(left);
        self.entries.last()
    }

    /// Re-applies the entry most recently left by `go_back`
    pub fn go_forward(&mut self) -> Option<&RouteState> {
        let next = self.forward.pop()?;
        self.entries.push(next);
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RouteState] {
        &self.entries
    }
}
