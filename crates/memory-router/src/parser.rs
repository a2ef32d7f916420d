//! Parser hook pipeline
//!
//! Hooks rewrite a [`DraftRoute`] before it is committed. They run in
//! registration order on every draft, including the "as" draft.

use std::sync::{Arc, Weak};

use crate::router::Inner;
use crate::DraftRoute;

/// A registered parser hook
pub type ParserHook = Arc<dyn Fn(&mut DraftRoute) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HookId(u64);

/// Ordered hooks with stable ids for removal
#[derive(Default)]
pub(crate) struct ParserChain {
    hooks: Vec<(HookId, ParserHook)>,
    next_id: u64,
}

impl ParserChain {
    pub(crate) fn add(&mut self, hook: ParserHook) -> HookId {
        self.next_id += 1;
        let id = HookId(self.next_id);
        self.hooks.push((id, hook));
        id
    }

    pub(crate) fn remove(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(hook, _)| *hook != id);
        before != self.hooks.len()
    }

    /// Clones the current hooks so they can run without the router lock
    pub(crate) fn snapshot(&self) -> Vec<ParserHook> {
        self.hooks.iter().map(|(_, hook)| Arc::clone(hook)).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.hooks.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.hooks.len()
    }
}

pub(crate) fn run_hooks(hooks: &[ParserHook], draft: &mut DraftRoute) {
    for hook in hooks {
        hook(&mut *draft);
    }
    if !hooks.is_empty() {
        tracing::trace!("Ran {} parser hooks, pathname is {}", hooks.len(), draft.pathname);
    }
}

/// Handle returned by `use_parser`; removes the hook when consumed
///
/// Dropping the handle keeps the hook registered.
#[must_use = "call `unsubscribe()` to remove the parser hook"]
#[derive(Debug)]
pub struct Unsubscribe {
    router: Weak<Inner>,
    id: HookId,
}

impl Unsubscribe {
    pub(crate) fn new(router: Weak<Inner>, id: HookId) -> Self {
        Self { router, id }
    }

    /// Removes the hook. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        self.router
            .upgrade()
            .is_some_and(|router| router.remove_parser(self.id))
    }
}
