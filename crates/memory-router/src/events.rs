//! Lifecycle event subscriptions
//!
//! [`EventEmitter`] keeps an ordered listener list per event. Emission clones
//! the list first and calls handlers with no lock held, so a handler may read
//! the router or subscribe further listeners.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Identifies one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Handler<P> = Arc<dyn Fn(&P) + Send + Sync>;
type ListenerMap<E, P> = HashMap<E, Vec<(ListenerId, Handler<P>)>>;

/// Events emitted by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterEvent {
    RouteChangeStart,
    RouteChangeComplete,
    HashChangeStart,
    HashChangeComplete,
    /// Internal signal after a committed `push`
    Push,
    /// Internal signal after a committed `replace`
    Replace,
    /// Internal signal after `back`
    Back,
    /// Internal signal after `forward`
    Forward,
}

impl RouterEvent {
    pub const ALL: [RouterEvent; 8] = [
        RouterEvent::RouteChangeStart,
        RouterEvent::RouteChangeComplete,
        RouterEvent::HashChangeStart,
        RouterEvent::HashChangeComplete,
        RouterEvent::Push,
        RouterEvent::Replace,
        RouterEvent::Back,
        RouterEvent::Forward,
    ];

    /// Wire name, as used by `next/router` listeners
    pub fn name(&self) -> &'static str {
        match self {
            RouterEvent::RouteChangeStart => "routeChangeStart",
            RouterEvent::RouteChangeComplete => "routeChangeComplete",
            RouterEvent::HashChangeStart => "hashChangeStart",
            RouterEvent::HashChangeComplete => "hashChangeComplete",
            RouterEvent::Push => "memoryRouter:push",
            RouterEvent::Replace => "memoryRouter:replace",
            RouterEvent::Back => "memoryRouter:back",
            RouterEvent::Forward => "memoryRouter:forward",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

impl fmt::Display for RouterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload delivered with every router event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteChange {
    pub as_path: String,
    pub shallow: bool,
}

/// Ordered listeners keyed by event
pub struct EventEmitter<E, P> {
    next_id: AtomicU64,
    listeners: Mutex<ListenerMap<E, P>>,
}

impl<E, P> EventEmitter<E, P>
where
    E: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a handler; handlers run in registration order
    pub fn on<F>(&self, event: E, handler: F) -> ListenerId
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let handler: Handler<P> = Arc::new(handler);
        self.lock().entry(event).or_default().push((id, handler));
        id
    }

    /// Removes a handler. Unknown ids are ignored and return `false`.
    pub fn off(&self, event: E, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let Some(handlers) = listeners.get_mut(&event) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(listener, _)| *listener != id);
        before != handlers.len()
    }

    /// Calls every handler for `event` synchronously
    pub fn emit(&self, event: E, payload: &P) {
        let handlers: Vec<Handler<P>> = self
            .lock()
            .get(&event)
            .map(|handlers| handlers.iter().map(|(_, handler)| Arc::clone(handler)).collect())
            .unwrap_or_default();

        for handler in handlers {
            handler(payload);
        }
    }

    pub fn listener_count(&self, event: E) -> usize {
        self.lock().get(&event).map_or(0, Vec::len)
    }

    /// Drops every listener for every event
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, ListenerMap<E, P>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E, P> Default for EventEmitter<E, P>
where
    E: Eq + Hash + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> fmt::Debug for EventEmitter<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter").finish_non_exhaustive()
    }
}
