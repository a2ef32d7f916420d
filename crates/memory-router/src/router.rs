//! The in-memory router
//!
//! [`MemoryRouter`] is a cheap, clonable handle. All clones share one route
//! state, one listener table and one parser pipeline.
//!
//! ## Navigation
//!
//! `push`, `replace` and `set_current_url` all go through the same steps:
//! parse the target, run parser hooks, build the display path, classify the
//! change, emit the start event, commit, emit the complete event and finally
//! the internal signal for the call kind.
//!
//! In async mode `push` and `replace` stop after the start event. The commit
//! is queued and settles one scheduling tick later on the current tokio
//! runtime, whether or not the returned [`Transition`] is awaited. Outside a
//! runtime the commit waits for the transition to be polled or for
//! [`MemoryRouter::flush`]. Queued commits settle first-in first-out, so
//! settling a later transition also settles every earlier one.
//!
//! Listeners and parser hooks always run with no internal lock held.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use memory_router_routes::RouteTable;
use tokio::sync::oneshot;

use crate::config::RouterConfig;
use crate::dynamic_routes::apply_route_table;
use crate::events::{EventEmitter, ListenerId, RouteChange, RouterEvent};
use crate::history::History;
use crate::interpolate::interpolate_as_path;
use crate::parser::{run_hooks, HookId, ParserChain, ParserHook, Unsubscribe};
use crate::url::parse_url;
use crate::{DraftRoute, Query, RouteState, RouterError, Transition, TransitionOptions, Url};

// ============================================================================
// Internal State
// ============================================================================

pub(crate) struct Inner {
    core: Mutex<Core>,
    events: EventEmitter<RouterEvent, RouteChange>,
}

struct Core {
    state: RouteState,
    async_mode: bool,
    history: Option<History>,
    parsers: ParserChain,
    routes_hook: Option<HookId>,
    pending: VecDeque<PendingCommit>,
    next_ticket: u64,
    locales: Vec<String>,
    default_locale: Option<String>,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            state: RouteState::default(),
            async_mode: false,
            history: None,
            parsers: ParserChain::default(),
            routes_hook: None,
            pending: VecDeque::new(),
            next_ticket: 0,
            locales: Vec::new(),
            default_locale: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Push,
    Replace,
    Set,
}

impl Source {
    fn signal(self) -> Option<RouterEvent> {
        match self {
            Source::Push => Some(RouterEvent::Push),
            Source::Replace => Some(RouterEvent::Replace),
            Source::Set => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Push => "push",
            Source::Replace => "replace",
            Source::Set => "set",
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

/// A parsed target plus the pathname it had before parser hooks ran
struct Resolved {
    raw_pathname: String,
    draft: DraftRoute,
}

impl Resolved {
    fn new(url: &Url, current_pathname: &str, hooks: &[ParserHook]) -> Self {
        let mut draft = parse_url(url, current_pathname);
        let raw_pathname = draft.pathname.clone();
        run_hooks(hooks, &mut draft);
        Self {
            raw_pathname,
            draft,
        }
    }

    /// Display path built from the pre-hook pathname
    fn as_path(&self) -> String {
        interpolate_as_path(
            &self.raw_pathname,
            &self.draft.query,
            &self.draft.route_params,
            &self.draft.hash,
        )
    }
}

/// Everything decided before a navigation commits
struct Plan {
    source: Source,
    pathname: String,
    query: Query,
    hash: String,
    as_path: String,
    route_params: Query,
    locale: Option<String>,
    hash_change: bool,
    shallow: bool,
}

impl Plan {
    fn change(&self) -> RouteChange {
        RouteChange {
            as_path: self.as_path.clone(),
            shallow: self.shallow,
        }
    }

    fn start_event(&self) -> RouterEvent {
        if self.hash_change {
            RouterEvent::HashChangeStart
        } else {
            RouterEvent::RouteChangeStart
        }
    }

    fn complete_event(&self) -> RouterEvent {
        if self.hash_change {
            RouterEvent::HashChangeComplete
        } else {
            RouterEvent::RouteChangeComplete
        }
    }
}

struct PendingCommit {
    ticket: u64,
    plan: Plan,
    done: oneshot::Sender<bool>,
}

/// A commit already written to the state, waiting for its events
struct Committed {
    source: Source,
    change: RouteChange,
    complete: RouterEvent,
    done: Option<oneshot::Sender<bool>>,
}

impl Core {
    /// Writes `plan` into the route state and history
    fn apply(&mut self, plan: Plan, done: Option<oneshot::Sender<bool>>) -> Committed {
        let committed = Committed {
            source: plan.source,
            change: plan.change(),
            complete: plan.complete_event(),
            done,
        };

        let state = RouteState {
            pathname: plan.pathname,
            query: plan.query,
            hash: plan.hash,
            as_path: plan.as_path,
            route_params: plan.route_params,
            locale: plan.locale.or_else(|| self.state.locale.clone()),
        };
        if let Some(history) = self.history.as_mut() {
            match plan.source {
                Source::Push => history.push(state.clone()),
                Source::Replace => history.replace(state.clone()),
                Source::Set => history.set(state.clone()),
            }
        }
        self.state = state;

        committed
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn remove_parser(&self, id: HookId) -> bool {
        let mut core = self.lock();
        if core.routes_hook == Some(id) {
            core.routes_hook = None;
        }
        core.parsers.remove(id)
    }

    fn plan(
        &self,
        url: &Url,
        as_url: Option<&Url>,
        options: &TransitionOptions,
        source: Source,
    ) -> Plan {
        let (hooks, current_pathname) = {
            let core = self.lock();
            (core.parsers.snapshot(), core.state.pathname.clone())
        };

        let primary = Resolved::new(url, &current_pathname, &hooks);

        let (pathname, base_query, hash, route_params, as_path) = match as_url {
            Some(as_url) => {
                let display = Resolved::new(as_url, &current_pathname, &hooks);
                let as_path = display.as_path();
                // A different real path behind `as` means its query wins
                let base_query = if primary.raw_pathname != display.raw_pathname {
                    display.draft.query
                } else {
                    primary.draft.query
                };
                (
                    primary.draft.pathname,
                    base_query,
                    display.draft.hash,
                    display.draft.route_params,
                    as_path,
                )
            }
            None => {
                let as_path = primary.as_path();
                let DraftRoute {
                    pathname,
                    query,
                    hash,
                    route_params,
                } = primary.draft;
                (pathname, query, hash, route_params, as_path)
            }
        };

        let mut query = base_query;
        query.merge(&route_params);

        let hash_change = {
            let core = self.lock();
            let route_change = core.state.pathname != pathname || core.state.query != query;
            !route_change && (core.state.hash != hash || !hash.is_empty())
        };

        Plan {
            source,
            pathname,
            query,
            hash,
            as_path,
            route_params,
            locale: options.locale.clone(),
            hash_change,
            shallow: options.shallow,
        }
    }

    fn navigate(
        self: &Arc<Self>,
        url: Url,
        as_url: Option<Url>,
        options: TransitionOptions,
        source: Source,
    ) -> Transition {
        let plan = self.plan(&url, as_url.as_ref(), &options, source);
        tracing::debug!(
            "Navigation ({}) to {} started (shallow: {})",
            source,
            plan.as_path,
            plan.shallow
        );

        self.events.emit(plan.start_event(), &plan.change());

        let deferred = source != Source::Set && self.lock().async_mode;
        if !deferred {
            self.commit(plan);
            return Transition::settled(true);
        }

        let (done, outcome) = oneshot::channel();
        let ticket = {
            let mut core = self.lock();
            core.next_ticket += 1;
            let ticket = core.next_ticket;
            core.pending.push_back(PendingCommit { ticket, plan, done });
            ticket
        };

        let inner = Arc::clone(self);
        let settle = async move {
            tokio::task::yield_now().await;
            inner.settle_through(ticket);
        };

        // A dropped sender means `reset` discarded the navigation
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(settle);
                Transition::deferred(async move { outcome.await.unwrap_or(false) })
            }
            Err(_) => {
                tracing::trace!("No tokio runtime; navigation {} settles when polled", ticket);
                Transition::deferred(async move {
                    settle.await;
                    outcome.await.unwrap_or(false)
                })
            }
        }
    }

    fn commit(&self, plan: Plan) {
        let committed = self.lock().apply(plan, None);
        self.announce(committed);
    }

    fn announce(&self, committed: Committed) {
        let Committed {
            source,
            change,
            complete,
            done,
        } = committed;

        tracing::debug!("Navigation ({}) to {} committed", source, change.as_path);

        self.events.emit(complete, &change);
        if let Some(signal) = source.signal() {
            self.events.emit(signal, &change);
        }
        if let Some(done) = done {
            let _ = done.send(true);
        }
    }

    /// Commits every queued navigation up to and including `ticket`
    fn settle_through(&self, ticket: u64) {
        while let Some(committed) = self.commit_next(ticket) {
            self.announce(committed);
        }
    }

    /// Pops and applies the oldest queued navigation under a single lock,
    /// so concurrent settlers can never commit out of order
    fn commit_next(&self, ticket: u64) -> Option<Committed> {
        let mut core = self.lock();
        match core.pending.front() {
            Some(pending) if pending.ticket <= ticket => {}
            _ => return None,
        }
        let pending = core.pending.pop_front()?;
        Some(core.apply(pending.plan, Some(pending.done)))
    }

    fn step(&self, direction: Direction) -> Result<bool, RouterError> {
        let target = {
            let core = self.lock();
            let history = core
                .history
                .as_ref()
                .ok_or(RouterError::HistoryNotConfigured)?;
            let entry = match direction {
                Direction::Back => history.previous(),
                Direction::Forward => history.following(),
            };
            entry.cloned()
        };

        let Some(target) = target else {
            tracing::trace!("No history entry to move {:?} to", direction);
            return Ok(false);
        };

        let change = RouteChange {
            as_path: target.as_path.clone(),
            shallow: false,
        };
        self.events.emit(RouterEvent::RouteChangeStart, &change);

        {
            let mut core = self.lock();
            if let Some(history) = core.history.as_mut() {
                match direction {
                    Direction::Back => history.go_back(),
                    Direction::Forward => history.go_forward(),
                };
            }
            core.state = target;
        }
        tracing::debug!("History moved {:?} to {}", direction, change.as_path);

        self.events.emit(RouterEvent::RouteChangeComplete, &change);
        let signal = match direction {
            Direction::Back => RouterEvent::Back,
            Direction::Forward => RouterEvent::Forward,
        };
        self.events.emit(signal, &change);

        Ok(true)
    }
}

// ============================================================================
// Public Handle
// ============================================================================

/// In-memory stand-in for the `next/router` singleton
///
/// # Examples
///
/// ```
/// use memory_router::MemoryRouter;
///
/// let router = MemoryRouter::new();
/// router.set_current_url("/one/two/three?four=4&five=");
///
/// assert_eq!(router.pathname(), "/one/two/three");
/// assert_eq!(router.as_path(), "/one/two/three?four=4&five=");
/// assert_eq!(router.query().to_query_string(), "four=4&five=");
/// ```
#[derive(Clone)]
pub struct MemoryRouter {
    inner: Arc<Inner>,
}

impl MemoryRouter {
    /// Creates a synchronous router at `/` without history
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                core: Mutex::new(Core::default()),
                events: EventEmitter::new(),
            }),
        }
    }

    /// Builds a router from the `[router]` configuration table
    pub fn from_config(config: &RouterConfig) -> Result<Self, RouterError> {
        let mut router = Self::new().with_async(config.async_mode);
        if config.history {
            router = router.with_history();
        }
        router.set_locales(config.locales.iter().cloned());
        if let Some(locale) = &config.default_locale {
            router.set_default_locale(locale.clone());
        }
        if !config.routes.is_empty() {
            router.use_routes(&config.routes)?;
        }
        if let Some(url) = &config.initial_url {
            router.set_current_url(url);
        }
        Ok(router)
    }

    /// Enables or disables the simulated async delay for `push` / `replace`
    pub fn with_async(self, enabled: bool) -> Self {
        self.set_async(enabled);
        self
    }

    /// Records committed routes so `back` / `forward` can be used
    pub fn with_history(self) -> Self {
        {
            let mut core = self.inner.lock();
            if core.history.is_none() {
                let current = core.state.clone();
                core.history = Some(History::new(current));
            }
        }
        self
    }

    pub fn with_initial_url(self, url: impl Into<Url>) -> Self {
        self.set_current_url(url);
        self
    }

    pub fn set_async(&self, enabled: bool) {
        self.inner.lock().async_mode = enabled;
    }

    pub fn is_async(&self) -> bool {
        self.inner.lock().async_mode
    }

    pub fn has_history(&self) -> bool {
        self.inner.lock().history.is_some()
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn push(&self, url: impl Into<Url>) -> Transition {
        self.push_with(url, None, TransitionOptions::default())
    }

    /// Pushes `url` while displaying `as_url` in the address bar
    pub fn push_as(&self, url: impl Into<Url>, as_url: impl Into<Url>) -> Transition {
        self.push_with(url, Some(as_url.into()), TransitionOptions::default())
    }

    pub fn push_with(
        &self,
        url: impl Into<Url>,
        as_url: Option<Url>,
        options: TransitionOptions,
    ) -> Transition {
        self.inner
            .navigate(url.into(), as_url, options, Source::Push)
    }

    pub fn replace(&self, url: impl Into<Url>) -> Transition {
        self.replace_with(url, None, TransitionOptions::default())
    }

    pub fn replace_as(&self, url: impl Into<Url>, as_url: impl Into<Url>) -> Transition {
        self.replace_with(url, Some(as_url.into()), TransitionOptions::default())
    }

    pub fn replace_with(
        &self,
        url: impl Into<Url>,
        as_url: Option<Url>,
        options: TransitionOptions,
    ) -> Transition {
        self.inner
            .navigate(url.into(), as_url, options, Source::Replace)
    }

    /// Sets the current route synchronously, even in async mode
    ///
    /// Emits start and complete events but no push/replace signal, and resets
    /// history to this single entry.
    pub fn set_current_url(&self, url: impl Into<Url>) {
        let _ = self.inner.navigate(
            url.into(),
            None,
            TransitionOptions::default(),
            Source::Set,
        );
    }

    pub fn set_current_url_as(&self, url: impl Into<Url>, as_url: impl Into<Url>) {
        let _ = self.inner.navigate(
            url.into(),
            Some(as_url.into()),
            TransitionOptions::default(),
            Source::Set,
        );
    }

    /// Returns to the previous history entry
    ///
    /// Returns `Ok(false)` when already at the first entry.
    pub fn back(&self) -> Result<bool, RouterError> {
        self.inner.step(Direction::Back)
    }

    /// Re-applies the entry most recently left by [`back`](Self::back)
    pub fn forward(&self) -> Result<bool, RouterError> {
        self.inner.step(Direction::Forward)
    }

    /// Commits every queued async navigation, oldest first
    pub fn flush(&self) {
        self.inner.settle_through(u64::MAX);
    }

    /// Number of async navigations started but not yet committed
    pub fn pending_transitions(&self) -> usize {
        self.inner.lock().pending.len()
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    /// Appends a hook to the parser pipeline
    pub fn use_parser<F>(&self, hook: F) -> Unsubscribe
    where
        F: Fn(&mut DraftRoute) + Send + Sync + 'static,
    {
        let id = {
            let mut core = self.inner.lock();
            let id = core.parsers.add(Arc::new(hook));
            tracing::trace!("Registered parser hook ({} total)", core.parsers.len());
            id
        };
        Unsubscribe::new(Arc::downgrade(&self.inner), id)
    }

    /// Registers page templates, replacing any previously registered set
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Template`] when a template is invalid; the
    /// previously registered set stays active.
    pub fn use_routes<I, S>(&self, templates: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = RouteTable::new(templates)?;
        let count = table.len();
        let hook: ParserHook = Arc::new(move |draft: &mut DraftRoute| apply_route_table(&table, draft));

        let mut core = self.inner.lock();
        if let Some(previous) = core.routes_hook.take() {
            core.parsers.remove(previous);
        }
        let id = core.parsers.add(hook);
        core.routes_hook = Some(id);
        tracing::debug!("Registered {} route templates", count);

        Ok(())
    }

    /// Removed; always fails with [`RouterError::Removed`]
    #[deprecated(note = "use `use_routes` or `use_parser(create_dynamic_route_parser(..))`")]
    pub fn register_paths<I, S>(&self, _paths: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tracing::warn!("register_paths was called but has been removed");
        Err(RouterError::Removed {
            api: "register_paths",
            hint: "register templates with `use_routes` or `use_parser(create_dynamic_route_parser(..))`",
        })
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn events(&self) -> &EventEmitter<RouterEvent, RouteChange> {
        &self.inner.events
    }

    pub fn on<F>(&self, event: RouterEvent, handler: F) -> ListenerId
    where
        F: Fn(&RouteChange) + Send + Sync + 'static,
    {
        self.inner.events.on(event, handler)
    }

    pub fn off(&self, event: RouterEvent, id: ListenerId) -> bool {
        self.inner.events.off(event, id)
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// Immutable copy of the committed route
    pub fn snapshot(&self) -> RouteState {
        self.inner.lock().state.clone()
    }

    pub fn pathname(&self) -> String {
        self.inner.lock().state.pathname.clone()
    }

    /// Same as [`pathname`](Self::pathname)
    pub fn route(&self) -> String {
        self.pathname()
    }

    pub fn query(&self) -> Query {
        self.inner.lock().state.query.clone()
    }

    pub fn hash(&self) -> String {
        self.inner.lock().state.hash.clone()
    }

    pub fn as_path(&self) -> String {
        self.inner.lock().state.as_path.clone()
    }

    pub fn route_params(&self) -> Query {
        self.inner.lock().state.route_params.clone()
    }

    pub fn locale(&self) -> Option<String> {
        self.inner.lock().state.locale.clone()
    }

    pub fn history_len(&self) -> Option<usize> {
        self.inner.lock().history.as_ref().map(History::len)
    }

    /// Restores the initial state
    ///
    /// Clears listeners, parser hooks (including registered routes) and
    /// queued async navigations. Transitions for discarded navigations
    /// resolve to `false`. Async mode, history mode and locales are kept.
    pub fn reset(&self) {
        {
            let mut core = self.inner.lock();
            core.state = RouteState::default();
            core.parsers.clear();
            core.routes_hook = None;
            if !core.pending.is_empty() {
                tracing::debug!("Discarding {} pending navigations", core.pending.len());
                core.pending.clear();
            }
            if let Some(history) = core.history.as_mut() {
                history.set(RouteState::default());
            }
        }
        self.inner.events.clear();
        tracing::debug!("Router reset");
    }

    // ------------------------------------------------------------------------
    // next/router compatibility
    // ------------------------------------------------------------------------

    pub fn is_ready(&self) -> bool {
        true
    }

    pub fn base_path(&self) -> &str {
        ""
    }

    pub fn is_fallback(&self) -> bool {
        false
    }

    pub fn is_preview(&self) -> bool {
        false
    }

    pub fn locales(&self) -> Vec<String> {
        self.inner.lock().locales.clone()
    }

    pub fn set_locales<I, S>(&self, locales: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.lock().locales = locales.into_iter().map(Into::into).collect();
    }

    pub fn default_locale(&self) -> Option<String> {
        self.inner.lock().default_locale.clone()
    }

    pub fn set_default_locale(&self, locale: impl Into<String>) {
        self.inner.lock().default_locale = Some(locale.into());
    }

    /// Does nothing; there is nothing to load
    pub async fn prefetch(&self, _url: impl Into<Url>) {}

    /// Does nothing
    pub fn reload(&self) {}

    /// Does nothing; there is no browser history to pop
    pub fn before_pop_state<F>(&self, _callback: F)
    where
        F: Fn(&RouteState) -> bool + Send + Sync + 'static,
    {
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("MemoryRouter")
            .field("state", &core.state)
            .field("async_mode", &core.async_mode)
            .field("history", &core.history.as_ref().map(History::len))
            .field("pending", &core.pending.len())
            .finish()
    }
}
