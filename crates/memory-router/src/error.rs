use memory_router_routes::TemplateError;
use thiserror::Error;

/// Errors surfaced by [`MemoryRouter`](crate::MemoryRouter) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// `back` or `forward` was called on a router built without history
    #[error("this router has no history; build it with `MemoryRouter::with_history()` to use back/forward")]
    HistoryNotConfigured,

    /// A removed API was called
    #[error("`{api}` has been removed: {hint}. See the README for more details on upgrading.")]
    Removed {
        api: &'static str,
        hint: &'static str,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),
}
