//! # Memory Router
//!
//! An in-memory implementation of the `next/router` API for tests. Navigation
//! updates route state held in memory; nothing touches a browser history or
//! the network.
//!
//! - `push` / `replace` / `set_current_url` with string or structured URLs
//! - The `as` display URL
//! - Dynamic route templates (`/entity/[id]`, `/[...slug]`, `/[[...slug]]`)
//! - `routeChangeStart` / `hashChangeStart` and their `Complete` events
//! - Optional simulated async timing and a back/forward history
//!
//! ## Example
//!
//! ```
//! use memory_router::{MemoryRouter, RouterEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let router = MemoryRouter::new();
//! router.use_routes(["/entity/[id]"]).unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! router.on(RouterEvent::RouteChangeComplete, move |change| {
//!     sink.lock().unwrap().push(change.as_path.clone());
//! });
//!
//! router.set_current_url("/entity/100?id=500");
//!
//! assert_eq!(router.pathname(), "/entity/[id]");
//! assert_eq!(router.as_path(), "/entity/100?id=500");
//! assert_eq!(router.query().get("id").and_then(|v| v.as_str()), Some("100"));
//! assert_eq!(*seen.lock().unwrap(), vec!["/entity/100?id=500"]);
//! ```
//!
//! ## Async Mode
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use memory_router::MemoryRouter;
//!
//! let router = MemoryRouter::new().with_async(true);
//! let transition = router.push("/later");
//! assert_eq!(router.as_path(), "/");
//!
//! assert!(transition.await);
//! assert_eq!(router.as_path(), "/later");
//! # }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod dynamic_routes;
mod error;
pub mod events;
mod history;
mod interpolate;
mod parser;
mod query;
mod route;
mod router;
mod transition;
mod url;

// ============================================================================
// Public API
// ============================================================================

pub use config::{Config, RouterConfig};
pub use dynamic_routes::create_dynamic_route_parser;
pub use error::RouterError;
pub use events::{EventEmitter, ListenerId, RouteChange, RouterEvent};
pub use history::History;
pub use interpolate::interpolate_as_path;
pub use parser::{ParserHook, Unsubscribe};
pub use query::Query;
pub use route::{DraftRoute, RouteState, TransitionOptions};
pub use router::MemoryRouter;
pub use transition::Transition;
pub use url::{parse_url, Url, UrlObject};

pub use memory_router_routes::{ParamValue, RouteTable, TemplateError};
