//! # Memory Router Routes
//!
//! Page-path template matching in the style of Next.js pages:
//! - Static segments (`/entity/list`)
//! - Dynamic segments (`/entity/[id]`)
//! - Catch-all segments (`/docs/[...slug]`)
//! - Optional catch-all segments (`/docs/[[...slug]]`)
//!
//! ## Matching Order
//!
//! A [`RouteTable`] sorts its templates so that the most specific one wins:
//! - Static segments beat dynamic segments at the same depth
//! - Dynamic segments beat catch-alls
//! - Catch-alls beat optional catch-alls
//!
//! Matching short-circuits on the first template that accepts the path.
//!
//! ## Example
//!
//! ```
//! use memory_router_routes::{ParamValue, RouteTable};
//!
//! let table = RouteTable::new(["/entity/[id]/attribute/[name]", "/[...slug]"]).unwrap();
//!
//! let hit = table.match_path("/entity/101/attribute/everything").unwrap();
//! assert_eq!(hit.template.as_str(), "/entity/[id]/attribute/[name]");
//! assert_eq!(hit.params[1].1, ParamValue::from("everything"));
//!
//! let hit = table.match_path("/one/two").unwrap();
//! assert_eq!(hit.params[0].1, ParamValue::from(["one", "two"]));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod param;
pub mod path;
pub mod segment;
mod table;
mod template;

// ============================================================================
// Public API
// ============================================================================

pub use error::TemplateError;
pub use param::ParamValue;
pub use path::{is_valid_path, normalize_path, remove_trailing_slash};
pub use segment::{classify_segment, is_dynamic_route, SegmentKind};
pub use table::{RouteMatch, RouteTable};
pub use template::{normalize_template, RouteTemplate};
