//! Segment classification for route templates
//!
//! Pure functional parsing of template segments into typed slots.
//! All functions are **pure**: same input → same output, no side effects.

/// Represents the different kinds of route template segments
///
/// # Examples
///
/// ```
/// use memory_router_routes::segment::{classify_segment, SegmentKind};
///
/// assert!(matches!(classify_segment("about"), SegmentKind::Static(_)));
/// assert!(matches!(classify_segment("[id]"), SegmentKind::Dynamic(_)));
/// assert!(matches!(classify_segment("[...slug]"), SegmentKind::CatchAll(_)));
/// assert!(matches!(classify_segment("[[...slug]]"), SegmentKind::OptionalCatchAll(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Literal text segment
    Static(String),
    /// Single segment slot: `[id]`
    Dynamic(String),
    /// Required catch-all, one or more segments: `[...slug]`
    CatchAll(String),
    /// Optional catch-all, zero or more segments: `[[...slug]]`
    OptionalCatchAll(String),
}

impl SegmentKind {
    /// Returns the parameter name for slug segments
    pub fn param_name(&self) -> Option<&str> {
        match self {
            SegmentKind::Static(_) => None,
            SegmentKind::Dynamic(name)
            | SegmentKind::CatchAll(name)
            | SegmentKind::OptionalCatchAll(name) => Some(name),
        }
    }

    /// Whether this segment is a slug placeholder
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, SegmentKind::Static(_))
    }

    /// Whether this segment consumes the rest of the path
    pub fn is_catch_all(&self) -> bool {
        matches!(
            self,
            SegmentKind::CatchAll(_) | SegmentKind::OptionalCatchAll(_)
        )
    }

    /// Sorting rank: static < dynamic < catch-all < optional catch-all
    pub(crate) fn rank(&self) -> u8 {
        match self {
            SegmentKind::Static(_) => 0,
            SegmentKind::Dynamic(_) => 1,
            SegmentKind::CatchAll(_) => 2,
            SegmentKind::OptionalCatchAll(_) => 3,
        }
    }

    /// Shape of the slot without its name, used to detect slug conflicts
    pub(crate) fn shape(&self) -> &str {
        match self {
            SegmentKind::Static(text) => text,
            SegmentKind::Dynamic(_) => "[]",
            SegmentKind::CatchAll(_) => "[...]",
            SegmentKind::OptionalCatchAll(_) => "[[...]]",
        }
    }
}

/// Classifies a segment into a slot kind (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional catch-all**: `[[...name]]`
/// 2. **Catch-all**: `[...name]`
/// 3. **Dynamic**: `[name]`
/// 4. **Static**: Any other text
///
/// Partial markers such as `post-[id]` are static text.
pub fn classify_segment(segment: &str) -> SegmentKind {
    // Check for optional catch-all: [[...name]] (double brackets)
    if let Some(inner) = segment
        .strip_prefix("[[")
        .and_then(|s| s.strip_suffix("]]"))
    {
        if let Some(name) = inner.strip_prefix("...") {
            return SegmentKind::OptionalCatchAll(name.to_string());
        }
    }

    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => match inner.strip_prefix("...") {
            Some(name) => SegmentKind::CatchAll(name.to_string()),
            None => SegmentKind::Dynamic(inner.to_string()),
        },
        None => SegmentKind::Static(segment.to_string()),
    }
}

/// Checks whether a path contains slug markers (`/entity/[id]`)
///
/// # Examples
///
/// ```
/// use memory_router_routes::segment::is_dynamic_route;
///
/// assert!(is_dynamic_route("/entity/[id]"));
/// assert!(is_dynamic_route("/[[...slug]]"));
/// assert!(!is_dynamic_route("/entity/42"));
/// ```
pub fn is_dynamic_route(path: &str) -> bool {
    path.split('/')
        .any(|segment| classify_segment(segment).is_dynamic())
}
