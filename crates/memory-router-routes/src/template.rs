//! Route template compilation
//!
//! Turns a template such as `/entity/[id]/[[...slug]]` into a compiled
//! regular expression plus the ordered list of slug slots it captures.
//! Parsing is a fold over the template segments, mirroring how a page path
//! maps onto a URL pattern.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use crate::path::normalize_path;
use crate::segment::{classify_segment, SegmentKind};
use crate::{ParamValue, TemplateError};

/// Accumulator for fold-based template compilation
///
/// All mutations are local to the fold; each builder method returns the
/// updated state for chaining.
#[derive(Default)]
struct ParseState {
    pattern: String,
}

impl ParseState {
    fn with_static_segment(mut self, text: &str) -> Self {
        self.pattern.push('/');
        self.pattern.push_str(&regex::escape(text));
        self
    }

    fn with_dynamic_param(mut self) -> Self {
        self.pattern.push_str("/([^/]+?)");
        self
    }

    fn with_catch_all(mut self) -> Self {
        self.pattern.push_str("/(.+?)");
        self
    }

    fn with_optional_catch_all(mut self) -> Self {
        self.pattern.push_str("(?:/(.+?))?");
        self
    }

    /// Anchors the pattern and tolerates a single trailing slash
    fn finalize(self) -> String {
        format!("^{}(?:/)?$", self.pattern)
    }
}

fn process_segment(state: ParseState, segment: &SegmentKind) -> ParseState {
    match segment {
        SegmentKind::Static(text) => state.with_static_segment(text),
        SegmentKind::Dynamic(_) => state.with_dynamic_param(),
        SegmentKind::CatchAll(_) => state.with_catch_all(),
        SegmentKind::OptionalCatchAll(_) => state.with_optional_catch_all(),
    }
}

/// Normalizes a template the way page paths are normalized
///
/// Adds the leading `/`, strips trailing slashes and drops a final `index`
/// segment (`/blog/index` → `/blog`).
pub fn normalize_template(template: &str) -> Cow<'_, str> {
    let normalized = normalize_path(template);
    if normalized == "/index" {
        return Cow::Borrowed("/");
    }
    match normalized.strip_suffix("/index") {
        Some(parent) => Cow::Owned(parent.to_string()),
        None => normalized,
    }
}

/// A compiled route template
#[derive(Debug, Clone)]
pub struct RouteTemplate {
    source: String,
    segments: Vec<SegmentKind>,
    regex: Regex,
}

impl RouteTemplate {
    /// Compiles a template, validating its slugs
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_router_routes::{ParamValue, RouteTemplate};
    ///
    /// let template = RouteTemplate::parse("/entity/[id]/attribute/[name]").unwrap();
    /// let params = template.matches("/entity/101/attribute/everything").unwrap();
    /// assert_eq!(params[0], ("id".to_string(), ParamValue::from("101")));
    /// assert_eq!(params[1], ("name".to_string(), ParamValue::from("everything")));
    /// ```
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let source = normalize_template(template).into_owned();
        let raw: Vec<&str> = source.split('/').filter(|s| !s.is_empty()).collect();
        let segments: Vec<SegmentKind> = raw.iter().copied().map(classify_segment).collect();

        validate(&source, &raw, &segments)?;

        let pattern = segments
            .iter()
            .fold(ParseState::default(), process_segment)
            .finalize();
        let regex = Regex::new(&pattern).map_err(|err| TemplateError::Compile {
            template: source.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            source,
            segments,
            regex,
        })
    }

    /// The normalized template text, e.g. `/entity/[id]`
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[SegmentKind] {
        &self.segments
    }

    /// Slug names in template order
    pub fn param_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(SegmentKind::param_name)
    }

    /// Whether the template has any slug segment
    pub fn is_dynamic(&self) -> bool {
        self.segments.iter().any(SegmentKind::is_dynamic)
    }

    /// Matches a concrete path and extracts slug values
    ///
    /// Single slots yield `ParamValue::Single`, catch-alls yield
    /// `ParamValue::Multi`. An optional catch-all that matched nothing is
    /// omitted. Values are percent-decoded.
    pub fn matches(&self, path: &str) -> Option<Vec<(String, ParamValue)>> {
        let captures = self.regex.captures(path)?;

        let params = self
            .segments
            .iter()
            .filter(|segment| segment.is_dynamic())
            .zip(captures.iter().skip(1))
            .filter_map(|(segment, capture)| {
                let raw = capture?.as_str();
                let name = segment.param_name()?.to_string();
                let value = if segment.is_catch_all() {
                    ParamValue::Multi(raw.split('/').map(decode_component).collect())
                } else {
                    ParamValue::Single(decode_component(raw))
                };
                Some((name, value))
            })
            .collect();

        Some(params)
    }

    /// Per-segment ordering key used by the route table
    pub(crate) fn sort_key(&self) -> Vec<(u8, &str)> {
        self.segments
            .iter()
            .map(|segment| match segment {
                SegmentKind::Static(text) => (segment.rank(), text.as_str()),
                _ => (segment.rank(), ""),
            })
            .collect()
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

fn validate(
    template: &str,
    raw: &[&str],
    segments: &[SegmentKind],
) -> Result<(), TemplateError> {
    let mut seen = HashSet::new();
    let last = segments.len().saturating_sub(1);

    for (index, segment) in segments.iter().enumerate() {
        let Some(name) = segment.param_name() else {
            continue;
        };

        if name.is_empty() {
            return Err(TemplateError::EmptyParamName {
                template: template.to_string(),
            });
        }
        if name.contains(['[', ']', '.']) {
            return Err(TemplateError::InvalidParamName {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
        if segment.is_catch_all() && index != last {
            return Err(TemplateError::CatchAllNotLast {
                template: template.to_string(),
                segment: raw[index].to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(TemplateError::DuplicateParam {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
    }

    Ok(())
}
