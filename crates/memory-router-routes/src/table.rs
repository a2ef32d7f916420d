//! Ordered collection of route templates
//!
//! Templates are sorted so that the most specific template wins: static
//! segments before dynamic ones, dynamic before catch-all, catch-all before
//! optional catch-all. Matching walks the sorted list and stops at the first
//! template that accepts the path.

use std::collections::HashMap;

use crate::template::RouteTemplate;
use crate::{ParamValue, TemplateError};

/// Result of matching a concrete path against a [`RouteTable`]
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub template: &'a RouteTemplate,
    pub params: Vec<(String, ParamValue)>,
}

/// Sorted, validated set of route templates
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    templates: Vec<RouteTemplate>,
}

impl RouteTable {
    /// Compiles and sorts a list of templates
    ///
    /// Identical templates are registered once. Two templates that put
    /// differently named slugs at the same dynamic position are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_router_routes::{ParamValue, RouteTable};
    ///
    /// let table = RouteTable::new(["/entity/[id]", "/entity/list"]).unwrap();
    ///
    /// let hit = table.match_path("/entity/list").unwrap();
    /// assert_eq!(hit.template.as_str(), "/entity/list");
    ///
    /// let hit = table.match_path("/entity/42").unwrap();
    /// assert_eq!(hit.params, vec![("id".to_string(), ParamValue::from("42"))]);
    /// ```
    pub fn new<I, S>(templates: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = templates
            .into_iter()
            .map(|template| RouteTemplate::parse(template.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        compiled.sort_by(|a, b| {
            a.sort_key()
                .cmp(&b.sort_key())
                .then_with(|| a.as_str().cmp(b.as_str()))
        });
        compiled.dedup_by(|a, b| a.as_str() == b.as_str());

        check_slug_conflicts(&compiled)?;

        tracing::debug!("Compiled route table with {} templates", compiled.len());

        Ok(Self {
            templates: compiled,
        })
    }

    /// Finds the most specific template accepting `path`
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let found = self.templates.iter().find_map(|template| {
            template
                .matches(path)
                .map(|params| RouteMatch { template, params })
        });

        match &found {
            Some(hit) => tracing::trace!("Matched {} against {}", path, hit.template),
            None => tracing::trace!("No template matched {}", path),
        }

        found
    }

    /// Templates in match order
    pub fn templates(&self) -> &[RouteTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Rejects tables where the same dynamic position carries two slug names
///
/// A position is identified by the shapes of every preceding segment plus the
/// kind of slot, so `/blog/[id]` and `/blog/[slug]/edit` conflict while
/// `/blog/[id]` and `/shop/[slug]` do not.
fn check_slug_conflicts(templates: &[RouteTemplate]) -> Result<(), TemplateError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for template in templates {
        let mut position = String::new();

        for segment in template.segments() {
            position.push('/');
            position.push_str(segment.shape());

            let Some(name) = segment.param_name() else {
                continue;
            };

            match seen.get(position.as_str()) {
                Some(existing) if *existing != name => {
                    return Err(TemplateError::ConflictingSlugNames {
                        first: existing.to_string(),
                        second: name.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(position.clone(), name);
                }
            }
        }
    }

    Ok(())
}
