use thiserror::Error;

/// Reasons a route template cannot be registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("route template `{template}` contains a slug with an empty name")]
    EmptyParamName { template: String },

    #[error("route template `{template}` contains an invalid slug name `{name}`")]
    InvalidParamName { template: String, name: String },

    #[error("catch-all segment `{segment}` must be the last segment of `{template}`")]
    CatchAllNotLast { template: String, segment: String },

    #[error("slug `{name}` appears more than once in `{template}`")]
    DuplicateParam { template: String, name: String },

    #[error("different slug names for the same dynamic path (`{first}` != `{second}`)")]
    ConflictingSlugNames { first: String, second: String },

    #[error("route template `{template}` could not be compiled: {reason}")]
    Compile { template: String, reason: String },
}
