//! Error types for stencil.

use derive_more::{Display, Error, From};

// ============================================================================
// Template Errors
// ============================================================================

/// What is wrong with a template string.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TemplateErrorKind {
    /// A `{` without a matching `}`.
    #[display("unclosed '{{' at position {position}")]
    UnclosedBrace {
        /// Byte offset of the opening brace.
        position: usize,
    },

    /// A `}` without a preceding `{`.
    #[display("unexpected '}}' at position {position}")]
    UnexpectedClosingBrace {
        /// Byte offset of the closing brace.
        position: usize,
    },

    /// A placeholder whose name does not match `[A-Za-z0-9_]+`.
    #[display("invalid variable name '{name}'")]
    InvalidVariable {
        /// The offending name, as written between the braces.
        name: String,
    },
}

/// A malformed URI or header template.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("malformed template '{template}': {kind}")]
pub struct TemplateError {
    /// The template source.
    #[error(not(source))]
    pub template: String,
    /// The syntax problem.
    #[error(not(source))]
    pub kind: TemplateErrorKind,
}

impl TemplateError {
    pub(crate) fn new(template: &str, kind: TemplateErrorKind) -> Self {
        Self {
            template: template.to_string(),
            kind,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for stencil operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A URI or header template could not be parsed.
    #[display("{_0}")]
    #[from]
    Template(TemplateError),

    /// The body encoder failed.
    #[display("encode error: {_0}")]
    #[from(skip)]
    Encode(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// An endpoint declaration is inconsistent.
    #[display("invalid endpoint contract: {_0}")]
    #[from(skip)]
    Contract(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an encoder failure.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }

    /// Create a contract error.
    #[must_use]
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if a template could not be parsed.
    #[must_use]
    pub const fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }

    /// Returns `true` if the body encoder (or one of its serializers) failed.
    #[must_use]
    pub const fn is_encode(&self) -> bool {
        matches!(
            self,
            Self::Encode(_) | Self::JsonSerialization(_) | Self::FormSerialization(_)
        )
    }

    /// Returns `true` if an endpoint declaration was rejected.
    #[must_use]
    pub const fn is_contract(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}
