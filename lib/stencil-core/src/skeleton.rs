//! The mutable request being built for one invocation.

use indexmap::IndexMap;

use crate::{Body, Method, ResolvedHeader, Result, Template};

/// A request under construction.
///
/// The skeleton starts from an endpoint's declared method, URI template and
/// header templates. Encoding stages substitute values into it; the final
/// [`AggregateEncoder`](crate::AggregateEncoder) pass records the resolved URI
/// and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSkeleton {
    method: Method,
    uri_template: String,
    headers: IndexMap<String, Vec<String>>,
    decode_slash: bool,
    body: Option<Body>,
    resolution: Option<Resolution>,
}

/// What the final expansion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub(crate) uri_template: String,
    pub(crate) uri: String,
    pub(crate) headers: IndexMap<String, ResolvedHeader>,
}

impl RequestSkeleton {
    /// Create a skeleton with no headers and no body.
    #[must_use]
    pub fn new(method: Method, uri_template: impl Into<String>) -> Self {
        Self {
            method,
            uri_template: uri_template.into(),
            headers: IndexMap::new(),
            decode_slash: true,
            body: None,
            resolution: None,
        }
    }

    /// Add a header value template, builder style.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    /// Set whether `/` in path values is kept, builder style.
    #[must_use]
    pub const fn with_decode_slash(mut self, decode_slash: bool) -> Self {
        self.decode_slash = decode_slash;
        self
    }

    /// The HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// The URI template.
    #[must_use]
    pub fn uri_template(&self) -> &str {
        &self.uri_template
    }

    /// Replace the URI template.
    pub fn set_uri_template(&mut self, uri_template: impl Into<String>) {
        self.uri_template = uri_template.into();
    }

    /// Declared header templates, in declaration order.
    #[must_use]
    pub const fn headers(&self) -> &IndexMap<String, Vec<String>> {
        &self.headers
    }

    /// Append a value template to a header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.entry(name.into()).or_default().push(value.into());
    }

    /// Replace every value template of a header.
    pub fn set_header(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.headers.insert(name.into(), values);
    }

    /// Whether `/` in path values is kept.
    #[must_use]
    pub const fn decode_slash(&self) -> bool {
        self.decode_slash
    }

    /// Set whether `/` in path values is kept.
    pub fn set_decode_slash(&mut self, decode_slash: bool) {
        self.decode_slash = decode_slash;
    }

    /// The body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Replace the body.
    pub fn set_body(&mut self, body: Option<Body>) {
        self.body = body;
    }

    /// Variables found in the query part of the URI template.
    ///
    /// # Errors
    ///
    /// Fails if the URI template is malformed.
    pub fn query_variables(&self) -> Result<Vec<String>> {
        let template = Template::parse(&self.uri_template)?;
        Ok(template.query_variables().map(str::to_string).collect())
    }

    /// The fully resolved URI, once the final expansion ran.
    #[must_use]
    pub fn resolved_uri(&self) -> Option<&str> {
        self.resolution.as_ref().map(|r| r.uri.as_str())
    }

    /// The reconciled headers, once the final expansion ran.
    #[must_use]
    pub fn resolved_headers(&self) -> Option<&IndexMap<String, ResolvedHeader>> {
        self.resolution.as_ref().map(|r| &r.headers)
    }

    /// The reconciled values of one header.
    ///
    /// `None` when the final expansion did not run or the header was omitted.
    #[must_use]
    pub fn resolved_header(&self, name: &str) -> Option<&[String]> {
        self.resolved_headers()
            .and_then(|headers| headers.get(name))
            .map(ResolvedHeader::values)
    }

    /// Record the outcome of the final expansion.
    ///
    /// The pruned URI template, the resolved URI and the headers are replaced
    /// together.
    pub(crate) fn commit(&mut self, resolution: Resolution) {
        self.uri_template.clone_from(&resolution.uri_template);
        self.resolution = Some(resolution);
    }
}
