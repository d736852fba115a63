//! Endpoint declarations.
//!
//! An endpoint is declared once, in call-site argument order, and turned into
//! a URI template, header templates and parameter descriptors.
//!
//! # Example
//!
//! ```
//! use stencil::prelude::*;
//!
//! # fn main() -> stencil::Result<()> {
//! let endpoint = Endpoint::builder(Method::Get, "path1/{id1}")
//!     .resource("/query/")
//!     .produces(&["application/json"])
//!     .path_param("id1")
//!     .query_param("param1")
//!     .header_param("header1")
//!     .build()?;
//!
//! assert_eq!(endpoint.uri_template(), "/query/path1/{id1}?param1={param1}");
//! assert_eq!(endpoint.arity(), 3);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use stencil_core::{
    Bindable, Descriptors, Error, Method, ParamDescriptor, RequestSkeleton, Result, Role, header,
    variable_name,
};
use tracing::debug;

use crate::Endpoint;

static PATH_PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*([^\s:}]+?)\s*(:[^}]+?)?\}").expect("a valid regex")
});

/// What the argument at one position is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// A scalar (or map) bound to one parameter.
    Direct(Role),
    /// An aggregate whose fields carry parameters.
    Aggregate,
    /// The request body.
    Body,
    /// Not part of the request.
    Ignored,
}

/// Builder for [`Endpoint`].
#[derive(Debug)]
pub struct EndpointBuilder {
    method: Method,
    resource: String,
    path: String,
    headers: Vec<(String, String)>,
    consumes: Option<String>,
    produces: Option<String>,
    decode_slash: Option<bool>,
    params: Vec<ParamDescriptor>,
    kinds: Vec<ArgumentKind>,
    query_names: Vec<String>,
    header_names: Vec<String>,
    error: Option<Error>,
}

impl EndpointBuilder {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            resource: String::new(),
            path: path.into(),
            headers: Vec::new(),
            consumes: None,
            produces: None,
            decode_slash: None,
            params: Vec::new(),
            kinds: Vec::new(),
            query_names: Vec::new(),
            header_names: Vec::new(),
            error: None,
        }
    }

    /// Set the resource path prepended to the endpoint path.
    #[must_use]
    pub fn resource(mut self, path: impl Into<String>) -> Self {
        self.resource = path.into();
        self
    }

    /// Declare the media types of the body, sent as `Content-Type`.
    ///
    /// Replaces an earlier declaration.
    #[must_use]
    pub fn consumes(mut self, media_types: &[&str]) -> Self {
        match media_type_list("consumes", media_types) {
            Ok(value) => self.consumes = Some(value),
            Err(err) => self.fail(err),
        }
        self
    }

    /// Declare the accepted response media types, sent as `Accept`.
    ///
    /// Replaces an earlier declaration.
    #[must_use]
    pub fn produces(mut self, media_types: &[&str]) -> Self {
        match media_type_list("produces", media_types) {
            Ok(value) => self.produces = Some(value),
            Err(err) => self.fail(err),
        }
        self
    }

    /// Add a header value template.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if let Err(err) = check_header_name(&name) {
            self.fail(err);
        }
        self.headers.push((name, value.into()));
        self
    }

    /// Override the configured slash handling for path values.
    #[must_use]
    pub const fn decode_slash(mut self, decode_slash: bool) -> Self {
        self.decode_slash = Some(decode_slash);
        self
    }

    /// Declare a path parameter.
    ///
    /// The endpoint path must hold the matching `{name}` placeholder.
    #[must_use]
    pub fn path_param(self, name: &str) -> Self {
        self.direct(Role::Path, name)
    }

    /// Declare a query parameter.
    ///
    /// Adds a `name={name}` clause unless the path already has one. A name
    /// that is not a valid template variable, like `page-size`, is bound
    /// through [`variable_name`]: `page-size={page_size}`.
    #[must_use]
    pub fn query_param(mut self, name: &str) -> Self {
        if !name.is_empty() && !self.query_names.iter().any(|known| known == name) {
            self.query_names.push(name.to_string());
        }
        self.direct(Role::Query, name)
    }

    /// Declare a header parameter, sent as `name: {variable}` where the
    /// variable is [`variable_name`] of the header name (`X-Request-Id`
    /// becomes `{X_Request_Id}`).
    #[must_use]
    pub fn header_param(mut self, name: &str) -> Self {
        if let Err(err) = check_header_name(name) {
            self.fail(err);
        }
        self.header_names.push(name.to_string());
        self.direct(Role::Header, name)
    }

    /// Declare a form field.
    #[must_use]
    pub fn form_param(self, name: &str) -> Self {
        self.direct(Role::Form, name)
    }

    /// Mark the last declared parameter as already percent-encoded.
    #[must_use]
    pub fn encoded(mut self) -> Self {
        let index = self.kinds.len().saturating_sub(1);
        match self.params.last_mut() {
            Some(param) if param.owner_index == index && !param.from_aggregate => {
                param.encoded = true;
            }
            _ => self.fail(Error::contract(
                "`encoded` must follow a path, query, header or form parameter",
            )),
        }
        self
    }

    /// Declare an aggregate parameter of type `T`.
    ///
    /// Query fields add `name={variable}` clauses, header fields add
    /// `name: {variable}` templates, path fields must appear in the endpoint
    /// path.
    #[must_use]
    pub fn bean_param<T: Bindable>(mut self) -> Self {
        let index = self.kinds.len();
        for field in T::fields() {
            if field.name.is_empty() {
                self.fail(Error::contract(format!(
                    "aggregate field '{}' at position {index} has an empty name",
                    field.field
                )));
                continue;
            }
            match field.role {
                Role::Query => {
                    if !self.query_names.iter().any(|known| known == field.name) {
                        self.query_names.push(field.name.to_string());
                    }
                }
                Role::Header => {
                    if let Err(err) = check_header_name(field.name) {
                        self.fail(err);
                    }
                    self.header_names.push(field.name.to_string());
                }
                Role::Path | Role::Form => {}
            }
            self.params.push(
                ParamDescriptor::aggregate(field.role, field.name, index).encoded(field.encoded),
            );
        }
        self.kinds.push(ArgumentKind::Aggregate);
        self
    }

    /// Declare the request body.
    #[must_use]
    pub fn body(mut self) -> Self {
        self.kinds.push(ArgumentKind::Body);
        self
    }

    /// Declare an argument that is not part of the request.
    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.kinds.push(ArgumentKind::Ignored);
        self
    }

    /// Build the endpoint.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error: an empty parameter name, an
    /// invalid header name, an empty media type list, a malformed path, or
    /// two parameter names sharing one template variable.
    pub fn build(self) -> Result<Endpoint> {
        if let Some(err) = self.error {
            return Err(err);
        }
        check_variables(&self.params)?;

        let mut uri = join_paths(&self.resource, &self.path);
        stencil_core::Template::parse(&uri)?;
        let existing: Vec<String> = query_keys(&uri).map(str::to_string).collect();
        for name in &self.query_names {
            if existing.iter().any(|key| key == name) {
                continue;
            }
            uri.push(if uri.contains('?') { '&' } else { '?' });
            uri.push_str(&format!("{name}={{{}}}", variable_name(name)));
        }

        let mut headers = self.headers;
        if let Some(value) = self.consumes {
            headers.retain(|(name, _)| !name.eq_ignore_ascii_case(header::CONTENT_TYPE.as_str()));
            headers.push(("Content-Type".to_string(), value));
        }
        if let Some(value) = self.produces {
            headers.retain(|(name, _)| !name.eq_ignore_ascii_case(header::ACCEPT.as_str()));
            headers.push(("Accept".to_string(), value));
        }

        let mut skeleton = RequestSkeleton::new(self.method, uri);
        for (name, value) in headers {
            skeleton.add_header(name, value);
        }
        for name in self.header_names {
            let value = format!("{{{}}}", variable_name(&name));
            skeleton.add_header(name, value);
        }

        debug!(
            method = %self.method,
            uri = %skeleton.uri_template(),
            arguments = self.kinds.len(),
            "endpoint declared"
        );
        Ok(Endpoint::new(
            skeleton,
            Descriptors::new(self.params),
            self.kinds,
            self.decode_slash,
        ))
    }

    fn direct(mut self, role: Role, name: &str) -> Self {
        let index = self.kinds.len();
        if name.is_empty() {
            self.fail(Error::contract(format!(
                "{role} parameter at position {index} has an empty name"
            )));
        }
        self.params.push(ParamDescriptor::direct(role, name, index));
        self.kinds.push(ArgumentKind::Direct(role));
        self
    }

    fn fail(&mut self, err: Error) {
        self.error.get_or_insert(err);
    }
}

/// Join the resource path and the endpoint path, then normalize
/// `{ name : regex }` placeholders to `{name}`.
fn join_paths(resource: &str, path: &str) -> String {
    let mut uri = String::new();
    if !resource.is_empty() {
        if !resource.starts_with('/') {
            uri.push('/');
        }
        uri.push_str(resource.strip_suffix('/').unwrap_or(resource));
    }
    if !path.is_empty() {
        if !path.starts_with('/') && !uri.ends_with('/') {
            uri.push('/');
        }
        uri.push_str(path);
    }
    PATH_PARAMETER.replace_all(&uri, "{${1}}").into_owned()
}

fn query_keys(uri: &str) -> impl Iterator<Item = &str> {
    uri.split_once('?')
        .map(|(_, query)| query)
        .unwrap_or_default()
        .split('&')
        .filter_map(|clause| clause.split('=').next())
        .filter(|key| !key.is_empty())
}

fn media_type_list(kind: &str, media_types: &[&str]) -> Result<String> {
    if media_types.is_empty() || media_types.iter().any(|media| media.trim().is_empty()) {
        return Err(Error::contract(format!("{kind} must list at least one media type")));
    }
    Ok(media_types.join(", "))
}

fn check_variables(params: &[ParamDescriptor]) -> Result<()> {
    let mut seen = BTreeMap::new();
    for param in params.iter().filter(|p| p.role != Role::Form) {
        if let Some(other) = seen.insert(param.variable.as_str(), param.name.as_str())
            && other != param.name
        {
            return Err(Error::contract(format!(
                "parameters '{other}' and '{}' share the template variable '{}'",
                param.name, param.variable
            )));
        }
    }
    Ok(())
}

fn check_header_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::contract("header parameter has an empty name"));
    }
    http::HeaderName::from_bytes(name.as_bytes())
        .map(drop)
        .map_err(|_| Error::contract(format!("invalid header name: {name}")))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use stencil_core::FieldDescriptor;

    use super::*;

    struct Mixed;

    impl Bindable for Mixed {
        fn fields() -> &'static [FieldDescriptor] {
            &[
                FieldDescriptor { role: Role::Path, name: "id2", field: "id2", encoded: false },
                FieldDescriptor { role: Role::Query, name: "param2", field: "param2", encoded: false },
                FieldDescriptor { role: Role::Header, name: "header2", field: "header2", encoded: true },
            ]
        }

        fn value(&self, _name: &str) -> Option<String> {
            None
        }
    }

    struct Traced;

    impl Bindable for Traced {
        fn fields() -> &'static [FieldDescriptor] {
            &[FieldDescriptor { role: Role::Header, name: "X-Request-Id", field: "request_id", encoded: false }]
        }

        fn value(&self, _name: &str) -> Option<String> {
            None
        }
    }

    struct Unnamed;

    impl Bindable for Unnamed {
        fn fields() -> &'static [FieldDescriptor] {
            &[FieldDescriptor { role: Role::Query, name: "", field: "value", encoded: false }]
        }

        fn value(&self, _name: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn paths_are_joined_and_normalized() {
        assert_eq!(join_paths("", ""), "");
        assert_eq!(join_paths("query", ""), "/query");
        assert_eq!(join_paths("/query/", "path1"), "/query/path1");
        assert_eq!(join_paths("/query", "/path1"), "/query/path1");
        assert_eq!(join_paths("", "path1/{id1}"), "/path1/{id1}");
        assert_eq!(join_paths("", "/users/{ id : \\d+ }"), "/users/{id}");
        assert_eq!(join_paths("", "/users/{id:[a-z]+}/{ name }"), "/users/{id}/{name}");
    }

    #[test]
    fn query_keys_are_read_from_the_template() {
        let keys: Vec<_> = query_keys("/a?x={x}&flag&y=1").collect();
        assert_eq!(keys, vec!["x", "flag", "y"]);
        assert_eq!(query_keys("/a").count(), 0);
    }

    #[test]
    fn mixed_endpoint() {
        let endpoint = Endpoint::builder(Method::Get, "path1/{id1}/path2/{id2}")
            .resource("/query")
            .path_param("id1")
            .query_param("param1")
            .query_param("param3")
            .bean_param::<Mixed>()
            .header_param("header1")
            .build()
            .expect("valid endpoint");

        check!(endpoint.uri_template() == "/query/path1/{id1}/path2/{id2}?param1={param1}&param3={param3}&param2={param2}");
        check!(endpoint.arity() == 5);
        check!(endpoint.kinds()[3] == ArgumentKind::Aggregate);
        check!(endpoint.descriptors().len() == 7);
        check!(endpoint.descriptors().is_encoded("header2"));

        let headers = endpoint.skeleton().headers();
        let names: Vec<_> = headers.keys().map(String::as_str).collect();
        check!(names == vec!["header2", "header1"]);
        check!(headers.get("header1") == Some(&vec!["{header1}".to_string()]));
    }

    #[test]
    fn existing_query_clauses_are_not_duplicated() {
        let endpoint = Endpoint::builder(Method::Get, "/search?q={q}")
            .query_param("q")
            .query_param("page")
            .build()
            .expect("valid endpoint");
        check!(endpoint.uri_template() == "/search?q={q}&page={page}");
    }

    #[test]
    fn media_types_become_headers() {
        let endpoint = Endpoint::builder(Method::Post, "/postModel")
            .header("Content-Type", "text/plain")
            .consumes(&["application/json"])
            .produces(&["application/json", "text/plain"])
            .body()
            .build()
            .expect("valid endpoint");

        let headers = endpoint.skeleton().headers();
        check!(headers.len() == 2);
        check!(headers.get("Content-Type") == Some(&vec!["application/json".to_string()]));
        check!(headers.get("Accept") == Some(&vec!["application/json, text/plain".to_string()]));
        check!(endpoint.kinds() == [ArgumentKind::Body]);
    }

    #[test]
    fn empty_names_are_rejected() {
        let_assert!(Err(err) = Endpoint::builder(Method::Get, "/q").query_param("").build());
        check!(err.is_contract());
        check!(err.to_string() == "invalid endpoint contract: query parameter at position 0 has an empty name");

        let_assert!(Err(err) = Endpoint::builder(Method::Get, "/q").bean_param::<Unnamed>().build());
        check!(err.is_contract());

        let_assert!(Err(err) = Endpoint::builder(Method::Get, "/q").header_param("").build());
        check!(err.is_contract());
    }

    #[test]
    fn invalid_declarations_are_rejected() {
        let_assert!(Err(err) = Endpoint::builder(Method::Get, "/q").header_param("bad header").build());
        check!(err.to_string() == "invalid endpoint contract: invalid header name: bad header");

        let_assert!(Err(err) = Endpoint::builder(Method::Get, "/q").produces(&[]).build());
        check!(err.is_contract());

        let_assert!(Err(err) = Endpoint::builder(Method::Get, "/q").encoded().build());
        check!(err.is_contract());

        let_assert!(Err(err) = Endpoint::builder(Method::Get, "/q/{id").build());
        check!(err.is_template());
    }

    #[test]
    fn hyphenated_names_get_template_variables() {
        let endpoint = Endpoint::builder(Method::Get, "/search")
            .query_param("page-size")
            .header_param("X-Api-Key")
            .bean_param::<Traced>()
            .build()
            .expect("valid endpoint");

        check!(endpoint.uri_template() == "/search?page-size={page_size}");
        let headers = endpoint.skeleton().headers();
        check!(headers.get("X-Api-Key") == Some(&vec!["{X_Api_Key}".to_string()]));
        check!(headers.get("X-Request-Id") == Some(&vec!["{X_Request_Id}".to_string()]));
        let variables: Vec<_> = endpoint.descriptors().params().iter().map(|p| p.variable.as_str()).collect();
        check!(variables == vec!["page_size", "X_Api_Key", "X_Request_Id"]);
    }

    #[test]
    fn clashing_variables_are_rejected() {
        let_assert!(
            Err(err) = Endpoint::builder(Method::Get, "/q")
                .query_param("page-size")
                .query_param("page_size")
                .build()
        );
        check!(err.to_string() == "invalid endpoint contract: parameters 'page-size' and 'page_size' share the template variable 'page_size'");
    }

    #[test]
    fn encoded_marks_the_last_parameter() {
        let endpoint = Endpoint::builder(Method::Get, "/q")
            .query_param("raw")
            .encoded()
            .query_param("plain")
            .build()
            .expect("valid endpoint");
        check!(endpoint.descriptors().is_encoded("raw"));
        check!(!endpoint.descriptors().is_encoded("plain"));
    }
}
