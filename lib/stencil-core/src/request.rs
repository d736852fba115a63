//! Final HTTP requests.
//!
//! A [`Request`] is what a transport sends: an absolute URL, concrete header
//! values and an optional body. It is built from an encoded
//! [`RequestSkeleton`] and a base URL.
//!
//! # Example
//!
//! ```
//! use stencil_core::{Method, Request, RequestSkeleton};
//!
//! # fn main() -> stencil_core::Result<()> {
//! let skeleton = RequestSkeleton::new(Method::Get, "/users/42").with_header("Accept", "application/json");
//! let base_url = "https://api.example.com".parse()?;
//!
//! let request = Request::from_skeleton(&skeleton, &base_url)?;
//! assert_eq!(request.url().as_str(), "https://api.example.com/users/42");
//! assert_eq!(request.header("Accept"), Some("application/json"));
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use indexmap::IndexMap;
use tracing::trace;

use crate::{ContentType, Method, RequestSkeleton, ResolvedHeader, Result, Template, unescape_braces};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: IndexMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Build the request described by `skeleton`, relative to `base_url`.
    ///
    /// Headers that still hold unresolved placeholders (a direct header
    /// argument that was not provided) are dropped. Multiple values of one
    /// header are joined with `, `. When a body is present and no
    /// `Content-Type` was declared, the body's content type is used.
    ///
    /// # Errors
    ///
    /// Fails if the resolved URI cannot be joined to `base_url`.
    pub fn from_skeleton(skeleton: &RequestSkeleton, base_url: &url::Url) -> Result<Self> {
        let uri = skeleton
            .resolved_uri()
            .map_or_else(|| unescape_braces(skeleton.uri_template()), str::to_string);
        let url = base_url.join(&uri)?;

        let mut headers = IndexMap::new();
        match skeleton.resolved_headers() {
            Some(resolved) => {
                for (name, header) in resolved {
                    let values = match header {
                        ResolvedHeader::Expanded(values) => values.clone(),
                        ResolvedHeader::Declared(values) => {
                            values.iter().filter(|v| !is_unresolved(v)).cloned().collect()
                        }
                    };
                    insert_joined(&mut headers, name, &values);
                }
            }
            None => {
                for (name, values) in skeleton.headers() {
                    let values: Vec<_> = values
                        .iter()
                        .filter(|v| !is_unresolved(v))
                        .map(|v| unescape_braces(v))
                        .collect();
                    insert_joined(&mut headers, name, &values);
                }
            }
        }

        let body = skeleton.body().map(|body| {
            let declared = headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(http::header::CONTENT_TYPE.as_str()));
            if !declared {
                headers.insert(
                    http::header::CONTENT_TYPE.to_string(),
                    body.content_type.to_string(),
                );
            }
            body.content.clone()
        });

        trace!(method = %skeleton.method(), %url, "request built");
        Ok(Self {
            method: skeleton.method(),
            url,
            headers,
            body,
        })
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers, in declaration order.
    #[must_use]
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// The media type of the body, when it is one of the known ones.
    #[must_use]
    pub fn content_type(&self) -> Option<ContentType> {
        let value = self
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(http::header::CONTENT_TYPE.as_str()))
            .map(|(_, value)| value)?;
        [
            ContentType::Json,
            ContentType::FormUrlEncoded,
            ContentType::PlainText,
            ContentType::OctetStream,
        ]
        .into_iter()
        .find(|ct| value.starts_with(ct.as_str()))
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, IndexMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

impl TryFrom<Request> for http::Request<Option<Bytes>> {
    type Error = crate::Error;

    fn try_from(request: Request) -> Result<Self> {
        let mut builder = http::Request::builder()
            .method(http::Method::from(request.method))
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
            .body(request.body)
            .map_err(|e| crate::Error::invalid_request(e.to_string()))
    }
}

fn is_unresolved(value: &str) -> bool {
    Template::parse(value).is_ok_and(|template| template.has_variables())
}

fn insert_joined(headers: &mut IndexMap<String, String>, name: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    headers.insert(name.to_string(), values.join(", "));
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::{AggregateEncoder, Argument, Body, DefaultEncoder, Descriptors, ParamDescriptor, Role};

    fn base_url() -> url::Url {
        "https://api.example.com/".parse().expect("valid URL")
    }

    #[test]
    fn unencoded_skeleton_uses_templates() {
        let skeleton = RequestSkeleton::new(Method::Get, "/path1/5?param1=%7Bx%7D")
            .with_header("Accept", "application/json")
            .with_header("header1", "{header1}");
        let request = Request::from_skeleton(&skeleton, &base_url()).expect("request");

        check!(request.url().path() == "/path1/5");
        check!(request.url().query() == Some("param1={x}"));
        check!(request.header("Accept") == Some("application/json"));
        check!(request.header("header1").is_none());
    }

    #[test]
    fn resolved_skeleton_uses_resolution() {
        let descriptors = Descriptors::from_iter([ParamDescriptor::aggregate(Role::Header, "h", 0)]);
        struct H;
        impl crate::Bindable for H {
            fn fields() -> &'static [crate::FieldDescriptor] {
                &[]
            }
            fn value(&self, _name: &str) -> Option<String> {
                Some("v".to_string())
            }
        }
        let mut skeleton = RequestSkeleton::new(Method::Get, "/h")
            .with_header("X-H", "{h}")
            .with_header("X-H", "static");
        AggregateEncoder::<DefaultEncoder>::default()
            .encode(&descriptors, &[Argument::aggregate(&H)], &mut skeleton)
            .expect("encode");

        let request = Request::from_skeleton(&skeleton, &base_url()).expect("request");
        check!(request.header("X-H") == Some("v, static"));
        check!(request.url().as_str() == "https://api.example.com/h");
    }

    #[test]
    fn body_sets_content_type() {
        let mut skeleton = RequestSkeleton::new(Method::Post, "/postModel");
        skeleton.set_body(Some(Body::new("{}", ContentType::Json)));
        let request = Request::from_skeleton(&skeleton, &base_url()).expect("request");

        check!(request.content_type() == Some(ContentType::Json));
        let_assert!(Some(body) = request.body());
        check!(body.as_ref() == b"{}");
    }

    #[test]
    fn declared_content_type_is_kept() {
        let mut skeleton = RequestSkeleton::new(Method::Post, "/postModel")
            .with_header("Content-Type", "text/plain; charset=utf-8");
        skeleton.set_body(Some(Body::new("{}", ContentType::Json)));
        let request = Request::from_skeleton(&skeleton, &base_url()).expect("request");

        check!(request.header("Content-Type") == Some("text/plain; charset=utf-8"));
        check!(request.content_type() == Some(ContentType::PlainText));
    }

    #[test]
    fn into_http_request() {
        let skeleton = RequestSkeleton::new(Method::Delete, "/users/1").with_header("X-Id", "1");
        let request = Request::from_skeleton(&skeleton, &base_url()).expect("request");
        let http_request = http::Request::try_from(request).expect("valid request");

        check!(http_request.method() == http::Method::DELETE);
        check!(http_request.uri() == "https://api.example.com/users/1");
        check!(http_request.headers().get("X-Id").map(|v| v.as_bytes()) == Some(b"1".as_slice()));
    }
}
