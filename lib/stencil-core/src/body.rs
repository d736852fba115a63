//! Body serialization and the default body encoder.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    /// The payload bytes.
    pub content: Bytes,
    /// The payload media type.
    pub content_type: ContentType,
}

impl Body {
    /// Create a body.
    #[must_use]
    pub fn new(content: impl Into<Bytes>, content_type: ContentType) -> Self {
        Self {
            content: content.into(),
            content_type,
        }
    }

    /// The payload as UTF-8 text.
    pub fn as_text(&self) -> Result<&str> {
        std::str::from_utf8(&self.content)
            .map_err(|e| crate::Error::encode(format!("body is not valid UTF-8: {e}")))
    }
}

/// A value handed to a [`BodyEncoder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    /// Plain text.
    Text(&'a str),
    /// Raw bytes.
    Bytes(&'a [u8]),
    /// String map, e.g. form fields or a query map.
    Map(&'a BTreeMap<String, String>),
    /// A JSON document.
    Json(serde_json::Value),
}

/// Serializes plain (non-aggregate) values into a request body.
///
/// The aggregate encoder calls this as a black box for form fields, explicit
/// body arguments and query maps.
pub trait BodyEncoder: Send + Sync {
    /// Encode `payload` into a body.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized. The error is
    /// propagated unchanged to the caller of the encode call.
    fn encode(&self, payload: &Payload<'_>) -> Result<Body>;
}

/// Default body encoder.
///
/// - text → `text/plain`
/// - bytes → `application/octet-stream`
/// - map → `application/x-www-form-urlencoded`
/// - JSON → `application/json`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEncoder;

impl BodyEncoder for DefaultEncoder {
    fn encode(&self, payload: &Payload<'_>) -> Result<Body> {
        let body = match payload {
            Payload::Text(text) => {
                Body::new(Bytes::copy_from_slice(text.as_bytes()), ContentType::PlainText)
            }
            Payload::Bytes(bytes) => {
                Body::new(Bytes::copy_from_slice(bytes), ContentType::OctetStream)
            }
            Payload::Map(map) => Body::new(to_form(map)?, ContentType::FormUrlEncoded),
            Payload::Json(value) => Body::new(to_json(value)?, ContentType::Json),
        };
        Ok(body)
    }
}

impl<E: BodyEncoder + ?Sized> BodyEncoder for std::sync::Arc<E> {
    fn encode(&self, payload: &Payload<'_>) -> Result<Body> {
        (**self).encode(payload)
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use stencil_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// # Errors
///
/// Returns an error if form serialization fails.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use stencil_core::to_form;
///
/// let fields = BTreeMap::from([
///     ("password".to_string(), "secret".to_string()),
///     ("username".to_string(), "alice".to_string()),
/// ]);
/// let bytes = to_form(&fields).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"password=secret&username=alice");
/// ```
pub fn to_form<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}
