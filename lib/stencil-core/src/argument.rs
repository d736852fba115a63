//! Call-site argument values.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use crate::{Bindable, Payload, Result};

/// One argument of an endpoint invocation.
///
/// Arguments are positional: the argument at index `i` is described by the
/// descriptors whose `owner_index` is `i`.
pub enum Argument<'a> {
    /// A plain value, `None` when the caller passed nothing.
    Scalar(Option<String>),
    /// A map of strings, sent as a query map or a form.
    Map(&'a BTreeMap<String, String>),
    /// An aggregate whose fields carry several parameters.
    Aggregate(&'a dyn Bindable),
    /// An explicit request body.
    Body(Payload<'a>),
}

impl<'a> Argument<'a> {
    /// A present scalar value.
    pub fn scalar(value: impl Display) -> Self {
        Self::Scalar(Some(value.to_string()))
    }

    /// A scalar value that may be missing.
    pub fn optional(value: Option<impl Display>) -> Self {
        Self::Scalar(value.map(|value| value.to_string()))
    }

    /// A missing scalar value.
    #[must_use]
    pub const fn absent() -> Self {
        Self::Scalar(None)
    }

    /// A string map.
    #[must_use]
    pub const fn map(map: &'a BTreeMap<String, String>) -> Self {
        Self::Map(map)
    }

    /// An aggregate value.
    pub fn aggregate<B: Bindable>(value: &'a B) -> Self {
        Self::Aggregate(value)
    }

    /// A plain text body.
    #[must_use]
    pub const fn text(text: &'a str) -> Self {
        Self::Body(Payload::Text(text))
    }

    /// A JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        Ok(Self::Body(Payload::Json(value)))
    }

    /// Whether this is an aggregate.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Self::Aggregate(_) => f.write_str("Aggregate(..)"),
            Self::Body(payload) => f.debug_tuple("Body").field(payload).finish(),
        }
    }
}
