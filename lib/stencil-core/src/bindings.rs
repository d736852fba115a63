//! Template variable bindings and the [`Bindable`] capability.

use std::collections::HashMap;
use std::fmt::Display;

use crate::FieldDescriptor;

/// Types that bundle several named request parameters.
///
/// This replaces runtime introspection of "bean" types: the field table is
/// declared statically (usually by `#[derive(Bindable)]`) and the encoder
/// asks for each declared name's current value.
///
/// # Example
///
/// ```
/// use stencil_core::{Bindable, FieldDescriptor, Role};
///
/// struct Paging {
///     page: Option<u32>,
/// }
///
/// impl Bindable for Paging {
///     fn fields() -> &'static [FieldDescriptor] {
///         &[FieldDescriptor { role: Role::Query, name: "page", field: "page", encoded: false }]
///     }
///
///     fn value(&self, name: &str) -> Option<String> {
///         match name {
///             "page" => self.page.map(|page| page.to_string()),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Paging { page: Some(2) }.value("page").as_deref(), Some("2"));
/// ```
pub trait Bindable {
    /// The declared fields, in declaration order.
    fn fields() -> &'static [FieldDescriptor]
    where
        Self: Sized;

    /// The current value bound to `name`, or `None` when the field is unset.
    fn value(&self, name: &str) -> Option<String>;
}

/// Variable name to value mapping used for one expansion.
///
/// A name that is not bound is *absent*; it is distinct from a name bound to
/// the empty string only for query pruning, both render as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    /// Create empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to the textual form of `value`.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Display) {
        self.values.insert(name.into(), value.to_string());
    }

    /// The value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether `name` is absent or bound to the empty string.
    #[must_use]
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).is_none_or(str::is_empty)
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound names and values, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (name, value) in iter {
            bindings.bind(name, value);
        }
        bindings
    }
}
