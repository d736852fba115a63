//! Parameter descriptors.
//!
//! A descriptor tells the encoder where a call-site argument (or one field of
//! an aggregate argument) ends up in the request. The set of descriptors for
//! an endpoint is built once, when the endpoint is declared, and only read
//! afterwards.

use std::collections::BTreeSet;
use std::fmt;

use crate::variable_name;

/// Where a parameter is sent in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Path parameter (e.g., `/users/{id}`)
    Path,
    /// Query parameter (e.g., `?limit={limit}`)
    Query,
    /// Header parameter
    Header,
    /// Form field (URL-encoded body)
    Form,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Header => write!(f, "header"),
            Self::Form => write!(f, "form"),
        }
    }
}

/// A field declared by an aggregate type.
///
/// This is the static table emitted by `#[derive(Bindable)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Where the field is sent.
    pub role: Role,
    /// The query key, header name, path variable or form field name.
    pub name: &'static str,
    /// The Rust field name, used in diagnostics.
    pub field: &'static str,
    /// The value is already percent-encoded.
    pub encoded: bool,
}

/// Metadata about one template variable of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Where the value is sent.
    pub role: Role,
    /// The query key, header name, path variable or form field name.
    pub name: String,
    /// The template variable the value is bound to, see [`variable_name`].
    pub variable: String,
    /// Position of the call-site argument the value is drawn from.
    pub owner_index: usize,
    /// The value comes from a field of an aggregate argument.
    pub from_aggregate: bool,
    /// The value is already percent-encoded and expands verbatim.
    pub encoded: bool,
}

impl ParamDescriptor {
    /// Descriptor for a top-level argument.
    #[must_use]
    pub fn direct(role: Role, name: impl Into<String>, owner_index: usize) -> Self {
        let name = name.into();
        Self {
            role,
            variable: variable_name(&name),
            name,
            owner_index,
            from_aggregate: false,
            encoded: false,
        }
    }

    /// Descriptor for a field of the aggregate argument at `owner_index`.
    #[must_use]
    pub fn aggregate(role: Role, name: impl Into<String>, owner_index: usize) -> Self {
        Self {
            from_aggregate: true,
            ..Self::direct(role, name, owner_index)
        }
    }

    /// Mark the value as already percent-encoded.
    #[must_use]
    pub const fn encoded(mut self, encoded: bool) -> Self {
        self.encoded = encoded;
        self
    }
}

/// All parameter descriptors of one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptors {
    params: Vec<ParamDescriptor>,
}

impl Descriptors {
    /// Create a descriptor set.
    #[must_use]
    pub fn new(params: Vec<ParamDescriptor>) -> Self {
        Self { params }
    }

    /// Every descriptor, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    /// Descriptors drawn from the argument at `index`.
    pub fn for_argument(&self, index: usize) -> impl Iterator<Item = &ParamDescriptor> {
        self.params.iter().filter(move |p| p.owner_index == index)
    }

    /// Whether the argument at `index` is a top-level path parameter.
    ///
    /// Such arguments are substituted before the encoder runs.
    #[must_use]
    pub fn is_direct_path(&self, index: usize) -> bool {
        self.for_argument(index)
            .any(|p| p.role == Role::Path && !p.from_aggregate)
    }

    /// Whether `name` is declared as an already-encoded variable.
    #[must_use]
    pub fn is_encoded(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.encoded && p.name == name)
    }

    /// Template variables of already-encoded parameters.
    #[must_use]
    pub fn encoded_names(&self) -> BTreeSet<&str> {
        self.params
            .iter()
            .filter(|p| p.encoded)
            .map(|p| p.variable.as_str())
            .collect()
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<ParamDescriptor> for Descriptors {
    fn from_iter<I: IntoIterator<Item = ParamDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
