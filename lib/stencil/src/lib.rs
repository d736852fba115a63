//! Declarative endpoint contracts with aggregate parameters.
//!
//! Declare an endpoint once, then encode each invocation into a request:
//! path, query and header placeholders are filled from plain arguments and
//! from the fields of aggregate (`#[derive(Bindable)]`) arguments. Unset
//! aggregate query fields disappear from the URI instead of leaving an empty
//! `name=` behind, and unset aggregate headers are not sent.
//!
//! # Example
//!
//! ```
//! use stencil::prelude::*;
//!
//! #[derive(Bindable)]
//! struct Filters {
//!     #[param(query)]
//!     one: Option<String>,
//!     #[param(query)]
//!     two: Option<String>,
//! }
//!
//! # fn main() -> stencil::Result<()> {
//! let endpoint = Endpoint::builder(Method::Get, "/query")
//!     .bean_param::<Filters>()
//!     .build()?;
//!
//! let filters = Filters { one: None, two: Some("b".to_string()) };
//! let skeleton = endpoint.encode(&[Argument::aggregate(&filters)])?;
//!
//! assert_eq!(skeleton.resolved_uri(), Some("/query?two=b"));
//! # Ok(())
//! # }
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

pub mod _tutorial;
mod config;
mod contract;
mod endpoint;
mod invocation;
pub mod prelude;
mod profile;

pub use config::{EncoderConfig, EncoderConfigBuilder};
pub use contract::{ArgumentKind, EndpointBuilder};
pub use endpoint::Endpoint;
pub use profile::{Profile, ProfileBuilder};

// Re-export core types
pub use stencil_core::{
    AggregateEncoder, Argument, Bindable, Bindings, Body, BodyEncoder, ContentType,
    DefaultEncoder, Descriptors, EncodingContext, Error, Expander, Expansion, FieldDescriptor,
    Method, ParamDescriptor, Payload, Request, RequestSkeleton, ResolvedHeader, Result, Role,
    Target, Template, TemplateError, TemplateErrorKind, escape_braces, header,
    prune_query_clauses, reconcile_headers, to_form, to_json, unescape_braces, variable_name,
};

// Re-export crates used by the public API
pub use url;

// Re-export macros
pub use stencil_macro::Bindable;
