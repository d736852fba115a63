//! Core types for the stencil request encoder.
//!
//! This crate turns the arguments of one endpoint invocation into a resolved
//! request:
//! - [`Template`] and [`Expander`] - `{name}` URI and header templates
//! - [`Bindable`] - aggregate types carrying several parameters
//! - [`Descriptors`] - where each argument (or aggregate field) is sent
//! - [`AggregateEncoder`] - binds aggregates, prunes empty query clauses,
//!   expands and reconciles headers
//! - [`RequestSkeleton`] - the request under construction
//! - [`BodyEncoder`] - serialization of plain values, with [`DefaultEncoder`]
//! - [`Request`] - the final request, relative to a base URL
//! - [`Error`] and [`Result`] - error handling

mod argument;
mod bindings;
mod body;
mod bridge;
mod descriptor;
mod encoder;
mod error;
mod method;
pub mod prelude;
mod prune;
mod reconcile;
mod request;
mod skeleton;
mod template;

pub use argument::Argument;
pub use bindings::{Bindable, Bindings};
pub use body::{Body, BodyEncoder, ContentType, DefaultEncoder, Payload, to_form, to_json};
pub use descriptor::{Descriptors, FieldDescriptor, ParamDescriptor, Role};
pub use encoder::{AggregateEncoder, EncodingContext};
pub use error::{Error, Result, TemplateError, TemplateErrorKind};
pub use method::Method;
pub use prune::prune_query_clauses;
pub use reconcile::{ResolvedHeader, reconcile_headers};
pub use request::Request;
pub use skeleton::RequestSkeleton;
pub use template::{
    Expander, Expansion, Target, Template, escape_braces, unescape_braces, variable_name,
};

// Re-export http crate header names
pub use http::header;
