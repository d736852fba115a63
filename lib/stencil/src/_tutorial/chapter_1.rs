//! # Chapter 1: Aggregate Parameters
//!
//! Bundle several parameters in one struct.
//!
//! ## Deriving `Bindable`
//!
//! Annotate each field with its role. `Option` fields are unset when `None`.
//!
//! ```
//! use stencil::prelude::*;
//!
//! #[derive(Bindable)]
//! struct QueryParams {
//!     #[param(query)]
//!     one: Option<String>,
//!     #[param(query)]
//!     two: Option<String>,
//!     #[param(query)]
//!     three: Option<String>,
//! }
//!
//! # fn main() -> stencil::Result<()> {
//! let endpoint = Endpoint::builder(Method::Get, "/query")
//!     .bean_param::<QueryParams>()
//!     .build()?;
//! assert_eq!(endpoint.uri_template(), "/query?one={one}&two={two}&three={three}");
//!
//! let params = QueryParams { one: Some("a".into()), two: None, three: Some("c".into()) };
//! let skeleton = endpoint.encode(&[Argument::aggregate(&params)])?;
//! assert_eq!(skeleton.resolved_uri(), Some("/query?one=a&three=c"));
//! # Ok(())
//! # }
//! ```
//!
//! Unset fields (and fields set to an empty string) are pruned from the query
//! string. When nothing is left, so is the `?`.
//!
//! ## Headers
//!
//! A header whose values all come out empty is omitted when it is fed by an
//! aggregate. A header fed by a plain argument keeps its declared value.
//!
//! ```
//! use stencil::prelude::*;
//!
//! #[derive(Bindable)]
//! struct HeaderParams {
//!     #[param(header)]
//!     test1: Option<String>,
//!     #[param(header)]
//!     test2: Option<String>,
//! }
//!
//! # fn main() -> stencil::Result<()> {
//! let endpoint = Endpoint::builder(Method::Get, "/headers")
//!     .header("test", "{test1},{test2}")
//!     .bean_param::<HeaderParams>()
//!     .build()?;
//!
//! let some = HeaderParams { test1: Some("x".into()), test2: None };
//! let skeleton = endpoint.encode(&[Argument::aggregate(&some)])?;
//! assert_eq!(skeleton.resolved_header("test"), Some(["x,".to_string()].as_slice()));
//!
//! let none = HeaderParams { test1: None, test2: None };
//! let skeleton = endpoint.encode(&[Argument::aggregate(&none)])?;
//! assert_eq!(skeleton.resolved_header("test"), None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Renaming
//!
//! Give a field an explicit name, or a case convention for the whole struct:
//!
//! ```
//! use stencil::prelude::*;
//!
//! #[derive(Bindable)]
//! #[param(rename_all = "camelCase")]
//! struct Paging {
//!     #[param(query)]
//!     page_size: u32,
//!     #[param(header = "X-Cursor")]
//!     cursor: Option<String>,
//! }
//!
//! # fn main() -> stencil::Result<()> {
//! let endpoint = Endpoint::builder(Method::Get, "/items")
//!     .bean_param::<Paging>()
//!     .build()?;
//! assert_eq!(endpoint.uri_template(), "/items?pageSize={pageSize}");
//!
//! let paging = Paging { page_size: 50, cursor: Some("c1".to_string()) };
//! let skeleton = endpoint.encode(&[Argument::aggregate(&paging)])?;
//! assert_eq!(skeleton.resolved_uri(), Some("/items?pageSize=50"));
//! assert_eq!(skeleton.resolved_header("X-Cursor"), Some(&["c1".to_string()][..]));
//! # Ok(())
//! # }
//! ```
//!
//! Next: [Chapter 2: Bodies & Configuration](super::chapter_2).
