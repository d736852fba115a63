//! # Chapter 0: Getting Started
//!
//! Declare an endpoint and turn one call into a request.
//!
//! ## What You'll Learn
//!
//! - Declare an endpoint with [`Endpoint::builder`](crate::Endpoint::builder)
//! - Pass arguments in declaration order
//! - Build a [`Request`](crate::Request) against a base URL
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! stencil = "0.1"
//! ```
//!
//! ## Your First Endpoint
//!
//! Parameters are declared in the order the caller passes them. Path
//! parameters fill `{name}` placeholders, query parameters add `name={name}`
//! clauses, header parameters add a `name: {name}` header. Names that are not
//! plain identifiers bind through [`variable_name`](crate::variable_name):
//! the header `X-Api-Key` is declared as `X-Api-Key: {X_Api_Key}`.
//!
//! ```
//! use stencil::prelude::*;
//!
//! # fn main() -> stencil::Result<()> {
//! let endpoint = Endpoint::builder(Method::Get, "/users/{id}")
//!     .path_param("id")
//!     .query_param("expand")
//!     .build()?;
//!
//! let base_url = "https://api.example.com".parse()?;
//! let request = endpoint.request(&[Argument::scalar(42), Argument::scalar("teams")], &base_url)?;
//!
//! assert_eq!(request.url().as_str(), "https://api.example.com/users/42?expand=teams");
//! # Ok(())
//! # }
//! ```
//!
//! ## Missing Values
//!
//! A plain query argument that is absent still renders its clause, with an
//! empty value:
//!
//! ```
//! # use stencil::prelude::*;
//! # fn main() -> stencil::Result<()> {
//! # let endpoint = Endpoint::builder(Method::Get, "/users/{id}")
//! #     .path_param("id")
//! #     .query_param("expand")
//! #     .build()?;
//! let skeleton = endpoint.encode(&[Argument::scalar(42), Argument::absent()])?;
//! assert_eq!(skeleton.resolved_uri(), Some("/users/42?expand="));
//! # Ok(())
//! # }
//! ```
//!
//! Aggregate parameters behave differently, see
//! [Chapter 1: Aggregate Parameters](super::chapter_1).
