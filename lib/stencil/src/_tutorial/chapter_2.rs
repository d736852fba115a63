//! # Chapter 2: Bodies & Configuration
//!
//! ## Form Fields
//!
//! Form parameters, plain or from an aggregate, are collected and encoded
//! as `application/x-www-form-urlencoded`:
//!
//! ```
//! use stencil::prelude::*;
//!
//! #[derive(Bindable)]
//! struct Login {
//!     #[param(form)]
//!     username: String,
//!     #[param(form)]
//!     password: String,
//! }
//!
//! # fn main() -> stencil::Result<()> {
//! let endpoint = Endpoint::builder(Method::Post, "/login")
//!     .bean_param::<Login>()
//!     .build()?;
//!
//! let login = Login { username: "alice".into(), password: "s3cret".into() };
//! let skeleton = endpoint.encode(&[Argument::aggregate(&login)])?;
//!
//! let body = skeleton.body().expect("form body");
//! assert_eq!(body.content_type, ContentType::FormUrlEncoded);
//! assert_eq!(body.as_text()?, "password=s3cret&username=alice");
//! # Ok(())
//! # }
//! ```
//!
//! ## Query Maps
//!
//! A lone map argument fills the first query placeholder with its form
//! encoding:
//!
//! ```
//! use std::collections::BTreeMap;
//! use stencil::prelude::*;
//!
//! # fn main() -> stencil::Result<()> {
//! let endpoint = Endpoint::builder(Method::Get, "/mapQueryParam")
//!     .query_param("map")
//!     .build()?;
//!
//! let map = BTreeMap::from([("k1".to_string(), "v1".to_string())]);
//! let skeleton = endpoint.encode(&[Argument::map(&map)])?;
//! assert_eq!(skeleton.resolved_uri(), Some("/mapQueryParam?map=k1%3Dv1"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Profiles
//!
//! A [`Profile`](crate::Profile) carries an [`EncoderConfig`](crate::EncoderConfig)
//! and the [`BodyEncoder`](crate::BodyEncoder) used for bodies, forms and
//! query maps:
//!
//! ```
//! use stencil::prelude::*;
//!
//! # fn main() -> stencil::Result<()> {
//! let profile = Profile::builder()
//!     .config(
//!         EncoderConfig::builder()
//!             .decode_slash(false)
//!             .default_header("Accept", "application/json")
//!             .user_agent("my-app/1.0")
//!             .build(),
//!     )
//!     .build();
//!
//! let endpoint = Endpoint::builder(Method::Get, "/files/{path}")
//!     .path_param("path")
//!     .build()?;
//! let skeleton = profile.encode(&endpoint, &[Argument::scalar("a/b")])?;
//!
//! assert_eq!(skeleton.uri_template(), "/files/a%2Fb");
//! assert_eq!(skeleton.headers()["Accept"], vec!["application/json".to_string()]);
//! # Ok(())
//! # }
//! ```
