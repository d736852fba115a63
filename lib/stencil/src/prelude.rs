//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and macros for easy
//! glob importing:
//!
//! ```
//! use stencil::prelude::*;
//! ```

pub use crate::{
    Argument, Bindable, Body, BodyEncoder, ContentType, DefaultEncoder, EncoderConfig, Endpoint,
    Error, Method, Payload, Profile, Request, RequestSkeleton, Result,
};
