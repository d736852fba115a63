//! Prelude module for convenient imports.
//!
//! ```
//! use stencil_core::prelude::*;
//! ```

pub use crate::{
    AggregateEncoder, Argument, Bindable, Bindings, Body, BodyEncoder, ContentType,
    DefaultEncoder, Descriptors, Error, FieldDescriptor, Method, ParamDescriptor, Payload,
    Request, RequestSkeleton, Result, Role,
};
