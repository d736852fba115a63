//! Declared endpoints.

use std::sync::Arc;

use stencil_core::{Argument, DefaultEncoder, Descriptors, Method, Request, RequestSkeleton, Result};

use crate::contract::{ArgumentKind, EndpointBuilder};
use crate::Profile;

/// A declared endpoint: the request skeleton every invocation starts from and
/// the descriptors of its arguments.
///
/// Endpoints are immutable once built and cheap to clone; they can be shared
/// between threads and encoded concurrently.
#[derive(Debug, Clone)]
pub struct Endpoint {
    skeleton: RequestSkeleton,
    descriptors: Arc<Descriptors>,
    kinds: Arc<[ArgumentKind]>,
    decode_slash: Option<bool>,
}

impl Endpoint {
    /// Start declaring an endpoint.
    #[must_use]
    pub fn builder(method: Method, path: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder::new(method, path)
    }

    pub(crate) fn new(
        skeleton: RequestSkeleton,
        descriptors: Descriptors,
        kinds: Vec<ArgumentKind>,
        decode_slash: Option<bool>,
    ) -> Self {
        Self {
            skeleton,
            descriptors: Arc::new(descriptors),
            kinds: kinds.into(),
            decode_slash,
        }
    }

    /// The HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.skeleton.method()
    }

    /// The declared URI template.
    #[must_use]
    pub fn uri_template(&self) -> &str {
        self.skeleton.uri_template()
    }

    /// The request skeleton each invocation starts from.
    #[must_use]
    pub const fn skeleton(&self) -> &RequestSkeleton {
        &self.skeleton
    }

    /// The parameter descriptors.
    #[must_use]
    pub fn descriptors(&self) -> &Descriptors {
        &self.descriptors
    }

    /// The expected kind of each argument.
    #[must_use]
    pub fn kinds(&self) -> &[ArgumentKind] {
        &self.kinds
    }

    /// Number of call-site arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.kinds.len()
    }

    /// Slash handling declared on the endpoint, if any.
    #[must_use]
    pub const fn decode_slash(&self) -> Option<bool> {
        self.decode_slash
    }

    /// Encode one invocation with the default [`Profile`].
    ///
    /// # Errors
    ///
    /// See [`Profile::encode`].
    pub fn encode(&self, arguments: &[Argument<'_>]) -> Result<RequestSkeleton> {
        Profile::<DefaultEncoder>::default().encode(self, arguments)
    }

    /// Encode one invocation with the default [`Profile`] and build the
    /// request relative to `base_url`.
    ///
    /// # Errors
    ///
    /// See [`Profile::request`].
    pub fn request(&self, arguments: &[Argument<'_>], base_url: &url::Url) -> Result<Request> {
        Profile::<DefaultEncoder>::default().request(self, arguments, base_url)
    }
}
