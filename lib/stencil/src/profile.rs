//! Encoding profiles.

use stencil_core::{
    AggregateEncoder, Argument, BodyEncoder, DefaultEncoder, Request, RequestSkeleton, Result,
    header,
};
use tracing::debug;

use crate::invocation::{bind_direct, check_arguments};
use crate::{EncoderConfig, Endpoint};

/// An [`EncoderConfig`] together with the body encoder plain values are
/// delegated to.
///
/// # Example
///
/// ```
/// use stencil::prelude::*;
///
/// # fn main() -> stencil::Result<()> {
/// let profile = Profile::builder()
///     .config(EncoderConfig::builder().no_user_agent().build())
///     .build();
///
/// let endpoint = Endpoint::builder(Method::Get, "/users/{id}").path_param("id").build()?;
/// let skeleton = profile.encode(&endpoint, &[Argument::scalar(42)])?;
///
/// assert_eq!(skeleton.uri_template(), "/users/42");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Profile<E = DefaultEncoder> {
    config: EncoderConfig,
    encoder: AggregateEncoder<E>,
}

impl Profile {
    /// Create a profile builder.
    #[must_use]
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }
}

impl<E: BodyEncoder> Profile<E> {
    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// The aggregate encoder.
    #[must_use]
    pub const fn encoder(&self) -> &AggregateEncoder<E> {
        &self.encoder
    }

    /// Encode one invocation of `endpoint`.
    ///
    /// Default headers and the `User-Agent` are added to the endpoint's
    /// skeleton, direct arguments are substituted, then the aggregate encoder
    /// runs.
    ///
    /// # Errors
    ///
    /// Fails when the arguments do not match the endpoint declaration, on a
    /// malformed template, or when the body encoder fails.
    pub fn encode(&self, endpoint: &Endpoint, arguments: &[Argument<'_>]) -> Result<RequestSkeleton> {
        check_arguments(endpoint.kinds(), arguments)?;

        let mut skeleton = endpoint.skeleton().clone();
        skeleton.set_decode_slash(endpoint.decode_slash().unwrap_or(self.config.decode_slash));
        for (name, value) in &self.config.default_headers {
            add_missing_header(&mut skeleton, name, value);
        }
        if let Some(user_agent) = &self.config.user_agent {
            add_missing_header(&mut skeleton, header::USER_AGENT.as_str(), user_agent);
        }

        debug!(method = %endpoint.method(), uri = %endpoint.uri_template(), "encoding invocation");
        bind_direct(endpoint.descriptors(), arguments, &mut skeleton)?;
        self.encoder
            .encode(endpoint.descriptors(), arguments, &mut skeleton)?;
        Ok(skeleton)
    }

    /// Encode one invocation and build the request relative to `base_url`.
    ///
    /// # Errors
    ///
    /// See [`Profile::encode`]; also fails when the URI cannot be joined to
    /// `base_url`.
    pub fn request(
        &self,
        endpoint: &Endpoint,
        arguments: &[Argument<'_>],
        base_url: &url::Url,
    ) -> Result<Request> {
        let skeleton = self.encode(endpoint, arguments)?;
        Request::from_skeleton(&skeleton, base_url)
    }
}

fn add_missing_header(skeleton: &mut RequestSkeleton, name: &str, value: &str) {
    let declared = skeleton
        .headers()
        .keys()
        .any(|known| known.eq_ignore_ascii_case(name));
    if !declared {
        skeleton.add_header(name, value);
    }
}

/// Builder for [`Profile`].
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder<E = DefaultEncoder> {
    config: Option<EncoderConfig>,
    encoder: E,
}

impl<E: BodyEncoder> ProfileBuilder<E> {
    /// Set the configuration.
    #[must_use]
    pub fn config(mut self, config: EncoderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the body encoder.
    #[must_use]
    pub fn encoder<E2: BodyEncoder>(self, encoder: E2) -> ProfileBuilder<E2> {
        ProfileBuilder {
            config: self.config,
            encoder,
        }
    }

    /// Build the profile.
    #[must_use]
    pub fn build(self) -> Profile<E> {
        Profile {
            config: self.config.unwrap_or_default(),
            encoder: AggregateEncoder::new(self.encoder),
        }
    }
}
