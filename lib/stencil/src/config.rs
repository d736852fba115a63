//! Encoder configuration types.

/// Configuration applied to every request encoded through a
/// [`Profile`](crate::Profile).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Keep `/` in path values instead of encoding it as `%2F`.
    ///
    /// An endpoint can override this with
    /// [`EndpointBuilder::decode_slash`](crate::EndpointBuilder::decode_slash).
    pub decode_slash: bool,
    /// Headers added to every request that does not declare them.
    pub default_headers: Vec<(String, String)>,
    /// `User-Agent` header added when the endpoint does not declare one.
    pub user_agent: Option<String>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            decode_slash: true,
            default_headers: Vec::new(),
            user_agent: Some(format!("stencil/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl EncoderConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> EncoderConfigBuilder {
        EncoderConfigBuilder::default()
    }
}

/// Builder for [`EncoderConfig`].
#[derive(Debug, Clone, Default)]
pub struct EncoderConfigBuilder {
    decode_slash: Option<bool>,
    default_headers: Vec<(String, String)>,
    user_agent: Option<Option<String>>,
}

impl EncoderConfigBuilder {
    /// Set whether `/` in path values is kept.
    #[must_use]
    pub const fn decode_slash(mut self, decode_slash: bool) -> Self {
        self.decode_slash = Some(decode_slash);
        self
    }

    /// Add a default header.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(Some(user_agent.into()));
        self
    }

    /// Do not send a `User-Agent` header.
    #[must_use]
    pub fn no_user_agent(mut self) -> Self {
        self.user_agent = Some(None);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EncoderConfig {
        let defaults = EncoderConfig::default();
        EncoderConfig {
            decode_slash: self.decode_slash.unwrap_or(defaults.decode_slash),
            default_headers: self.default_headers,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EncoderConfig::default();
        assert!(config.decode_slash);
        assert!(config.default_headers.is_empty());
        assert!(
            config
                .user_agent
                .as_deref()
                .is_some_and(|ua| ua.starts_with("stencil/"))
        );
    }

    #[test]
    fn builder_overrides() {
        let config = EncoderConfig::builder()
            .decode_slash(false)
            .default_header("Accept", "application/json")
            .user_agent("my-app/1.0")
            .build();

        assert!(!config.decode_slash);
        assert_eq!(
            config.default_headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
        assert_eq!(config.user_agent.as_deref(), Some("my-app/1.0"));
    }

    #[test]
    fn builder_without_user_agent() {
        let config = EncoderConfig::builder().no_user_agent().build();
        assert_eq!(config.user_agent, None);
    }
}
