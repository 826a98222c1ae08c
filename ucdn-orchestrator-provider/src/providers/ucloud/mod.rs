//! UCloud UCDN client

mod error;
mod http;
mod provider;
mod sign;

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::Result;
use crate::providers::common::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client,
};

pub(crate) const UCLOUD_API_BASE_URL: &str = "https://api.ucloud.cn";
pub(crate) const PROVIDER_NAME: &str = "ucloud";

/// UCloud API client implementing [`CdnApi`](crate::CdnApi).
///
/// Authenticates by signing every request with the account's private key.
///
/// # Construction
///
/// ```rust,no_run
/// use ucdn_orchestrator_provider::UcloudClient;
///
/// let client = UcloudClient::builder("public-key", "private-key")
///     .project_id("org-xxxxxx")
///     .build()?;
/// # Ok::<(), ucdn_orchestrator_provider::ProviderError>(())
/// ```
pub struct UcloudClient {
    pub(crate) client: Client,
    pub(crate) public_key: String,
    pub(crate) private_key: String,
    pub(crate) project_id: String,
    pub(crate) region: String,
    pub(crate) zone: String,
    pub(crate) base_url: String,
}

impl std::fmt::Debug for UcloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UcloudClient")
            .field("public_key", &crate::utils::log_sanitizer::mask_secret(&self.public_key))
            .field("project_id", &self.project_id)
            .field("region", &self.region)
            .field("zone", &self.zone)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for [`UcloudClient`].
pub struct UcloudClientBuilder {
    public_key: String,
    private_key: String,
    project_id: String,
    region: String,
    zone: String,
    base_url: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl UcloudClientBuilder {
    fn new(public_key: String, private_key: String) -> Self {
        Self {
            public_key,
            private_key,
            project_id: String::new(),
            region: String::new(),
            zone: String::new(),
            base_url: UCLOUD_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Project the requests are billed to (empty = default project).
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Region sent with every request.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Zone sent with every request.
    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    /// Override the API endpoint (default: `https://api.ucloud.cn`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the [`UcloudClient`] instance.
    pub fn build(self) -> Result<UcloudClient> {
        Ok(UcloudClient {
            client: create_http_client(PROVIDER_NAME, self.connect_timeout, self.request_timeout)?,
            public_key: self.public_key,
            private_key: self.private_key,
            project_id: self.project_id,
            region: self.region,
            zone: self.zone,
            base_url: self.base_url,
        })
    }
}

impl UcloudClient {
    /// Returns a builder for the given key pair.
    pub fn builder(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> UcloudClientBuilder {
        UcloudClientBuilder::new(public_key.into(), private_key.into())
    }

    /// Creates a client from a deserialized provider block.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let mut builder = Self::builder(&config.public_key, &config.private_key)
            .project_id(&config.project_id)
            .region(&config.region)
            .zone(&config.zone);
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// Provider configuration as supplied by the plugin host.
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    pub public_key: String,
    pub private_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("public_key", &crate::utils::log_sanitizer::mask_secret(&self.public_key))
            .field("private_key", &"***")
            .field("project_id", &self.project_id)
            .field("region", &self.region)
            .field("zone", &self.zone)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ProviderConfig = serde_json::from_str(
            r#"{"public_key": "pub", "private_key": "priv", "project_id": "org-1"}"#,
        )
        .unwrap();
        assert_eq!(config.project_id, "org-1");
        assert!(config.region.is_empty());
        assert!(config.base_url.is_none());

        let client = UcloudClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, UCLOUD_API_BASE_URL);
        assert_eq!(client.project_id, "org-1");
    }

    #[test]
    fn config_debug_hides_private_key() {
        let config: ProviderConfig = serde_json::from_str(
            r#"{"public_key": "public-key-value", "private_key": "very-secret"}"#,
        )
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("public-key-value"));
    }
}
