//! # ucdn-orchestrator-provider
//!
//! Typed client for the UCloud UCDN control plane: accelerated domains, their
//! HTTPS settings and the account certificate store.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ucdn_orchestrator_provider::{ApiResponse, CdnApi, UcloudClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UcloudClient::builder("public-key", "private-key")
//!         .project_id("org-xxxxxx")
//!         .build()?;
//!
//!     let resp = client.get_domain_config("ucdn-xxxxxx").await?;
//!     if resp.is_success() {
//!         for domain in &resp.domain_list {
//!             println!("{} ({})", domain.domain, domain.status);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Transport-level failures surface as [`ProviderError`]. Application-level return
//! codes are **not** errors at this layer: every response implements
//! [`ApiResponse`] and the caller decides which codes are acceptable.
//!
//! - [`ProviderError::InvalidCredentials`]: signature rejected (`RetCode` 171)
//! - [`ProviderError::InvalidParameter`]: missing or invalid common parameter (`RetCode` 230)
//! - [`ProviderError::RateLimited`]: HTTP 429 (retryable)
//! - [`ProviderError::NetworkError`]: connectivity issue or 5xx gateway error (retryable)
//!
//! The client never retries on its own; see [`ProviderError::is_retryable`].

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core trait only (internal traits are not exported)
pub use traits::CdnApi;

// Re-export types
pub use types::{
    AccessControlConf, AddCertificateRequest, AdvancedConf, ApiAck, ApiResponse, CacheAllConfig,
    CacheConf, CertificateInfo, CreateDomainCacheConf, CreateDomainConfig, CreateDomainRequest,
    CreateDomainResponse, CreatedDomain, DomainConfigInfo, GetDomainConfigResponse, HttpsStatus,
    ListCertificatesResponse, OriginConf, ReferConf, UpdateAccessControlConfig,
    UpdateAdvancedConfig, UpdateCacheConfig, UpdateCacheRule, UpdateDomainConfig,
    UpdateDomainConfigRequest, UpdateDomainStatusRequest, UpdateHttpsConfigRequest,
    UpdateOriginConfig, UpdateReferConfig,
};

// Re-export log helpers
pub use utils::log_sanitizer;

// Re-export the concrete client
pub use providers::{ProviderConfig, UcloudClient, UcloudClientBuilder};
