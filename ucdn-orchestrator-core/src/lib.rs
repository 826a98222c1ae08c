//! UCDN Orchestrator Core Library
//!
//! Reconciles declarative CDN resources against the UCloud UCDN API:
//! - 加速域名 (`CdnDomainService`): create / read / import / update / delete
//! - 证书关联 (`SslAssociationService`) and certificate listing/cleanup (`CertificateService`)
//! - 重试与状态轮询 (`retry`, `poller`)
//! - 声明式模型 ↔ 远端配置映射 (`mapper`)
//!
//! The remote API is injected as `Arc<dyn CdnApi>` through [`ServiceContext`], so
//! every service can be driven by a mock in tests.

pub mod config;
pub mod error;
pub mod mapper;
pub mod poller;
pub mod retry;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{ReconcileConfig, RetryPolicy};
pub use error::{CoreError, CoreResult};
pub use services::{
    CdnDomainService, CertificateService, ServiceContext, SslAssociationService, SweepOutcome,
};
