//! UCDN API client implementations

/// Shared utilities used by client implementations.
pub mod common;

mod ucloud;

pub use ucloud::{ProviderConfig, UcloudClient, UcloudClientBuilder};
