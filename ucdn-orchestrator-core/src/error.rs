//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use ucdn_orchestrator_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Domain is absent from the remote listing
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Non-zero application return code
    #[error("{message} (RetCode {ret_code})")]
    Api { ret_code: i64, message: String },

    /// Response was successful but carried no usable payload
    #[error("{0}")]
    EmptyResponse(String),

    /// Elapsed-time budget of a retried operation ran out
    #[error("{operation}: retry budget exhausted after {attempts} attempts (last error: {last_error})")]
    RetryExhausted {
        operation: String,
        attempts: u32,
        last_error: String,
    },

    /// Domain is listed but not yet in one of the awaited statuses
    #[error("unexpected status {status:?} for domain {domain_id}")]
    UnexpectedStatus { domain_id: String, status: String },

    /// Status polling gave up; the underlying reason is only logged
    #[error("fail to reach expected status")]
    StatusNotReached,

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_) | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Api { .. }
            | Self::EmptyResponse(_)
            | Self::RetryExhausted { .. }
            | Self::UnexpectedStatus { .. }
            | Self::StatusNotReached => false,
        }
    }

    /// 将非零返回码包装为错误
    pub(crate) fn api(ret_code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            ret_code,
            message: message.into(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
