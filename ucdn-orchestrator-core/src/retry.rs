//! Retry utilities with exponential backoff and jitter.
//!
//! Every remote call goes through [`retry_with_backoff`]. The operation decides how
//! each failure is classified:
//!
//! - [`RetryError::Transient`]: sleep and resend (transport failures, throttling,
//!   domains still converging)
//! - [`RetryError::Permanent`]: stop immediately and return the error
//!
//! ```ignore
//! let resp = retry_with_backoff(&config.mutation, "DeleteCertificate", || async move {
//!     let ack = api.delete_certificate(name).await?;
//!     check_ret_code(&ack)?;
//!     Ok(ack)
//! })
//! .await?;
//! ```

use std::future::Future;

use tokio::time::Instant;
use ucdn_orchestrator_provider::{ApiResponse, ProviderError};

use crate::config::RetryPolicy;
use crate::error::{CoreError, CoreResult};

/// Classified failure of a single attempt.
#[derive(Debug)]
pub enum RetryError {
    /// May succeed if resent.
    Transient(CoreError),
    /// Retrying cannot help.
    Permanent(CoreError),
}

impl RetryError {
    pub fn into_inner(self) -> CoreError {
        match self {
            Self::Transient(e) | Self::Permanent(e) => e,
        }
    }
}

impl From<ProviderError> for RetryError {
    fn from(err: ProviderError) -> Self {
        if err.is_retryable() {
            Self::Transient(CoreError::Provider(err))
        } else {
            Self::Permanent(CoreError::Provider(err))
        }
    }
}

/// Non-zero return code → permanent [`CoreError::Api`] carrying the response message.
pub fn check_ret_code<R: ApiResponse>(resp: &R) -> Result<(), RetryError> {
    if resp.is_success() {
        Ok(())
    } else {
        Err(RetryError::Permanent(CoreError::api(
            resp.ret_code(),
            resp.message(),
        )))
    }
}

/// Like [`check_ret_code`], but treats the listed codes as success.
pub fn check_ret_code_except<R: ApiResponse>(resp: &R, ignored: &[i64]) -> Result<(), RetryError> {
    if ignored.contains(&resp.ret_code()) {
        log::debug!(
            "Ignoring RetCode {}: {}",
            resp.ret_code(),
            resp.message()
        );
        return Ok(());
    }
    check_ret_code(resp)
}

/// Execute an async operation with exponential backoff and jitter.
///
/// Returns the first success, the first permanent error, or
/// [`CoreError::RetryExhausted`] once sleeping again would cross
/// `policy.max_elapsed`.
pub async fn retry_with_backoff<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> CoreResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RetryError>>,
{
    let start = Instant::now();
    let mut interval = policy.initial_interval;
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(RetryError::Permanent(e)) => return Err(e),
            Err(RetryError::Transient(e)) => e,
        };

        let delay = policy.randomize(interval);
        if let Some(max_elapsed) = policy.max_elapsed {
            if start.elapsed() + delay > max_elapsed {
                log::warn!(
                    "[{operation_name}] giving up after {attempt} attempts ({:?} elapsed): {err}",
                    start.elapsed()
                );
                return Err(CoreError::RetryExhausted {
                    operation: operation_name.to_string(),
                    attempts: attempt,
                    last_error: err.to_string(),
                });
            }
        }

        log::warn!("[{operation_name}] attempt {attempt} failed: {err}, retrying in {delay:?}");
        tokio::time::sleep(delay).await;
        interval = policy.next_interval(interval);
    }
}
