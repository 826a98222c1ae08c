//! Generic HTTP client tools
//!
//! Sending, logging and response reading shared by API clients. Signing and
//! envelope parsing stay with each client.
//!
//! No retries happen here: a single call maps to a single HTTP request. Transient
//! failures are reported as retryable [`ProviderError`] variants and the reconciler
//! layer decides whether to resend.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `provider_name` - client name (for logging)
    /// * `method_name` - request method name (such as "POST", used for logs)
    /// * `url_or_action` - URL or Action name (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for every status that is not a known transient one
    /// * `Err(ProviderError::Timeout | NetworkError | RateLimited)` otherwise
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if is_transient_status(status_code) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Transient HTTP {status_code}, retry_after={retry_after:?}");
            return Err(transient_status_error(
                provider_name,
                status_code,
                retry_after,
                body,
            ));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// HTTP 429 and gateway errors: the request never reached the API proper.
fn is_transient_status(status_code: u16) -> bool {
    status_code == 429 || matches!(status_code, 502..=504)
}

fn transient_status_error(
    provider_name: &str,
    status_code: u16,
    retry_after: Option<u64>,
    body: String,
) -> ProviderError {
    if status_code == 429 {
        ProviderError::RateLimited {
            provider: provider_name.to_string(),
            retry_after,
            raw_message: Some(body),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
        }
    }
}
