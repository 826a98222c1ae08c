//! UCloud HTTP request method

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::common::{encode_form, serialize_to_params};
use crate::traits::{ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::sanitize_params;

use super::UcloudClient;

/// Minimal envelope used to detect fatal return codes before full decoding.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "RetCode", default)]
    ret_code: i64,
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

impl UcloudClient {
    /// Execute a UCloud API action (form-encoded POST, signed parameters).
    ///
    /// Non-zero return codes are left in the decoded response for the caller, except
    /// the ones [`is_fatal_ret_code`](Self::is_fatal_ret_code) turns into errors.
    pub(crate) async fn request<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        action: &str,
        params: &B,
    ) -> Result<T> {
        // 1. Flatten request parameters and add the common ones
        let mut form = serialize_to_params(self.provider_name(), params)?;
        form.insert("Action".to_string(), action.to_string());
        form.insert("PublicKey".to_string(), self.public_key.clone());
        for (key, value) in [
            ("ProjectId", &self.project_id),
            ("Region", &self.region),
            ("Zone", &self.zone),
        ] {
            if !value.is_empty() {
                form.insert(key.to_string(), value.clone());
            }
        }

        log::debug!("[{}] Params: {}", self.provider_name(), sanitize_params(&form));

        // 2. Sign (Signature itself is excluded from the signed payload)
        let signature = self.sign(&form);
        form.insert("Signature".to_string(), signature);

        // 3. Send
        let request = self
            .client
            .post(&self.base_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(encode_form(&form));

        let (status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("Action: {action}"),
        )
        .await?;

        // 4. HTTP-level errors: prefer the structured body when there is one
        if status >= 400 {
            if let Ok(envelope) = serde_json::from_str::<Envelope>(&response_text) {
                let message = envelope.message.unwrap_or_default();
                log::error!("API error: {} - {message}", envelope.ret_code);
                return Err(self.map_error(RawApiError::with_code(envelope.ret_code, message)));
            }
            return Err(self.map_error(RawApiError::new(format!(
                "HTTP {status}: {response_text}"
            ))));
        }

        // 5. Parse once into Value, check fatal codes, then convert
        let value: serde_json::Value = HttpUtils::parse_json(&response_text, self.provider_name())?;
        let envelope: Envelope =
            serde_json::from_value(value.clone()).map_err(|e| self.parse_error(e))?;

        if Self::is_fatal_ret_code(envelope.ret_code) {
            let message = envelope.message.unwrap_or_default();
            log::error!("API error: {} - {message}", envelope.ret_code);
            return Err(self.map_error(RawApiError::with_code(envelope.ret_code, message)));
        }
        if envelope.ret_code != 0 {
            log::debug!(
                "[{}] {action} returned RetCode {}: {}",
                self.provider_name(),
                envelope.ret_code,
                envelope.message.as_deref().unwrap_or_default()
            );
        }

        serde_json::from_value(value).map_err(|e| ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        })
    }
}
