//! 域名状态轮询
//!
//! Polls `GetUcdnDomainConfig` until the domain reaches one of the awaited statuses.
//! An empty listing always ends the poll and reports [`DOMAIN_STATUS_DELETE`],
//! whatever statuses were requested.

use ucdn_orchestrator_provider::{CdnApi, GetDomainConfigResponse};

use crate::config::{ReconcileConfig, RetryPolicy};
use crate::error::{CoreError, CoreResult};
use crate::retry::{check_ret_code, retry_with_backoff, RetryError};

pub const DOMAIN_STATUS_ENABLE: &str = "enable";
/// Not a real status: the domain is absent from the listing.
pub const DOMAIN_STATUS_DELETE: &str = "delete";
pub const DOMAIN_STATUS_CHECK_FAIL: &str = "checkFail";

/// Fetch the configuration snapshot of one domain (retried with `policy`).
pub async fn fetch_domain_config(
    api: &dyn CdnApi,
    policy: &RetryPolicy,
    domain_id: &str,
) -> CoreResult<GetDomainConfigResponse> {
    retry_with_backoff(policy, "GetUcdnDomainConfig", || async move {
        let resp = api.get_domain_config(domain_id).await?;
        check_ret_code(&resp)?;
        Ok(resp)
    })
    .await
}

/// Wait until `domain_id` is in one of `targets`, returning the final status.
///
/// Each poll fetches through `config.mutation`. A fetch that exhausts that budget
/// or fails with a retryable provider error is just another failed poll, so an
/// outage never ends the wait; only permanent fetch failures (non-zero RetCode,
/// rejected credentials) do. A listed domain in any other status is retried too.
/// The outer loop runs under `config.status_poll`, which has no elapsed cap by
/// default.
///
/// All failures collapse into [`CoreError::StatusNotReached`]; the reason is
/// logged before it is dropped.
pub async fn wait_for_status(
    api: &dyn CdnApi,
    config: &ReconcileConfig,
    domain_id: &str,
    targets: &[&str],
) -> CoreResult<String> {
    let mutation = &config.mutation;

    let result = retry_with_backoff(&config.status_poll, "wait_for_status", || async move {
        let resp = fetch_domain_config(api, mutation, domain_id)
            .await
            .map_err(classify_fetch_error)?;

        let Some(info) = resp.domain_list.first() else {
            return Ok(DOMAIN_STATUS_DELETE.to_string());
        };
        if targets.contains(&info.status.as_str()) {
            Ok(info.status.clone())
        } else {
            Err(RetryError::Transient(CoreError::UnexpectedStatus {
                domain_id: domain_id.to_string(),
                status: info.status.clone(),
            }))
        }
    })
    .await;

    match result {
        Ok(status) => {
            log::debug!("Domain {domain_id} reached status {status}");
            Ok(status)
        }
        Err(e) => {
            log::warn!("Waiting for domain {domain_id} to reach {targets:?} failed: {e}");
            Err(CoreError::StatusNotReached)
        }
    }
}

fn classify_fetch_error(err: CoreError) -> RetryError {
    let transient = match &err {
        CoreError::RetryExhausted { .. } => true,
        CoreError::Provider(e) => e.is_retryable(),
        _ => false,
    };
    if transient {
        RetryError::Transient(err)
    } else {
        RetryError::Permanent(err)
    }
}
