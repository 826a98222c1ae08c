//! 域名证书关联服务

use std::sync::Arc;

use ucdn_orchestrator_provider::{HttpsStatus, UpdateHttpsConfigRequest};

use crate::error::{CoreError, CoreResult};
use crate::poller::DOMAIN_STATUS_ENABLE;
use crate::retry::{check_ret_code, check_ret_code_except, retry_with_backoff};
use crate::services::{CertificateService, ServiceContext};
use crate::types::SslAssociationModel;

/// HTTPS 已处于关闭状态（仅关闭时忽略）
pub const RET_CODE_HTTPS_ALREADY_DISABLED: i64 = 44996;

const AREA_ALL: &str = "all";
const AREA_ABROAD: &str = "abroad";
const AREA_CN: &str = "cn";

/// 将域名的加速区域展开为 HTTPS 配置需要逐个处理的区域
///
/// `"all"` → `["abroad", "cn"]`，其他值原样返回。
pub fn expand_area_code(area_code: &str) -> Vec<&str> {
    if area_code == AREA_ALL {
        vec![AREA_ABROAD, AREA_CN]
    } else {
        vec![area_code]
    }
}

/// 域名证书关联服务
pub struct SslAssociationService {
    ctx: Arc<ServiceContext>,
    certificates: CertificateService,
}

impl SslAssociationService {
    /// 创建关联服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let certificates = CertificateService::new(Arc::clone(&ctx));
        Self { ctx, certificates }
    }

    /// 为域名开启 HTTPS 并绑定证书
    pub async fn create(&self, plan: SslAssociationModel) -> CoreResult<SslAssociationModel> {
        self.update_https(
            &plan.domain_id,
            HttpsStatus::Enable,
            Some(&plan.ssl_certificate_name),
        )
        .await?;
        log::info!(
            "Bound certificate {} to domain {}",
            plan.ssl_certificate_name,
            plan.domain_id
        );
        Ok(plan)
    }

    /// 读取当前绑定；域名不存在或 HTTPS 已关闭时返回 `None`
    pub async fn read(&self, state: &SslAssociationModel) -> CoreResult<Option<SslAssociationModel>> {
        let Some(info) = self.ctx.fetch_snapshot(&state.domain_id).await? else {
            log::warn!("CDN domain {} no longer exists", state.domain_id);
            return Ok(None);
        };

        if info.https_status_cn == HttpsStatus::Disable.as_str() {
            return Ok(None);
        }

        Ok(Some(SslAssociationModel {
            domain_id: state.domain_id.clone(),
            ssl_certificate_name: info.cert_name_cn,
        }))
    }

    /// 换绑证书，之后清理不再使用的旧证书
    pub async fn update(
        &self,
        plan: SslAssociationModel,
        state: &SslAssociationModel,
    ) -> CoreResult<SslAssociationModel> {
        self.update_https(
            &plan.domain_id,
            HttpsStatus::Enable,
            Some(&plan.ssl_certificate_name),
        )
        .await?;

        if state.ssl_certificate_name != plan.ssl_certificate_name {
            self.certificates
                .delete_unused(&state.ssl_certificate_name)
                .await;
        }

        Ok(plan)
    }

    /// 关闭 HTTPS，之后清理不再使用的证书
    pub async fn delete(&self, state: &SslAssociationModel) -> CoreResult<()> {
        self.update_https(&state.domain_id, HttpsStatus::Disable, None)
            .await?;
        log::info!("Disabled HTTPS for domain {}", state.domain_id);

        self.certificates
            .delete_unused(&state.ssl_certificate_name)
            .await;
        Ok(())
    }

    /// 对域名的每个加速区域依次下发 HTTPS 配置，每个区域完成后等待域名重新可用
    ///
    /// 任一区域失败即中止，已完成的区域不回滚。
    async fn update_https(
        &self,
        domain_id: &str,
        status: HttpsStatus,
        cert_name: Option<&str>,
    ) -> CoreResult<()> {
        let info = self
            .ctx
            .fetch_snapshot(domain_id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(domain_id.to_string()))?;
        if info.area_code.is_empty() {
            return Err(CoreError::ValidationError(format!(
                "domain {domain_id} has no area code"
            )));
        }

        let api = self.ctx.api.as_ref();
        for area in expand_area_code(&info.area_code) {
            let req = &UpdateHttpsConfigRequest {
                domain_id: domain_id.to_string(),
                areacode: area.to_string(),
                https_status: status,
                cert_name: cert_name.map(str::to_string),
            };

            retry_with_backoff(
                &self.ctx.config.mutation,
                "UpdateUcdnDomainHttpsConfig",
                || async move {
                    let ack = api.update_https_config(req).await?;
                    match status {
                        HttpsStatus::Disable => {
                            check_ret_code_except(&ack, &[RET_CODE_HTTPS_ALREADY_DISABLED])
                        }
                        HttpsStatus::Enable => check_ret_code(&ack),
                    }
                },
            )
            .await?;

            log::debug!(
                "HTTPS {} for domain {domain_id} in area {area}",
                status.as_str()
            );
            self.ctx
                .wait_for_status(domain_id, &[DOMAIN_STATUS_ENABLE])
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ucdn_orchestrator_provider::ApiAck;

    use super::*;
    use crate::test_utils::{cert_page, create_test_context, domain_info, listed, not_listed};

    fn association(cert: &str) -> SslAssociationModel {
        SslAssociationModel {
            domain_id: "ucdn-1".to_string(),
            ssl_certificate_name: cert.to_string(),
        }
    }

    fn domain_in(area: &str) -> ucdn_orchestrator_provider::DomainConfigInfo {
        let mut info = domain_info("ucdn-1", "enable");
        info.area_code = area.to_string();
        info
    }

    #[test]
    fn test_expand_area_code() {
        assert_eq!(expand_area_code("all"), vec!["abroad", "cn"]);
        assert_eq!(expand_area_code("cn"), vec!["cn"]);
        assert_eq!(expand_area_code("abroad"), vec!["abroad"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_all_areas_in_order() {
        let (ctx, api) = create_test_context();
        api.set_default_get(listed(domain_in("all")));

        let model = SslAssociationService::new(ctx)
            .create(association("site-2026"))
            .await
            .unwrap();
        assert_eq!(model, association("site-2026"));

        let calls = api.https_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].areacode, "abroad");
        assert_eq!(calls[1].areacode, "cn");
        assert!(calls
            .iter()
            .all(|c| c.https_status == HttpsStatus::Enable
                && c.cert_name.as_deref() == Some("site-2026")));
        // 一次快照 + 每个区域一次轮询
        assert_eq!(api.get_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_single_area() {
        let (ctx, api) = create_test_context();
        api.set_default_get(listed(domain_in("cn")));

        SslAssociationService::new(ctx)
            .create(association("site-2026"))
            .await
            .unwrap();

        let calls = api.https_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].areacode, "cn");
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_area_failure_aborts() {
        let (ctx, api) = create_test_context();
        api.set_default_get(listed(domain_in("all")));
        api.push_https(Ok(ApiAck::ok()));
        api.push_https(Ok(ApiAck::new(44002, "certificate not match domain")));

        let err = SslAssociationService::new(ctx)
            .create(association("site-2026"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("certificate not match domain"));
        let calls = api.https_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].areacode, "abroad");
        assert_eq!(calls[1].areacode, "cn");
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_domain_fails_before_https_call() {
        let (ctx, api) = create_test_context();
        api.push_get(not_listed());

        let err = SslAssociationService::new(ctx)
            .create(association("site-2026"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DomainNotFound(_)));
        assert!(api.https_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_disabled_ignored_on_delete() {
        let (ctx, api) = create_test_context();
        api.set_default_get(listed(domain_in("cn")));
        api.push_https(Ok(ApiAck::new(44996, "https already disabled")));
        api.push_list_certs(cert_page(&[("site-2026", &[])]));

        SslAssociationService::new(ctx)
            .delete(&association("site-2026"))
            .await
            .unwrap();

        let calls = api.https_calls();
        assert_eq!(calls[0].https_status, HttpsStatus::Disable);
        assert_eq!(calls[0].cert_name, None);
        assert_eq!(api.deleted_certs(), vec!["site-2026".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_disabled_fails_on_enable() {
        let (ctx, api) = create_test_context();
        api.set_default_get(listed(domain_in("cn")));
        api.push_https(Ok(ApiAck::new(44996, "https already disabled")));

        let err = SslAssociationService::new(ctx)
            .create(association("site-2026"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Api { ret_code: 44996, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_sweeps_previous_certificate() {
        let (ctx, api) = create_test_context();
        api.set_default_get(listed(domain_in("cn")));
        api.push_list_certs(cert_page(&[("site-2025", &[]), ("site-2026", &["cdn.example.com"])]));

        let model = SslAssociationService::new(ctx)
            .update(association("site-2026"), &association("site-2025"))
            .await
            .unwrap();

        assert_eq!(model.ssl_certificate_name, "site-2026");
        assert_eq!(api.deleted_certs(), vec!["site-2025".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_failure_does_not_fail_delete() {
        let (ctx, api) = create_test_context();
        api.set_default_get(listed(domain_in("cn")));
        api.push_list_certs(cert_page(&[("site-2026", &[])]));
        api.push_delete_cert(Ok(ApiAck::new(8200, "certificate locked")));

        SslAssociationService::new(ctx)
            .delete(&association("site-2026"))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_disabled_https_is_absent() {
        let (ctx, api) = create_test_context();
        api.push_get(listed(domain_in("cn")));

        let result = SslAssociationService::new(ctx)
            .read(&association("site-2026"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_returns_bound_certificate() {
        let (ctx, api) = create_test_context();
        let mut info = domain_in("cn");
        info.https_status_cn = "enable".to_string();
        info.cert_name_cn = "site-2026".to_string();
        api.push_get(listed(info));

        let result = SslAssociationService::new(ctx)
            .read(&association("old-name"))
            .await
            .unwrap();
        assert_eq!(result, Some(association("site-2026")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_missing_domain_is_absent() {
        let (ctx, api) = create_test_context();
        api.push_get(not_listed());

        let result = SslAssociationService::new(ctx)
            .read(&association("site-2026"))
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
