//! 加速域名管理服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::mapper::{
    apply_plan_defaults, apply_snapshot, build_create_request, build_update_request,
    copy_computed_fields, model_from_snapshot, validate,
};
use crate::poller::{DOMAIN_STATUS_CHECK_FAIL, DOMAIN_STATUS_DELETE, DOMAIN_STATUS_ENABLE};
use crate::retry::{check_ret_code, check_ret_code_except, retry_with_backoff, RetryError};
use crate::services::ServiceContext;
use crate::types::CdnDomainModel;

/// 配置未变化（更新时忽略）
pub const RET_CODE_CONFIG_UNCHANGED: i64 = 44015;

/// 加速域名管理服务
pub struct CdnDomainService {
    ctx: Arc<ServiceContext>,
}

impl CdnDomainService {
    /// 创建域名服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 创建加速域名，等待其可用后返回完整状态
    pub async fn create(&self, plan: CdnDomainModel) -> CoreResult<CdnDomainModel> {
        let mut model = plan;
        apply_plan_defaults(&mut model);
        validate(&model)?;

        let api = self.ctx.api.as_ref();
        let req = &build_create_request(&model)?;

        let domain_id = retry_with_backoff(
            &self.ctx.config.mutation,
            "BatchCreateNewUcdnDomain",
            || async move {
                let resp = api.create_domains(req).await?;
                check_ret_code(&resp)?;

                let Some(created) = resp.domain_list.first() else {
                    return Err(RetryError::Permanent(CoreError::EmptyResponse(
                        "domain list is empty".to_string(),
                    )));
                };
                if created.ret_code != 0 {
                    return Err(RetryError::Permanent(CoreError::api(
                        created.ret_code,
                        created.message.clone(),
                    )));
                }
                Ok(created.domain_id.clone())
            },
        )
        .await?;

        log::info!("Created CDN domain {} as {domain_id}", model.domain);
        model.domain_id = Some(domain_id.clone());

        self.ctx
            .wait_for_status(&domain_id, &[DOMAIN_STATUS_ENABLE, DOMAIN_STATUS_CHECK_FAIL])
            .await?;

        let info = self
            .ctx
            .fetch_snapshot(&domain_id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(domain_id.clone()))?;
        apply_snapshot(&mut model, &info);

        Ok(model)
    }

    /// 刷新状态；域名已不存在时返回 `None`（由宿主从状态中移除）
    pub async fn read(&self, state: &CdnDomainModel) -> CoreResult<Option<CdnDomainModel>> {
        let domain_id = require_domain_id(state)?;

        let Some(info) = self.ctx.fetch_snapshot(domain_id).await? else {
            log::warn!("CDN domain {domain_id} no longer exists");
            return Ok(None);
        };

        let mut model = state.clone();
        apply_snapshot(&mut model, &info);
        Ok(Some(model))
    }

    /// 按 `DomainId` 导入已有域名
    pub async fn import(&self, domain_id: &str) -> CoreResult<CdnDomainModel> {
        let info = self
            .ctx
            .fetch_snapshot(domain_id)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(domain_id.to_string()))?;
        Ok(model_from_snapshot(&info))
    }

    /// 更新域名配置并等待重新可用
    pub async fn update(
        &self,
        plan: CdnDomainModel,
        state: &CdnDomainModel,
    ) -> CoreResult<CdnDomainModel> {
        let mut model = plan;
        apply_plan_defaults(&mut model);
        validate(&model)?;

        let domain_id = require_domain_id(state)?;
        let api = self.ctx.api.as_ref();
        let req = &build_update_request(&model, domain_id);

        retry_with_backoff(
            &self.ctx.config.mutation,
            "UpdateUcdnDomainConfig",
            || async move {
                let ack = api.update_domain_config(req).await?;
                check_ret_code_except(&ack, &[RET_CODE_CONFIG_UNCHANGED])
            },
        )
        .await?;

        copy_computed_fields(&mut model, state);

        let status = self
            .ctx
            .wait_for_status(domain_id, &[DOMAIN_STATUS_ENABLE])
            .await?;
        model.status = Some(status);

        Ok(model)
    }

    /// 删除域名并等待其从列表中消失
    pub async fn delete(&self, state: &CdnDomainModel) -> CoreResult<()> {
        let domain_id = require_domain_id(state)?;
        let api = self.ctx.api.as_ref();

        retry_with_backoff(
            &self.ctx.config.mutation,
            "UpdateUcdnDomainStatus",
            || async move {
                let ack = api
                    .update_domain_status(domain_id, DOMAIN_STATUS_DELETE)
                    .await?;
                check_ret_code(&ack)
            },
        )
        .await?;

        self.ctx
            .wait_for_status(domain_id, &[DOMAIN_STATUS_DELETE])
            .await?;

        log::info!("Deleted CDN domain {domain_id}");
        Ok(())
    }
}

fn require_domain_id(state: &CdnDomainModel) -> CoreResult<&str> {
    state
        .domain_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoreError::ValidationError("domain_id is not set".to_string()))
}
