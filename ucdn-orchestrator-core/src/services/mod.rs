//! 业务逻辑服务层

mod certificate_service;
mod domain_service;
mod ssl_association_service;

pub use certificate_service::{CertificateService, SweepOutcome};
pub use domain_service::CdnDomainService;
pub use ssl_association_service::{expand_area_code, SslAssociationService};

use std::sync::Arc;

use ucdn_orchestrator_provider::{CdnApi, DomainConfigInfo};

use crate::config::ReconcileConfig;
use crate::error::CoreResult;
use crate::poller;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入具体的 `CdnApi` 实现。
pub struct ServiceContext {
    /// UCDN API
    pub api: Arc<dyn CdnApi>,
    /// 重试与轮询策略
    pub config: ReconcileConfig,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(api: Arc<dyn CdnApi>, config: ReconcileConfig) -> Self {
        Self { api, config }
    }

    /// 获取域名配置快照，域名不存在时返回 `None`
    pub async fn fetch_snapshot(&self, domain_id: &str) -> CoreResult<Option<DomainConfigInfo>> {
        let resp =
            poller::fetch_domain_config(self.api.as_ref(), &self.config.mutation, domain_id)
                .await?;
        Ok(resp.domain_list.into_iter().next())
    }

    /// 等待域名进入目标状态
    pub async fn wait_for_status(&self, domain_id: &str, targets: &[&str]) -> CoreResult<String> {
        poller::wait_for_status(self.api.as_ref(), &self.config, domain_id, targets).await
    }
}
