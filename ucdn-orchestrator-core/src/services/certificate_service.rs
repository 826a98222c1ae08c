//! 证书服务

use std::sync::Arc;

use ucdn_orchestrator_provider::{AddCertificateRequest, CertificateInfo};

use crate::error::CoreResult;
use crate::retry::{check_ret_code, retry_with_backoff};
use crate::services::ServiceContext;
use crate::types::{CertificateModel, NewCertificate};

/// 清理未使用证书的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// 证书已删除
    Deleted,
    /// 仍有域名在使用
    InUse(usize),
    /// 证书不存在
    NotFound,
    /// 清理失败（仅记录日志，不影响调用方）
    Failed(String),
}

/// 证书服务
pub struct CertificateService {
    ctx: Arc<ServiceContext>,
}

impl CertificateService {
    /// 创建证书服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出账号下所有证书（逐页拉取，直到某页不满）
    pub async fn list(&self) -> CoreResult<Vec<CertificateModel>> {
        Ok(self
            .list_raw()
            .await?
            .into_iter()
            .map(CertificateModel::from_provider)
            .collect())
    }

    /// 上传证书
    pub async fn add(&self, cert: &NewCertificate) -> CoreResult<()> {
        let api = self.ctx.api.as_ref();
        let req = &AddCertificateRequest {
            cert_name: cert.cert_name.clone(),
            user_cert: cert.user_cert.clone(),
            private_key: cert.private_key.clone(),
            ca_cert: cert.ca_cert.clone(),
        };

        retry_with_backoff(&self.ctx.config.mutation, "AddCertificate", || async move {
            let ack = api.add_certificate(req).await?;
            check_ret_code(&ack)
        })
        .await?;

        log::info!("Uploaded certificate {}", cert.cert_name);
        Ok(())
    }

    /// 证书不再被任何域名使用时删除它
    ///
    /// Best effort: failures are logged and reported in the outcome, never returned.
    pub async fn delete_unused(&self, cert_name: &str) -> SweepOutcome {
        let certs = match self.list_raw().await {
            Ok(certs) => certs,
            Err(e) => {
                log::warn!("Failed to list certificates while sweeping {cert_name}: {e}");
                return SweepOutcome::Failed(e.to_string());
            }
        };

        let Some(cert) = certs.iter().find(|c| c.cert_name == cert_name) else {
            log::debug!("Certificate {cert_name} not found, nothing to sweep");
            return SweepOutcome::NotFound;
        };
        if !cert.domains.is_empty() {
            log::debug!(
                "Certificate {cert_name} is still used by {} domain(s)",
                cert.domains.len()
            );
            return SweepOutcome::InUse(cert.domains.len());
        }

        let api = self.ctx.api.as_ref();
        let result = retry_with_backoff(&self.ctx.config.mutation, "DeleteCertificate", || async move {
            let ack = api.delete_certificate(cert_name).await?;
            check_ret_code(&ack)
        })
        .await;

        match result {
            Ok(()) => {
                log::info!("Deleted unused certificate {cert_name}");
                SweepOutcome::Deleted
            }
            Err(e) => {
                log::warn!("Failed to delete unused certificate {cert_name}: {e}");
                SweepOutcome::Failed(e.to_string())
            }
        }
    }

    async fn list_raw(&self) -> CoreResult<Vec<CertificateInfo>> {
        let api = self.ctx.api.as_ref();
        let limit = self.ctx.config.cert_page_size.max(1);
        let mut offset = 0u32;
        let mut certs = Vec::new();

        loop {
            let page = retry_with_backoff(&self.ctx.config.mutation, "GetCertificateV2", || async move {
                let resp = api.list_certificates(offset, limit).await?;
                check_ret_code(&resp)?;
                Ok(resp.cert_list)
            })
            .await?;

            let fetched = page.len();
            certs.extend(page);
            if fetched < limit as usize {
                break;
            }
            offset += limit;
        }

        Ok(certs)
    }
}
