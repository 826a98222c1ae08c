use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    AddCertificateRequest, ApiAck, CreateDomainRequest, CreateDomainResponse,
    GetDomainConfigResponse, ListCertificatesResponse, UpdateDomainConfigRequest,
    UpdateHttpsConfigRequest,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// `RetCode`，HTTP 层错误时为空
    pub code: Option<i64>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }
}

/// 错误映射 Trait（内部使用）
/// 将传输层 / 鉴权类原始错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// UCDN control-plane RPC surface.
///
/// Every method performs exactly one remote call. `Err` means the call produced no
/// usable response (transport failure, rejected credentials, undecodable body);
/// `Ok` responses still carry an application return code that the caller must check.
/// Retrying is the caller's business: implementations never retry on their own.
#[async_trait]
pub trait CdnApi: Send + Sync {
    /// 标识符
    fn id(&self) -> &'static str;

    /// `GetUcdnDomainConfig`: snapshot of a single domain. An empty list means the
    /// domain does not exist (or has been deleted).
    async fn get_domain_config(&self, domain_id: &str) -> Result<GetDomainConfigResponse>;

    /// `BatchCreateNewUcdnDomain`
    async fn create_domains(&self, req: &CreateDomainRequest) -> Result<CreateDomainResponse>;

    /// `UpdateUcdnDomainConfig`
    async fn update_domain_config(&self, req: &UpdateDomainConfigRequest) -> Result<ApiAck>;

    /// `UpdateUcdnDomainStatus`
    async fn update_domain_status(&self, domain_id: &str, status: &str) -> Result<ApiAck>;

    /// `UpdateUcdnDomainHttpsConfig` for one area code.
    async fn update_https_config(&self, req: &UpdateHttpsConfigRequest) -> Result<ApiAck>;

    /// `AddCertificate`
    async fn add_certificate(&self, req: &AddCertificateRequest) -> Result<ApiAck>;

    /// `GetCertificateV2` (one page)
    async fn list_certificates(&self, offset: u32, limit: u32)
    -> Result<ListCertificatesResponse>;

    /// `DeleteCertificate`
    async fn delete_certificate(&self, cert_name: &str) -> Result<ApiAck>;
}
