//! UCDN API request and response types.
//!
//! Field names follow the UCloud wire format (`PascalCase`). Every response carries
//! the application-level `RetCode` / `Message` pair, independent of transport success;
//! see [`ApiResponse`].

use serde::{Deserialize, Deserializer, Serialize};

// ============ Shared helpers ============

/// Decodes a JSON `null` (or missing field) as `T::default()`.
///
/// UCloud returns `null` for empty lists; callers always see an empty `Vec`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Application-level envelope present on every UCDN response.
pub trait ApiResponse {
    /// Return code; `0` means success.
    fn ret_code(&self) -> i64;

    /// Human-readable message accompanying the return code.
    fn message(&self) -> &str;

    /// Whether the return code signals success.
    fn is_success(&self) -> bool {
        self.ret_code() == 0
    }
}

macro_rules! impl_api_response {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ApiResponse for $ty {
                fn ret_code(&self) -> i64 {
                    self.ret_code
                }

                fn message(&self) -> &str {
                    &self.message
                }
            }
        )+
    };
}

/// Response carrying only the common envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiAck {
    /// Return code; `0` means success.
    #[serde(default)]
    pub ret_code: i64,
    /// Message accompanying the return code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Echo of the invoked action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl ApiAck {
    /// Builds an acknowledgement with the given return code.
    pub fn new(ret_code: i64, message: impl Into<String>) -> Self {
        Self {
            ret_code,
            message: message.into(),
            action: None,
        }
    }

    /// Successful acknowledgement.
    pub fn ok() -> Self {
        Self::new(0, "")
    }
}

// ============ Domain configuration snapshot ============

/// Origin settings of an accelerated domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OriginConf {
    #[serde(deserialize_with = "null_as_default")]
    pub origin_ip_list: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub origin_host: String,
    pub origin_port: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub origin_protocol: String,
    pub origin_follow301: i64,
}

/// One cache rule as reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CacheConf {
    #[serde(deserialize_with = "null_as_default")]
    pub path_pattern: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "CacheTTL")]
    pub cache_ttl: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cache_unit: String,
    pub cache_behavior: bool,
    pub follow_origin_rule: bool,
}

/// Cache host plus the ordered list of cache rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CacheAllConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub cache_host: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cache_list: Vec<CacheConf>,
}

/// Referer (anti-leech) rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReferConf {
    pub refer_type: i64,
    pub null_refer: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub refer_list: Vec<String>,
}

/// Access-control settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccessControlConf {
    #[serde(deserialize_with = "null_as_default")]
    pub ip_black_list: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub refer_conf: ReferConf,
}

/// Header rewrites and HTTP→HTTPS redirection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AdvancedConf {
    #[serde(deserialize_with = "null_as_default")]
    pub http_client_header: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub http_origin_header: Vec<String>,
    pub http2_https: bool,
}

/// Full configuration snapshot of one accelerated domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DomainConfigInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub domain_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub area_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cdn_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cname: String,
    pub create_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub test_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub https_status_cn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub https_status_abroad: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cert_name_cn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cert_name_abroad: String,
    #[serde(deserialize_with = "null_as_default")]
    pub origin_conf: OriginConf,
    #[serde(deserialize_with = "null_as_default")]
    pub cache_conf: CacheAllConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub access_control_conf: AccessControlConf,
    #[serde(deserialize_with = "null_as_default")]
    pub advanced_conf: AdvancedConf,
}

/// `GetUcdnDomainConfig` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetDomainConfigResponse {
    #[serde(default)]
    pub ret_code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_list: Vec<DomainConfigInfo>,
}

impl GetDomainConfigResponse {
    /// Successful response listing the given domains.
    pub fn with_domains(domain_list: Vec<DomainConfigInfo>) -> Self {
        Self {
            ret_code: 0,
            message: String::new(),
            domain_list,
        }
    }
}

// ============ Domain creation ============

/// Cache rule accepted by `BatchCreateNewUcdnDomain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDomainCacheConf {
    pub path_pattern: String,
    #[serde(rename = "CacheTTL")]
    pub cache_ttl: i64,
    pub cache_unit: String,
    pub cache_behavior: bool,
}

/// One domain to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDomainConfig {
    pub domain: String,
    pub origin_ip: Vec<String>,
    pub origin_host: String,
    pub test_url: String,
    pub cache_conf: Vec<CreateDomainCacheConf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// `BatchCreateNewUcdnDomain` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDomainRequest {
    pub domain_list: Vec<CreateDomainConfig>,
}

/// Per-domain outcome of a batch create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreatedDomain {
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub domain_id: String,
    pub ret_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

/// `BatchCreateNewUcdnDomain` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDomainResponse {
    #[serde(default)]
    pub ret_code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_list: Vec<CreatedDomain>,
}

// ============ Domain update ============

/// Origin section of an update. `None` / empty fields are left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateOriginConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origin_ip: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_follow301: Option<i64>,
}

/// Referer section of an access-control update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateReferConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refer_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_refer: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub refer_list: Vec<String>,
}

/// Access-control section of an update.
///
/// An empty `ip_black_list` means "leave unchanged" unless `ip_black_list_empty`
/// is set, which clears the remote list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateAccessControlConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip_black_list: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ip_black_list_empty: bool,
    pub refer_conf: UpdateReferConfig,
    #[serde(skip_serializing_if = "is_false")]
    pub enable_refer: bool,
}

/// One cache rule in an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCacheRule {
    pub path_pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "CacheTTL")]
    pub cache_ttl: i64,
    pub cache_unit: String,
    pub cache_behavior: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_origin_rule: Option<bool>,
}

/// Cache section of an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_host: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cache_list: Vec<UpdateCacheRule>,
}

/// Advanced section of an update. Same "empty flag" convention as access control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateAdvancedConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub http_client_header: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub http_client_header_empty: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub http_origin_header: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub http_origin_header_empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2_https: Option<bool>,
}

/// Desired configuration for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDomainConfig {
    pub domain_id: String,
    pub origin_conf: UpdateOriginConfig,
    pub access_control_conf: UpdateAccessControlConfig,
    pub cache_conf: UpdateCacheConfig,
    pub advanced_conf: UpdateAdvancedConfig,
}

/// `UpdateUcdnDomainConfig` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDomainConfigRequest {
    pub domain_list: Vec<UpdateDomainConfig>,
}

/// `UpdateUcdnDomainStatus` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDomainStatusRequest {
    pub domain_id: String,
    pub status: String,
    pub is_dcdn: bool,
}

// ============ HTTPS ============

/// HTTPS switch for one area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpsStatus {
    Enable,
    Disable,
}

impl HttpsStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

/// `UpdateUcdnDomainHttpsConfig` request, scoped to a single area code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateHttpsConfigRequest {
    pub domain_id: String,
    pub areacode: String,
    pub https_status: HttpsStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_name: Option<String>,
}

// ============ Certificates ============

/// `AddCertificate` request.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddCertificateRequest {
    pub cert_name: String,
    pub user_cert: String,
    pub private_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,
}

impl std::fmt::Debug for AddCertificateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddCertificateRequest")
            .field("cert_name", &self.cert_name)
            .field("user_cert", &format_args!("<{} bytes>", self.user_cert.len()))
            .field("private_key", &"***")
            .field("ca_cert", &self.ca_cert.as_ref().map(|_| "<present>"))
            .finish()
    }
}

/// One certificate from the certificate store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CertificateInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub cert_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub domains: Vec<String>,
    pub domain_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub common_name: String,
    pub begin_time: i64,
    pub end_time: i64,
}

/// `GetCertificateV2` response (one page).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCertificatesResponse {
    #[serde(default)]
    pub ret_code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cert_list: Vec<CertificateInfo>,
    #[serde(default)]
    pub total_count: i64,
}

impl_api_response!(
    ApiAck,
    GetDomainConfigResponse,
    CreateDomainResponse,
    ListCertificatesResponse,
);
