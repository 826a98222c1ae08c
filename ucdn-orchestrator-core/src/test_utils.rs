//! 测试辅助模块
//!
//! 提供可编排响应的 `CdnApi` mock 和便捷的测试工厂方法。

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use ucdn_orchestrator_provider::{
    AddCertificateRequest, ApiAck, CacheAllConfig, CdnApi, CertificateInfo, CreateDomainRequest,
    CreateDomainResponse, CreatedDomain, DomainConfigInfo, GetDomainConfigResponse,
    ListCertificatesResponse, OriginConf, ProviderError, Result, UpdateDomainConfigRequest,
    UpdateHttpsConfigRequest,
};

use crate::config::ReconcileConfig;
use crate::services::ServiceContext;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

// ===== Script =====

/// 按顺序返回预置响应；队列耗尽后返回 fallback（未设置则用 `Default`）
struct Script<T> {
    queue: Mutex<VecDeque<Result<T>>>,
    fallback: Mutex<Option<Result<T>>>,
}

impl<T: Clone + Default> Script<T> {
    fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(None),
        }
    }

    fn push(&self, response: Result<T>) {
        lock(&self.queue).push_back(response);
    }

    fn set_fallback(&self, response: Result<T>) {
        *lock(&self.fallback) = Some(response);
    }

    fn next(&self) -> Result<T> {
        if let Some(response) = lock(&self.queue).pop_front() {
            return response;
        }
        lock(&self.fallback)
            .clone()
            .unwrap_or_else(|| Ok(T::default()))
    }
}

// ===== MockCdnApi =====

/// 记录下来的一次调用
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetDomainConfig(String),
    CreateDomains(CreateDomainRequest),
    UpdateDomainConfig(UpdateDomainConfigRequest),
    UpdateDomainStatus { domain_id: String, status: String },
    UpdateHttpsConfig(UpdateHttpsConfigRequest),
    AddCertificate(String),
    ListCertificates { offset: u32, limit: u32 },
    DeleteCertificate(String),
}

pub struct MockCdnApi {
    calls: Mutex<Vec<ApiCall>>,
    get: Script<GetDomainConfigResponse>,
    create: Script<CreateDomainResponse>,
    update_config: Script<ApiAck>,
    update_status: Script<ApiAck>,
    https: Script<ApiAck>,
    add_cert: Script<ApiAck>,
    list_certs: Script<ListCertificatesResponse>,
    delete_cert: Script<ApiAck>,
}

impl MockCdnApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            get: Script::new(),
            create: Script::new(),
            update_config: Script::new(),
            update_status: Script::new(),
            https: Script::new(),
            add_cert: Script::new(),
            list_certs: Script::new(),
            delete_cert: Script::new(),
        }
    }

    pub fn push_get(&self, response: Result<GetDomainConfigResponse>) {
        self.get.push(response);
    }

    pub fn set_default_get(&self, response: Result<GetDomainConfigResponse>) {
        self.get.set_fallback(response);
    }

    pub fn push_create(&self, response: Result<CreateDomainResponse>) {
        self.create.push(response);
    }

    pub fn push_update_config(&self, response: Result<ApiAck>) {
        self.update_config.push(response);
    }

    pub fn push_update_status(&self, response: Result<ApiAck>) {
        self.update_status.push(response);
    }

    pub fn push_https(&self, response: Result<ApiAck>) {
        self.https.push(response);
    }

    pub fn push_add_cert(&self, response: Result<ApiAck>) {
        self.add_cert.push(response);
    }

    pub fn push_list_certs(&self, response: Result<ListCertificatesResponse>) {
        self.list_certs.push(response);
    }

    pub fn push_delete_cert(&self, response: Result<ApiAck>) {
        self.delete_cert.push(response);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    pub fn get_count(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::GetDomainConfig(_)))
    }

    pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| pred(c)).count()
    }

    /// 所有 HTTPS 配置请求（按调用顺序）
    pub fn https_calls(&self) -> Vec<UpdateHttpsConfigRequest> {
        lock(&self.calls)
            .iter()
            .filter_map(|c| match c {
                ApiCall::UpdateHttpsConfig(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    /// 删除过的证书名
    pub fn deleted_certs(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|c| match c {
                ApiCall::DeleteCertificate(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl CdnApi for MockCdnApi {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn get_domain_config(&self, domain_id: &str) -> Result<GetDomainConfigResponse> {
        self.record(ApiCall::GetDomainConfig(domain_id.to_string()));
        self.get.next()
    }

    async fn create_domains(&self, req: &CreateDomainRequest) -> Result<CreateDomainResponse> {
        self.record(ApiCall::CreateDomains(req.clone()));
        self.create.next()
    }

    async fn update_domain_config(&self, req: &UpdateDomainConfigRequest) -> Result<ApiAck> {
        self.record(ApiCall::UpdateDomainConfig(req.clone()));
        self.update_config.next()
    }

    async fn update_domain_status(&self, domain_id: &str, status: &str) -> Result<ApiAck> {
        self.record(ApiCall::UpdateDomainStatus {
            domain_id: domain_id.to_string(),
            status: status.to_string(),
        });
        self.update_status.next()
    }

    async fn update_https_config(&self, req: &UpdateHttpsConfigRequest) -> Result<ApiAck> {
        self.record(ApiCall::UpdateHttpsConfig(req.clone()));
        self.https.next()
    }

    async fn add_certificate(&self, req: &AddCertificateRequest) -> Result<ApiAck> {
        self.record(ApiCall::AddCertificate(req.cert_name.clone()));
        self.add_cert.next()
    }

    async fn list_certificates(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<ListCertificatesResponse> {
        self.record(ApiCall::ListCertificates { offset, limit });
        self.list_certs.next()
    }

    async fn delete_certificate(&self, cert_name: &str) -> Result<ApiAck> {
        self.record(ApiCall::DeleteCertificate(cert_name.to_string()));
        self.delete_cert.next()
    }
}

// ===== 工厂方法 =====

/// 一个字段齐全的域名快照（列表为空，缓存 host 与域名一致）
pub fn domain_info(domain_id: &str, status: &str) -> DomainConfigInfo {
    DomainConfigInfo {
        domain_id: domain_id.to_string(),
        domain: "cdn.example.com".to_string(),
        area_code: "cn".to_string(),
        cdn_type: "web".to_string(),
        status: status.to_string(),
        cname: format!("{domain_id}.ucloudgda.com"),
        create_time: 1_700_000_000,
        test_url: "http://cdn.example.com/".to_string(),
        tag: "Default".to_string(),
        https_status_cn: "disable".to_string(),
        https_status_abroad: "disable".to_string(),
        origin_conf: OriginConf {
            origin_ip_list: vec!["1.1.1.1".to_string()],
            origin_host: "cdn.example.com".to_string(),
            origin_port: 80,
            origin_protocol: "http".to_string(),
            origin_follow301: 0,
        },
        cache_conf: CacheAllConfig {
            cache_host: "cdn.example.com".to_string(),
            cache_list: Vec::new(),
        },
        ..Default::default()
    }
}

/// 仅含一个域名的成功响应
pub fn listed(info: DomainConfigInfo) -> Result<GetDomainConfigResponse> {
    Ok(GetDomainConfigResponse::with_domains(vec![info]))
}

/// 空列表响应（域名不存在）
pub fn not_listed() -> Result<GetDomainConfigResponse> {
    Ok(GetDomainConfigResponse::with_domains(Vec::new()))
}

/// 单域名创建成功响应
pub fn created(domain_id: &str) -> Result<CreateDomainResponse> {
    Ok(CreateDomainResponse {
        ret_code: 0,
        message: String::new(),
        domain_list: vec![CreatedDomain {
            domain: "cdn.example.com".to_string(),
            domain_id: domain_id.to_string(),
            ret_code: 0,
            message: String::new(),
        }],
    })
}

/// 证书列表的一页
pub fn cert_page(certs: &[(&str, &[&str])]) -> Result<ListCertificatesResponse> {
    Ok(ListCertificatesResponse {
        cert_list: certs
            .iter()
            .map(|(name, domains)| CertificateInfo {
                cert_name: (*name).to_string(),
                domains: domains.iter().map(|d| (*d).to_string()).collect(),
                domain_count: i64::try_from(domains.len()).unwrap(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    })
}

pub fn transient_error() -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: "connection reset".to_string(),
    }
}

/// 使用 mock API 和默认配置创建服务上下文
pub fn create_test_context() -> (Arc<ServiceContext>, Arc<MockCdnApi>) {
    let api = Arc::new(MockCdnApi::new());
    let ctx = Arc::new(ServiceContext::new(api.clone(), ReconcileConfig::default()));
    (ctx, api)
}
