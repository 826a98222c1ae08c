//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use ucdn_orchestrator_provider::{
    AddCertificateRequest, ApiResponse, CdnApi, ProviderConfig, UcloudClient,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试证书名称
pub fn generate_test_cert_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("test-{}", &uuid.to_string()[..8])
}

/// 从环境变量构造 provider 配置
pub fn config_from_env() -> Option<ProviderConfig> {
    Some(ProviderConfig {
        public_key: env::var("UCLOUD_PUBLIC_KEY").ok()?,
        private_key: env::var("UCLOUD_PRIVATE_KEY").ok()?,
        project_id: env::var("UCLOUD_PROJECT_ID").unwrap_or_default(),
        region: env::var("UCLOUD_REGION").unwrap_or_default(),
        zone: env::var("UCLOUD_ZONE").unwrap_or_default(),
        base_url: env::var("UCLOUD_BASE_URL").ok(),
        request_timeout_secs: None,
    })
}

/// 测试上下文 - 封装 client 和可选的测试资源
pub struct TestContext {
    pub api: Arc<dyn CdnApi>,
    pub domain_id: Option<String>,
}

impl TestContext {
    /// 创建 UCloud 测试上下文
    pub fn ucloud() -> Option<Self> {
        let config = config_from_env()?;
        let client = UcloudClient::from_config(&config).ok()?;

        Some(Self {
            api: Arc::new(client),
            domain_id: env::var("UCLOUD_TEST_DOMAIN_ID").ok(),
        })
    }

    /// 读取 PEM 文件构造证书上传请求
    pub fn test_certificate(cert_name: &str) -> Option<AddCertificateRequest> {
        let user_cert = std::fs::read_to_string(env::var("UCLOUD_TEST_CERT_FILE").ok()?).ok()?;
        let private_key = std::fs::read_to_string(env::var("UCLOUD_TEST_KEY_FILE").ok()?).ok()?;

        Some(AddCertificateRequest {
            cert_name: cert_name.to_string(),
            user_cert,
            private_key,
            ca_cert: None,
        })
    }

    /// 证书是否存在于证书列表中
    pub async fn certificate_exists(&self, cert_name: &str) -> bool {
        let mut offset = 0;
        loop {
            let Ok(page) = self.api.list_certificates(offset, 10).await else {
                return false;
            };
            if !page.is_success() {
                return false;
            }
            if page.cert_list.iter().any(|c| c.cert_name == cert_name) {
                return true;
            }
            if page.cert_list.len() < 10 {
                return false;
            }
            offset += 10;
        }
    }

    /// 清理测试证书
    pub async fn cleanup_certificate(&self, cert_name: &str) {
        let _ = self.api.delete_certificate(cert_name).await;
    }
}
