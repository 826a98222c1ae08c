//! UCloud CdnApi trait 实现

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::traits::{CdnApi, ProviderErrorMapper};
use crate::types::{
    AddCertificateRequest, ApiAck, CreateDomainRequest, CreateDomainResponse,
    GetDomainConfigResponse, ListCertificatesResponse, UpdateDomainConfigRequest,
    UpdateDomainStatusRequest, UpdateHttpsConfigRequest,
};

use super::UcloudClient;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DomainIdsParams<'a> {
    domain_id: [&'a str; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PageParams {
    offset: u32,
    limit: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CertNameParams<'a> {
    cert_name: &'a str,
}

#[async_trait]
impl CdnApi for UcloudClient {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    async fn get_domain_config(&self, domain_id: &str) -> Result<GetDomainConfigResponse> {
        self.request(
            "GetUcdnDomainConfig",
            &DomainIdsParams {
                domain_id: [domain_id],
            },
        )
        .await
    }

    async fn create_domains(&self, req: &CreateDomainRequest) -> Result<CreateDomainResponse> {
        self.request("BatchCreateNewUcdnDomain", req).await
    }

    async fn update_domain_config(&self, req: &UpdateDomainConfigRequest) -> Result<ApiAck> {
        self.request("UpdateUcdnDomainConfig", req).await
    }

    async fn update_domain_status(&self, domain_id: &str, status: &str) -> Result<ApiAck> {
        let req = UpdateDomainStatusRequest {
            domain_id: domain_id.to_string(),
            status: status.to_string(),
            is_dcdn: false,
        };
        self.request("UpdateUcdnDomainStatus", &req).await
    }

    async fn update_https_config(&self, req: &UpdateHttpsConfigRequest) -> Result<ApiAck> {
        self.request("UpdateUcdnDomainHttpsConfig", req).await
    }

    async fn add_certificate(&self, req: &AddCertificateRequest) -> Result<ApiAck> {
        self.request("AddCertificate", req).await
    }

    async fn list_certificates(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<ListCertificatesResponse> {
        self.request("GetCertificateV2", &PageParams { offset, limit })
            .await
    }

    async fn delete_certificate(&self, cert_name: &str) -> Result<ApiAck> {
        self.request("DeleteCertificate", &CertNameParams { cert_name })
            .await
    }
}
