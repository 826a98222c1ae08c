//! Certificate related type definitions

use serde::{Deserialize, Serialize};

use ucdn_orchestrator_provider::CertificateInfo;

/// `ucloud_cdn_domain_ssl_association` resource: binds a domain to a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslAssociationModel {
    pub domain_id: String,
    pub ssl_certificate_name: String,
}

/// One entry of the certificate data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateModel {
    pub cert_name: String,
    /// Domains currently using this certificate.
    pub domains: Vec<String>,
}

impl CertificateModel {
    #[must_use]
    pub fn from_provider(info: CertificateInfo) -> Self {
        Self {
            cert_name: info.cert_name,
            domains: info.domains,
        }
    }
}

/// Certificate upload request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCertificate {
    pub cert_name: String,
    /// PEM certificate body
    pub user_cert: String,
    /// PEM private key
    pub private_key: String,
    /// PEM CA chain
    #[serde(default)]
    pub ca_cert: Option<String>,
}

impl std::fmt::Debug for NewCertificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewCertificate")
            .field("cert_name", &self.cert_name)
            .field("private_key", &"***")
            .finish_non_exhaustive()
    }
}
