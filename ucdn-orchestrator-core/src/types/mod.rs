//! 类型定义模块

mod certificate;
mod domain;
mod list_field;

pub use certificate::{CertificateModel, NewCertificate, SslAssociationModel};
pub use domain::{
    AccessControlConfigModel, AdvancedConfigModel, CacheConfigModel, CacheRuleModel,
    CdnDomainModel, OriginConfigModel, ReferConfigModel,
};
pub use list_field::ListField;

// Re-export provider 库的公共类型
pub use ucdn_orchestrator_provider::{CertificateInfo, DomainConfigInfo, HttpsStatus};
