//! Declarative model of an accelerated domain
//!
//! Field names follow the resource schema the plugin host exposes. `Option` fields
//! are either optional-with-default (filled in by
//! [`apply_plan_defaults`](crate::mapper::apply_plan_defaults)) or computed (filled
//! in from the remote snapshot).

use serde::{Deserialize, Serialize};

use super::ListField;

/// `ucloud_cdn_domain` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnDomainModel {
    /// Computed: generated by UCloud on create.
    pub domain_id: Option<String>,
    pub domain: String,
    /// Computed
    pub cname: Option<String>,
    /// Computed
    pub status: Option<String>,
    /// Computed, unix seconds
    pub create_time: Option<i64>,
    pub test_url: String,
    /// `cn`, `abroad` or `all`
    pub area_code: String,
    /// `web`, `stream` or `download`
    pub cdn_type: String,
    /// Service group, defaults to `Default`
    pub tag: Option<String>,
    pub origin_conf: Option<OriginConfigModel>,
    pub cache_conf: Option<CacheConfigModel>,
    pub access_control_conf: Option<AccessControlConfigModel>,
    pub advanced_conf: Option<AdvancedConfigModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginConfigModel {
    pub origin_ip_list: ListField<String>,
    pub origin_host: Option<String>,
    pub origin_port: Option<i64>,
    /// `http` or `https`
    pub origin_protocol: Option<String>,
    /// 0 or 1
    pub origin_follow301: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfigModel {
    pub cache_host: Option<String>,
    pub cache_rule: Vec<CacheRuleModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheRuleModel {
    pub path_pattern: String,
    pub description: Option<String>,
    pub ttl: Option<i64>,
    /// `sec`, `min`, `hour` or `day`
    pub cache_unit: Option<String>,
    pub cache_behavior: bool,
    pub follow_origin_rule: Option<bool>,
}

impl CacheRuleModel {
    /// Catch-all rule injected when no cache rule is configured.
    pub fn catch_all() -> Self {
        Self {
            path_pattern: "/".to_string(),
            description: Some(String::new()),
            ttl: Some(0),
            cache_unit: Some("sec".to_string()),
            cache_behavior: true,
            follow_origin_rule: Some(false),
        }
    }
}

/// Anti-leech rules. `refer_type` 0 = whitelist, 1 = blacklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferConfigModel {
    pub refer_type: Option<i64>,
    pub null_refer: Option<i64>,
    pub refer_list: ListField<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlConfigModel {
    pub ip_blacklist: ListField<String>,
    pub refer_conf: Option<ReferConfigModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfigModel {
    pub http_client_header_list: ListField<String>,
    pub http_origin_header_list: ListField<String>,
    pub http_to_https: Option<bool>,
}
