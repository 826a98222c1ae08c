//! Declarative model → remote request

use ucdn_orchestrator_provider::{
    CreateDomainCacheConf, CreateDomainConfig, CreateDomainRequest, UpdateAccessControlConfig,
    UpdateAdvancedConfig, UpdateCacheConfig, UpdateCacheRule, UpdateDomainConfig,
    UpdateDomainConfigRequest, UpdateOriginConfig, UpdateReferConfig,
};

use crate::error::{CoreError, CoreResult};
use crate::types::{
    AccessControlConfigModel, AdvancedConfigModel, CacheConfigModel, CacheRuleModel,
    CdnDomainModel, OriginConfigModel,
};

use super::plan::DEFAULT_CACHE_UNIT;

/// `BatchCreateNewUcdnDomain` request for a single domain.
///
/// Only origin IPs, origin host and cache rules are accepted at creation time; the
/// remaining blocks are applied by a later update.
pub fn build_create_request(model: &CdnDomainModel) -> CoreResult<CreateDomainRequest> {
    let origin = model
        .origin_conf
        .as_ref()
        .ok_or_else(|| CoreError::ValidationError("origin_conf is required".to_string()))?;

    let cache_conf = model
        .cache_conf
        .as_ref()
        .map(|cache| cache.cache_rule.iter().map(create_cache_rule).collect())
        .unwrap_or_default();

    Ok(CreateDomainRequest {
        domain_list: vec![CreateDomainConfig {
            domain: model.domain.clone(),
            origin_ip: origin.origin_ip_list.to_vec(),
            origin_host: origin.origin_host.clone().unwrap_or_default(),
            test_url: model.test_url.clone(),
            cache_conf,
            area_code: Some(model.area_code.clone()),
            cdn_type: Some(model.cdn_type.clone()),
            tag: model.tag.clone(),
        }],
    })
}

fn create_cache_rule(rule: &CacheRuleModel) -> CreateDomainCacheConf {
    CreateDomainCacheConf {
        path_pattern: rule.path_pattern.clone(),
        cache_ttl: rule.ttl.unwrap_or_default(),
        cache_unit: cache_unit(rule),
        cache_behavior: rule.cache_behavior,
    }
}

fn cache_unit(rule: &CacheRuleModel) -> String {
    rule.cache_unit
        .clone()
        .unwrap_or_else(|| DEFAULT_CACHE_UNIT.to_string())
}

/// `UpdateUcdnDomainConfig` request.
///
/// Absent blocks leave the remote section untouched. Inside a block, an
/// explicitly empty list sets the matching `*Empty` flag so the remote list is
/// cleared instead of kept.
pub fn build_update_request(model: &CdnDomainModel, domain_id: &str) -> UpdateDomainConfigRequest {
    UpdateDomainConfigRequest {
        domain_list: vec![UpdateDomainConfig {
            domain_id: domain_id.to_string(),
            origin_conf: model
                .origin_conf
                .as_ref()
                .map(update_origin)
                .unwrap_or_default(),
            access_control_conf: model
                .access_control_conf
                .as_ref()
                .map(update_access_control)
                .unwrap_or_default(),
            cache_conf: model
                .cache_conf
                .as_ref()
                .map(update_cache)
                .unwrap_or_default(),
            advanced_conf: model
                .advanced_conf
                .as_ref()
                .map(update_advanced)
                .unwrap_or_default(),
        }],
    }
}

fn update_origin(origin: &OriginConfigModel) -> UpdateOriginConfig {
    UpdateOriginConfig {
        origin_ip: origin.origin_ip_list.to_vec(),
        origin_host: origin.origin_host.clone(),
        origin_port: origin.origin_port,
        origin_protocol: origin.origin_protocol.clone(),
        origin_follow301: origin.origin_follow301,
    }
}

fn update_cache(cache: &CacheConfigModel) -> UpdateCacheConfig {
    UpdateCacheConfig {
        cache_host: cache.cache_host.clone(),
        cache_list: cache
            .cache_rule
            .iter()
            .map(|rule| UpdateCacheRule {
                path_pattern: rule.path_pattern.clone(),
                description: rule.description.clone(),
                cache_ttl: rule.ttl.unwrap_or_default(),
                cache_unit: cache_unit(rule),
                cache_behavior: rule.cache_behavior,
                follow_origin_rule: rule.follow_origin_rule,
            })
            .collect(),
    }
}

fn update_access_control(access: &AccessControlConfigModel) -> UpdateAccessControlConfig {
    let (refer_conf, enable_refer) = match &access.refer_conf {
        Some(refer) => (
            UpdateReferConfig {
                refer_type: refer.refer_type,
                null_refer: refer.null_refer,
                refer_list: refer.refer_list.to_vec(),
            },
            true,
        ),
        None => (UpdateReferConfig::default(), false),
    };

    UpdateAccessControlConfig {
        ip_black_list: access.ip_blacklist.to_vec(),
        ip_black_list_empty: access.ip_blacklist.is_empty_flag(),
        refer_conf,
        enable_refer,
    }
}

fn update_advanced(advanced: &AdvancedConfigModel) -> UpdateAdvancedConfig {
    UpdateAdvancedConfig {
        http_client_header: advanced.http_client_header_list.to_vec(),
        http_client_header_empty: advanced.http_client_header_list.is_empty_flag(),
        http_origin_header: advanced.http_origin_header_list.to_vec(),
        http_origin_header_empty: advanced.http_origin_header_list.is_empty_flag(),
        http2_https: advanced.http_to_https,
    }
}
