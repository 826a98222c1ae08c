//! Plan-time defaults and validation
//!
//! Defaults are applied here and never left to the remote API, so the planned
//! model matches what a later read produces.

use crate::error::{CoreError, CoreResult};
use crate::types::{
    AccessControlConfigModel, AdvancedConfigModel, CacheConfigModel, CacheRuleModel,
    CdnDomainModel, ReferConfigModel,
};

pub const DEFAULT_TAG: &str = "Default";
pub const DEFAULT_ORIGIN_PORT: i64 = 80;
pub const DEFAULT_ORIGIN_PROTOCOL: &str = "http";
pub const DEFAULT_CACHE_UNIT: &str = "sec";

const ORIGIN_PROTOCOLS: &[&str] = &["http", "https"];
const AREA_CODES: &[&str] = &["cn", "abroad", "all"];
const CACHE_UNITS: &[&str] = &["sec", "min", "hour", "day"];

/// Fill in every optional attribute the way the resource schema defaults it.
pub fn apply_plan_defaults(model: &mut CdnDomainModel) {
    if model.tag.is_none() {
        model.tag = Some(DEFAULT_TAG.to_string());
    }

    if let Some(origin) = model.origin_conf.as_mut() {
        origin.origin_host.get_or_insert_with(|| model.domain.clone());
        origin.origin_port.get_or_insert(DEFAULT_ORIGIN_PORT);
        origin
            .origin_protocol
            .get_or_insert_with(|| DEFAULT_ORIGIN_PROTOCOL.to_string());
        origin.origin_follow301.get_or_insert(0);
    }

    let cache = model.cache_conf.get_or_insert_with(CacheConfigModel::default);
    cache.cache_host.get_or_insert_with(|| model.domain.clone());
    if cache.cache_rule.is_empty() {
        cache.cache_rule.push(CacheRuleModel::catch_all());
    }
    for rule in &mut cache.cache_rule {
        rule.description.get_or_insert_with(String::new);
        rule.ttl.get_or_insert(0);
        rule.cache_unit
            .get_or_insert_with(|| DEFAULT_CACHE_UNIT.to_string());
        rule.follow_origin_rule.get_or_insert(false);
    }

    let access = model
        .access_control_conf
        .get_or_insert_with(AccessControlConfigModel::default);
    access.ip_blacklist = std::mem::take(&mut access.ip_blacklist).or_empty();
    let refer = access.refer_conf.get_or_insert_with(ReferConfigModel::default);
    refer.refer_type.get_or_insert(0);
    refer.null_refer.get_or_insert(0);
    refer.refer_list = std::mem::take(&mut refer.refer_list).or_empty();

    let advanced = model
        .advanced_conf
        .get_or_insert_with(AdvancedConfigModel::default);
    advanced.http_client_header_list =
        std::mem::take(&mut advanced.http_client_header_list).or_empty();
    advanced.http_origin_header_list =
        std::mem::take(&mut advanced.http_origin_header_list).or_empty();
    advanced.http_to_https.get_or_insert(false);
}

/// Reject values the remote API would refuse anyway.
pub fn validate(model: &CdnDomainModel) -> CoreResult<()> {
    if model.domain.trim().is_empty() {
        return Err(CoreError::ValidationError("domain must not be empty".to_string()));
    }

    one_of("area_code", &model.area_code, AREA_CODES)?;

    if let Some(origin) = &model.origin_conf {
        if origin.origin_ip_list.as_slice().is_empty() {
            return Err(CoreError::ValidationError(
                "origin_conf.origin_ip_list must not be empty".to_string(),
            ));
        }
        if let Some(protocol) = &origin.origin_protocol {
            one_of("origin_conf.origin_protocol", protocol, ORIGIN_PROTOCOLS)?;
        }
    }

    if let Some(cache) = &model.cache_conf {
        for rule in &cache.cache_rule {
            if let Some(unit) = &rule.cache_unit {
                one_of("cache_rule.cache_unit", unit, CACHE_UNITS)?;
            }
        }
    }

    Ok(())
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> CoreResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!(
            "{field} must be one of {allowed:?}, got {value:?}"
        )))
    }
}
