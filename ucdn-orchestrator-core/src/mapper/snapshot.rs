//! Remote snapshot → declarative model

use ucdn_orchestrator_provider::DomainConfigInfo;

use crate::types::{
    AccessControlConfigModel, AdvancedConfigModel, CacheConfigModel, CacheRuleModel,
    CdnDomainModel, ListField, OriginConfigModel, ReferConfigModel,
};

/// Overwrite `model` with the remote snapshot.
///
/// Every nested block is rebuilt, and remote lists (including `null` ones) become
/// ordered, possibly empty sequences. `domain` and `tag` keep their local value
/// when the snapshot leaves them blank.
pub fn apply_snapshot(model: &mut CdnDomainModel, info: &DomainConfigInfo) {
    model.domain_id = Some(info.domain_id.clone());
    if !info.domain.is_empty() {
        model.domain.clone_from(&info.domain);
    }
    if !info.tag.is_empty() {
        model.tag = Some(info.tag.clone());
    }
    model.area_code.clone_from(&info.area_code);
    model.cdn_type.clone_from(&info.cdn_type);
    model.status = Some(info.status.clone());
    model.cname = Some(info.cname.clone());
    model.create_time = Some(info.create_time);
    model.test_url.clone_from(&info.test_url);

    let origin = &info.origin_conf;
    model.origin_conf = Some(OriginConfigModel {
        origin_ip_list: ListField::from_remote(origin.origin_ip_list.clone()),
        origin_host: Some(origin.origin_host.clone()),
        origin_port: Some(origin.origin_port),
        origin_protocol: Some(origin.origin_protocol.clone()),
        origin_follow301: Some(origin.origin_follow301),
    });

    model.cache_conf = Some(CacheConfigModel {
        cache_host: Some(info.cache_conf.cache_host.clone()),
        cache_rule: info
            .cache_conf
            .cache_list
            .iter()
            .map(|conf| CacheRuleModel {
                path_pattern: conf.path_pattern.clone(),
                description: Some(conf.description.clone()),
                ttl: Some(conf.cache_ttl),
                cache_unit: Some(conf.cache_unit.clone()),
                cache_behavior: conf.cache_behavior,
                follow_origin_rule: Some(conf.follow_origin_rule),
            })
            .collect(),
    });

    let access = &info.access_control_conf;
    model.access_control_conf = Some(AccessControlConfigModel {
        ip_blacklist: ListField::from_remote(access.ip_black_list.clone()),
        refer_conf: Some(ReferConfigModel {
            refer_type: Some(access.refer_conf.refer_type),
            null_refer: Some(access.refer_conf.null_refer),
            refer_list: ListField::from_remote(access.refer_conf.refer_list.clone()),
        }),
    });

    let advanced = &info.advanced_conf;
    model.advanced_conf = Some(AdvancedConfigModel {
        http_client_header_list: ListField::from_remote(advanced.http_client_header.clone()),
        http_origin_header_list: ListField::from_remote(advanced.http_origin_header.clone()),
        http_to_https: Some(advanced.http2_https),
    });
}

/// Build a model from a snapshot alone (import).
pub fn model_from_snapshot(info: &DomainConfigInfo) -> CdnDomainModel {
    let mut model = CdnDomainModel::default();
    apply_snapshot(&mut model, info);
    model
}

/// Carry computed attributes over from the prior state after an update.
pub fn copy_computed_fields(dst: &mut CdnDomainModel, src: &CdnDomainModel) {
    dst.domain_id.clone_from(&src.domain_id);
    dst.cname.clone_from(&src.cname);
    dst.status.clone_from(&src.status);
    dst.create_time = src.create_time;
}
