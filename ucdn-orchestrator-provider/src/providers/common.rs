//! Provider 公共工具函数

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::error::{ProviderError, Result};

// ============ HTTP Client ============

/// 默认连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(
    provider: &str,
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 参数展平 ============

/// 将 `serde_json::Value` 展平为 key-value 对
///
/// 嵌套对象使用 `Parent.Child`，数组使用从 0 开始的 `Name.N`，`null` 被跳过。
pub fn flatten_value(
    prefix: &str,
    value: &serde_json::Value,
    result: &mut BTreeMap<String, String>,
) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let new_key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_value(&new_key, v, result);
            }
        }
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.iter().enumerate() {
                let new_key = format!("{prefix}.{i}");
                flatten_value(&new_key, v, result);
            }
        }
        serde_json::Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        serde_json::Value::Number(n) => {
            result.insert(prefix.to_string(), n.to_string());
        }
        serde_json::Value::Bool(b) => {
            result.insert(prefix.to_string(), b.to_string());
        }
        serde_json::Value::Null => {}
    }
}

/// 将请求结构体序列化为排序后的参数表
pub fn serialize_to_params<T: Serialize>(
    provider: &str,
    params: &T,
) -> Result<BTreeMap<String, String>> {
    let value = serde_json::to_value(params).map_err(|e| ProviderError::SerializationError {
        provider: provider.to_string(),
        detail: e.to_string(),
    })?;

    let mut flat_map = BTreeMap::new();
    flatten_value("", &value, &mut flat_map);
    Ok(flat_map)
}

/// 将参数表编码为 `application/x-www-form-urlencoded` 请求体
pub fn encode_form(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flatten_nested_lists_are_zero_based() {
        let value = json!({
            "DomainList": [
                {"DomainId": "ucdn-1", "OriginConf": {"OriginIp": ["1.1.1.1", "2.2.2.2"]}}
            ],
            "IsDcdn": false,
            "Skipped": null
        });
        let mut flat = BTreeMap::new();
        flatten_value("", &value, &mut flat);

        assert_eq!(flat["DomainList.0.DomainId"], "ucdn-1");
        assert_eq!(flat["DomainList.0.OriginConf.OriginIp.0"], "1.1.1.1");
        assert_eq!(flat["DomainList.0.OriginConf.OriginIp.1"], "2.2.2.2");
        assert_eq!(flat["IsDcdn"], "false");
        assert!(!flat.contains_key("Skipped"));
    }

    #[test]
    fn flatten_numbers() {
        let mut flat = BTreeMap::new();
        flatten_value("", &json!({"Offset": 0, "Limit": 10}), &mut flat);
        assert_eq!(flat["Offset"], "0");
        assert_eq!(flat["Limit"], "10");
    }

    #[test]
    fn form_encoding_escapes_values() {
        let mut params = BTreeMap::new();
        params.insert("Action".to_string(), "GetUcdnDomainConfig".to_string());
        params.insert("TestUrl".to_string(), "http://a.com/x?y=1".to_string());
        let body = encode_form(&params);
        assert_eq!(
            body,
            "Action=GetUcdnDomainConfig&TestUrl=http%3A%2F%2Fa.com%2Fx%3Fy%3D1"
        );
    }
}
