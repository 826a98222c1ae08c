//! UCloud API 签名
//!
//! 参考: <https://docs.ucloud.cn/api/summary/signature>

use std::collections::BTreeMap;

use sha1::{Digest, Sha1};

use super::UcloudClient;

impl UcloudClient {
    /// 生成请求签名
    ///
    /// 1. 参数按 key 升序排列（`BTreeMap` 天然有序）
    /// 2. 依次拼接 `key + value`，末尾追加私钥
    /// 3. 对拼接结果做 SHA1，输出小写 hex
    pub(crate) fn sign(&self, params: &BTreeMap<String, String>) -> String {
        let mut payload = String::new();
        for (k, v) in params {
            payload.push_str(k);
            payload.push_str(v);
        }
        payload.push_str(&self.private_key);

        hex::encode(Sha1::digest(payload.as_bytes()))
    }
}
