//! UCloud 错误映射

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::{PROVIDER_NAME, UcloudClient};

/// 签名校验失败
pub(crate) const RET_CODE_SIGNATURE_ERROR: i64 = 171;
/// 公共参数缺失或不合法，如 `Params [ProjectId] not available`
pub(crate) const RET_CODE_PARAMS_NOT_AVAILABLE: i64 = 230;

impl UcloudClient {
    /// 是否为必须在客户端层转换为错误的返回码
    ///
    /// 其余非零返回码属于业务结果，原样交给调用方判断。
    pub(crate) fn is_fatal_ret_code(code: i64) -> bool {
        matches!(
            code,
            RET_CODE_SIGNATURE_ERROR | RET_CODE_PARAMS_NOT_AVAILABLE
        )
    }
}

/// 从 `Params [Name] not available` 中取出参数名
fn param_name(message: &str) -> Option<&str> {
    let start = message.find('[')? + 1;
    let end = start + message[start..].find(']')?;
    Some(&message[start..end])
}

impl ProviderErrorMapper for UcloudClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match raw.code {
            // ============ 认证错误 ============
            Some(RET_CODE_SIGNATURE_ERROR) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 参数错误 ============
            Some(RET_CODE_PARAMS_NOT_AVAILABLE) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: param_name(&raw.message).unwrap_or("unknown").to_string(),
                detail: raw.message,
            },

            // ============ 其他错误 fallback ============
            _ => self.unknown_error(raw),
        }
    }
}
