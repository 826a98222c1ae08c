//! Log sanitization utilities
//!
//! Keeps certificate bodies, private keys and API keys out of debug/error logs.

/// Maximum number of bytes of a response body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters kept visible by [`mask_secret`].
const MASK_VISIBLE: usize = 4;

/// Request parameters whose values must never be logged.
const SECRET_PARAMS: &[&str] = &["PrivateKey", "UserCert", "CaCert", "Signature"];

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging, appending the total length when cut.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Keep the first few characters of a key and hide the rest.
pub fn mask_secret(s: &str) -> String {
    let visible: String = s.chars().take(MASK_VISIBLE).collect();
    if visible.len() == s.len() {
        "***".to_string()
    } else {
        format!("{visible}***")
    }
}

/// Render form parameters for a debug log line, hiding secret values.
pub fn sanitize_params<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    params
        .into_iter()
        .map(|(k, v)| {
            if SECRET_PARAMS.iter().any(|p| k.starts_with(p)) {
                format!("{k}=***")
            } else if k == "PublicKey" {
                format!("{k}={}", mask_secret(v))
            } else {
                format!("{k}={}", truncate_for_log(v))
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
