//! 本地令牌过期检查
//!
//! 只读取 JWT 的 `exp`，不校验签名（客户端没有密钥）。非 JWT 令牌视为不透明令牌。

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenExpiry {
    Valid,
    Expired,
    /// 不是 JWT 或没有 `exp`，只能交给后端判断
    Opaque,
}

/// 读取 JWT 的过期时间
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let header = decode_header(token).ok()?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    let exp = data.claims.get("exp")?.as_i64()?;
    DateTime::<Utc>::from_timestamp(exp, 0)
}

pub fn inspect(token: &str, now: DateTime<Utc>) -> TokenExpiry {
    match expires_at(token) {
        None => TokenExpiry::Opaque,
        Some(exp) if exp <= now => TokenExpiry::Expired,
        Some(_) => TokenExpiry::Valid,
    }
}
