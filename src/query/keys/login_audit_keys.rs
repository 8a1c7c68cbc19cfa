use crate::api::models::audit::LoginAuditFilters;
use crate::query::key::QueryKey;

/// 登录审计命名空间
pub const LOGIN_AUDIT: &str = "login-audit";

pub fn all() -> QueryKey {
    QueryKey::new(LOGIN_AUDIT)
}

pub fn lists() -> QueryKey {
    all().with("list")
}

pub fn list(filters: &LoginAuditFilters) -> QueryKey {
    lists().with_params(filters)
}

pub fn details() -> QueryKey {
    all().with("detail")
}

pub fn detail(id: &str) -> QueryKey {
    details().with(id)
}
