use crate::query::key::QueryKey;

/// 网红门户命名空间，只有当前网红自己的资料
pub const INFLUENCER_PORTAL: &str = "influencer-portal";

pub fn all() -> QueryKey {
    QueryKey::new(INFLUENCER_PORTAL)
}

pub fn profile() -> QueryKey {
    all().with("profile")
}
