use crate::query::key::QueryKey;

/// 健康监控命名空间
pub const HEALTH: &str = "health";

pub fn all() -> QueryKey {
    QueryKey::new(HEALTH)
}

pub fn database() -> QueryKey {
    all().with("database")
}

pub fn tables() -> QueryKey {
    all().with("tables")
}
