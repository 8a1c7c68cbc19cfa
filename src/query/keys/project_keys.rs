use crate::api::models::project::ProjectFilters;
use crate::query::key::QueryKey;

/// 项目命名空间
pub const PROJECTS: &str = "projects";

pub fn all() -> QueryKey {
    QueryKey::new(PROJECTS)
}

pub fn lists() -> QueryKey {
    all().with("list")
}

pub fn list(filters: &ProjectFilters) -> QueryKey {
    lists().with_params(filters)
}

pub fn details() -> QueryKey {
    all().with("detail")
}

pub fn detail(id: &str) -> QueryKey {
    details().with(id)
}
