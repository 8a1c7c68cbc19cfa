use crate::api::models::influencer::InfluencerManagerFilters;
use crate::query::key::QueryKey;

/// 网红经理账号命名空间
pub const INFLUENCER_MANAGERS: &str = "influencer-managers";

pub fn all() -> QueryKey {
    QueryKey::new(INFLUENCER_MANAGERS)
}

pub fn lists() -> QueryKey {
    all().with("list")
}

pub fn list(filters: &InfluencerManagerFilters) -> QueryKey {
    lists().with_params(filters)
}

pub fn details() -> QueryKey {
    all().with("detail")
}

pub fn detail(id: &str) -> QueryKey {
    details().with(id)
}
