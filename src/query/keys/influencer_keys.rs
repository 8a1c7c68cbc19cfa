use crate::api::models::influencer::InfluencerFilters;
use crate::query::key::QueryKey;

/// 网红名单命名空间
pub const INFLUENCERS: &str = "influencers";

pub fn all() -> QueryKey {
    QueryKey::new(INFLUENCERS)
}

pub fn lists() -> QueryKey {
    all().with("list")
}

pub fn list(filters: &InfluencerFilters) -> QueryKey {
    lists().with_params(filters)
}

pub fn details() -> QueryKey {
    all().with("detail")
}

pub fn detail(id: &str) -> QueryKey {
    details().with(id)
}
