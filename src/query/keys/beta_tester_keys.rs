use crate::api::models::beta_tester::BetaTesterFilters;
use crate::query::key::QueryKey;

/// 内测人员命名空间
pub const BETA_TESTERS: &str = "beta-testers";

pub fn all() -> QueryKey {
    QueryKey::new(BETA_TESTERS)
}

pub fn lists() -> QueryKey {
    all().with("list")
}

pub fn list(filters: &BetaTesterFilters) -> QueryKey {
    lists().with_params(filters)
}

pub fn details() -> QueryKey {
    all().with("detail")
}

pub fn detail(id: &str) -> QueryKey {
    details().with(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_nest_under_the_namespace() {
        let by_project = list(&BetaTesterFilters {
            project_id: Some("1".into()),
            ..Default::default()
        });
        assert!(by_project.starts_with(&lists()));
        assert!(detail("bt-7").starts_with(&details()));
        assert!(details().starts_with(&all()));
        assert!(!by_project.starts_with(&details()));
    }
}
