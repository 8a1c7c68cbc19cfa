use crate::api::models::sales_demo::SalesDemoFilters;
use crate::query::key::QueryKey;

/// 销售演示命名空间
pub const SALES_DEMOS: &str = "sales-demos";

pub fn all() -> QueryKey {
    QueryKey::new(SALES_DEMOS)
}

pub fn lists() -> QueryKey {
    all().with("list")
}

pub fn list(filters: &SalesDemoFilters) -> QueryKey {
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
    fn filtered_lists_sit_under_lists() {
        let filtered = list(&SalesDemoFilters {
            search: Some("acme".into()),
            ..Default::default()
        });
        assert!(filtered.starts_with(&lists()));
        assert!(filtered.starts_with(&all()));
        assert!(detail("d-1").starts_with(&details()));
        assert!(!detail("d-1").starts_with(&lists()));
    }
}
