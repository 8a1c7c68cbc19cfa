use crate::api::models::audit::TrackingErrorFilters;
use crate::query::key::QueryKey;

/// 埋点错误命名空间
pub const TRACKING_ERRORS: &str = "tracking-errors";

pub fn all() -> QueryKey {
    QueryKey::new(TRACKING_ERRORS)
}

pub fn lists() -> QueryKey {
    all().with("list")
}

pub fn list(filters: &TrackingErrorFilters) -> QueryKey {
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
    use crate::query::keys::login_audit_keys;

    #[test]
    fn audit_namespaces_do_not_overlap() {
        let unresolved = list(&TrackingErrorFilters {
            resolved: Some(false),
            ..Default::default()
        });
        assert!(unresolved.starts_with(&lists()));
        assert!(detail("e-1").starts_with(&details()));
        assert!(!unresolved.starts_with(&login_audit_keys::all()));
    }
}
