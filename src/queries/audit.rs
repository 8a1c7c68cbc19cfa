use crate::api::models::audit::*;
use crate::api::operations::{LoginAuditApi, TrackingErrorApi};
use crate::error::ApiResult;
use crate::query::keys::{login_audit_keys, tracking_error_keys};
use crate::query::{QueryClient, QueryResult};
use crate::result::Paginated;

#[derive(Clone)]
pub struct LoginAuditQueries {
    api: LoginAuditApi,
    cache: QueryClient,
}

impl LoginAuditQueries {
    pub fn new(api: LoginAuditApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn list(&self, filters: &LoginAuditFilters) -> QueryResult<Paginated<LoginAuditLog>> {
        let api = self.api.clone();
        let filters = filters.clone();
        self.cache
            .query(login_audit_keys::list(&filters), move || async move {
                api.list(&filters).await
            })
            .await
    }
}

#[derive(Clone)]
pub struct TrackingErrorQueries {
    api: TrackingErrorApi,
    cache: QueryClient,
}

impl TrackingErrorQueries {
    pub fn new(api: TrackingErrorApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn list(
        &self,
        filters: &TrackingErrorFilters,
    ) -> QueryResult<Paginated<TrackingError>> {
        let api = self.api.clone();
        let filters = filters.clone();
        self.cache
            .query(tracking_error_keys::list(&filters), move || async move {
                api.list(&filters).await
            })
            .await
    }

    pub async fn resolve(&self, id: &str) -> ApiResult<TrackingError> {
        self.cache
            .mutate(&[tracking_error_keys::all()], self.api.resolve(id))
            .await
    }
}
