use crate::api::models::audit::*;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::result::Paginated;

pub const LOGIN_AUDIT_PREFIX: &str = "/api/v1/login-audit";
pub const TRACKING_ERRORS_PREFIX: &str = "/api/v1/tracking-errors";

/// 登录审计接口
#[derive(Clone)]
pub struct LoginAuditApi {
    client: ApiClient,
}

impl LoginAuditApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &LoginAuditFilters) -> ApiResult<Paginated<LoginAuditLog>> {
        self.client.get_with(&[], filters).await
    }
}

/// 埋点错误接口
#[derive(Clone)]
pub struct TrackingErrorApi {
    client: ApiClient,
}

impl TrackingErrorApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &TrackingErrorFilters) -> ApiResult<Paginated<TrackingError>> {
        self.client.get_with(&[], filters).await
    }

    pub async fn resolve(&self, id: &str) -> ApiResult<TrackingError> {
        self.client
            .post(&[id, "resolve"], &serde_json::json!({}))
            .await
    }
}
