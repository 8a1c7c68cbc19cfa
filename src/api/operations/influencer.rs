use crate::api::models::influencer::*;
use crate::client::ApiClient;
use crate::error::ApiResult;

pub const INFLUENCER_MANAGERS_PREFIX: &str = "/api/v1/influencer-managers";
pub const INFLUENCER_ROSTER_PREFIX: &str = "/api/v1/influencer-manager/influencers";
pub const INFLUENCER_PORTAL_PREFIX: &str = "/api/v1/influencer-portal";

/// 网红经理账号管理（管理后台域）
#[derive(Clone)]
pub struct InfluencerManagerApi {
    client: ApiClient,
}

impl InfluencerManagerApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        filters: &InfluencerManagerFilters,
    ) -> ApiResult<Vec<InfluencerManagerAccount>> {
        self.client.get_with(&[], filters).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<InfluencerManagerAccount> {
        self.client.get(&[id]).await
    }

    pub async fn create(
        &self,
        req: &CreateInfluencerManagerRequest,
    ) -> ApiResult<InfluencerManagerAccount> {
        self.client.post(&[], req).await
    }

    pub async fn update(
        &self,
        id: &str,
        req: &UpdateInfluencerManagerRequest,
    ) -> ApiResult<InfluencerManagerAccount> {
        self.client.patch(&[id], req).await
    }

    pub async fn deactivate(&self, id: &str) -> ApiResult<InfluencerManagerAccount> {
        self.client
            .post(&[id, "deactivate"], &serde_json::json!({}))
            .await
    }
}

/// 网红经理查看自己名下的网红（网红经理域）
#[derive(Clone)]
pub struct InfluencerRosterApi {
    client: ApiClient,
}

impl InfluencerRosterApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_influencers(&self, filters: &InfluencerFilters) -> ApiResult<Vec<Influencer>> {
        self.client.get_with(&[], filters).await
    }
}

/// 网红门户（网红门户域）
#[derive(Clone)]
pub struct InfluencerPortalApi {
    client: ApiClient,
}

impl InfluencerPortalApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> ApiResult<InfluencerProfile> {
        self.client.get(&["profile"]).await
    }

    pub async fn update_profile(
        &self,
        req: &UpdateInfluencerProfileRequest,
    ) -> ApiResult<InfluencerProfile> {
        self.client.patch(&["profile"], req).await
    }
}
