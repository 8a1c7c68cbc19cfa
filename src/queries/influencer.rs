use crate::api::models::influencer::*;
use crate::api::operations::{InfluencerManagerApi, InfluencerPortalApi, InfluencerRosterApi};
use crate::error::ApiResult;
use crate::query::keys::{influencer_keys, influencer_manager_keys, influencer_portal_keys};
use crate::query::{QueryClient, QueryResult};
use crate::queries::is_blank;

/// 网红经理账号（管理后台）
#[derive(Clone)]
pub struct InfluencerManagerQueries {
    api: InfluencerManagerApi,
    cache: QueryClient,
}

impl InfluencerManagerQueries {
    pub fn new(api: InfluencerManagerApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn list(
        &self,
        filters: &InfluencerManagerFilters,
    ) -> QueryResult<Vec<InfluencerManagerAccount>> {
        let api = self.api.clone();
        let filters = filters.clone();
        self.cache
            .query(influencer_manager_keys::list(&filters), move || async move {
                api.list(&filters).await
            })
            .await
    }

    pub async fn detail(&self, id: &str) -> QueryResult<InfluencerManagerAccount> {
        if is_blank(id) {
            return QueryResult::idle();
        }
        let api = self.api.clone();
        let id = id.to_string();
        self.cache
            .query(influencer_manager_keys::detail(&id), move || async move {
                api.get(&id).await
            })
            .await
    }

    pub async fn create(
        &self,
        req: &CreateInfluencerManagerRequest,
    ) -> ApiResult<InfluencerManagerAccount> {
        self.cache
            .mutate(&[influencer_manager_keys::all()], self.api.create(req))
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        req: &UpdateInfluencerManagerRequest,
    ) -> ApiResult<InfluencerManagerAccount> {
        self.cache
            .mutate(&[influencer_manager_keys::all()], self.api.update(id, req))
            .await
    }

    pub async fn deactivate(&self, id: &str) -> ApiResult<InfluencerManagerAccount> {
        self.cache
            .mutate(&[influencer_manager_keys::all()], self.api.deactivate(id))
            .await
    }
}

/// 网红经理名下的网红
#[derive(Clone)]
pub struct InfluencerRosterQueries {
    api: InfluencerRosterApi,
    cache: QueryClient,
}

impl InfluencerRosterQueries {
    pub fn new(api: InfluencerRosterApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn list(&self, filters: &InfluencerFilters) -> QueryResult<Vec<Influencer>> {
        let api = self.api.clone();
        let filters = filters.clone();
        self.cache
            .query(influencer_keys::list(&filters), move || async move {
                api.list_influencers(&filters).await
            })
            .await
    }
}

/// 网红门户个人资料
#[derive(Clone)]
pub struct InfluencerPortalQueries {
    api: InfluencerPortalApi,
    cache: QueryClient,
}

impl InfluencerPortalQueries {
    pub fn new(api: InfluencerPortalApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn profile(&self) -> QueryResult<InfluencerProfile> {
        let api = self.api.clone();
        self.cache
            .query(influencer_portal_keys::profile(), move || async move {
                api.profile().await
            })
            .await
    }

    pub async fn update_profile(
        &self,
        req: &UpdateInfluencerProfileRequest,
    ) -> ApiResult<InfluencerProfile> {
        self.cache
            .mutate(&[influencer_portal_keys::all()], self.api.update_profile(req))
            .await
    }
}
