use crate::api::models::beta_tester::*;
use crate::client::ApiClient;
use crate::error::ApiResult;

pub const BETA_TESTERS_PREFIX: &str = "/api/v1/beta-testers";

/// 内测人员接口
#[derive(Clone)]
pub struct BetaTesterApi {
    client: ApiClient,
}

impl BetaTesterApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &BetaTesterFilters) -> ApiResult<Vec<BetaTester>> {
        self.client.get_with(&[], filters).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<BetaTester> {
        self.client.get(&[id]).await
    }

    pub async fn invite(&self, req: &InviteBetaTesterRequest) -> ApiResult<BetaTester> {
        self.client.post(&["invite"], req).await
    }

    pub async fn update_review_status(
        &self,
        id: &str,
        req: &UpdateReviewStatusRequest,
    ) -> ApiResult<BetaTester> {
        self.client
            .patch(&[id, "review-status"], req)
            .await
    }

    pub async fn remove(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&[id]).await
    }
}
