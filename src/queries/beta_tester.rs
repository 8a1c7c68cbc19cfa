use crate::api::models::beta_tester::*;
use crate::api::operations::BetaTesterApi;
use crate::error::ApiResult;
use crate::query::keys::{beta_tester_keys, project_keys};
use crate::query::{QueryClient, QueryResult};
use crate::queries::is_blank;

/// 内测人员读取与写操作
#[derive(Clone)]
pub struct BetaTesterQueries {
    api: BetaTesterApi,
    cache: QueryClient,
}

impl BetaTesterQueries {
    pub fn new(api: BetaTesterApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn list(&self, filters: &BetaTesterFilters) -> QueryResult<Vec<BetaTester>> {
        let api = self.api.clone();
        let filters = filters.clone();
        self.cache
            .query(beta_tester_keys::list(&filters), move || async move {
                api.list(&filters).await
            })
            .await
    }

    pub async fn detail(&self, id: &str) -> QueryResult<BetaTester> {
        if is_blank(id) {
            return QueryResult::idle();
        }
        let api = self.api.clone();
        let id = id.to_string();
        self.cache
            .query(beta_tester_keys::detail(&id), move || async move {
                api.get(&id).await
            })
            .await
    }

    /// 邀请后项目的内测人数也会变化
    pub async fn invite(&self, req: &InviteBetaTesterRequest) -> ApiResult<BetaTester> {
        self.cache
            .mutate(
                &[beta_tester_keys::all(), project_keys::all()],
                self.api.invite(req),
            )
            .await
    }

    pub async fn update_review_status(
        &self,
        id: &str,
        req: &UpdateReviewStatusRequest,
    ) -> ApiResult<BetaTester> {
        self.cache
            .mutate(
                &[beta_tester_keys::all()],
                self.api.update_review_status(id, req),
            )
            .await
    }

    pub async fn remove(&self, id: &str) -> ApiResult<()> {
        self.cache
            .mutate(
                &[beta_tester_keys::all(), project_keys::all()],
                self.api.remove(id),
            )
            .await
    }
}
