use crate::api::models::project::*;
use crate::api::operations::ProjectApi;
use crate::error::ApiResult;
use crate::query::keys::{beta_tester_keys, project_keys};
use crate::query::{QueryClient, QueryResult, QueryState};
use crate::queries::is_blank;

/// 项目读取与写操作
#[derive(Clone)]
pub struct ProjectQueries {
    api: ProjectApi,
    cache: QueryClient,
}

impl ProjectQueries {
    pub fn new(api: ProjectApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn list(&self, filters: &ProjectFilters) -> QueryResult<Vec<AppProject>> {
        let api = self.api.clone();
        let filters = filters.clone();
        self.cache
            .query(project_keys::list(&filters), move || async move {
                api.list(&filters).await
            })
            .await
    }

    pub fn list_state(&self, filters: &ProjectFilters) -> QueryState {
        self.cache.state(&project_keys::list(filters))
    }

    pub async fn detail(&self, id: &str) -> QueryResult<AppProject> {
        if is_blank(id) {
            return QueryResult::idle();
        }
        let api = self.api.clone();
        let id = id.to_string();
        self.cache
            .query(project_keys::detail(&id), move || async move { api.get(&id).await })
            .await
    }

    pub async fn create(&self, req: &CreateProjectRequest) -> ApiResult<AppProject> {
        self.cache
            .mutate(&[project_keys::all()], self.api.create(req))
            .await
    }

    pub async fn update(&self, id: &str, req: &UpdateProjectRequest) -> ApiResult<AppProject> {
        self.cache
            .mutate(&[project_keys::all()], self.api.update(id, req))
            .await
    }

    /// 删除项目同时让内测人员缓存失效
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.cache
            .mutate(
                &[project_keys::all(), beta_tester_keys::all()],
                self.api.delete(id),
            )
            .await
    }
}
