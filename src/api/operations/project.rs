use crate::api::models::project::*;
use crate::client::ApiClient;
use crate::error::ApiResult;

pub const PROJECTS_PREFIX: &str = "/api/v1/projects";

/// 上线项目接口
#[derive(Clone)]
pub struct ProjectApi {
    client: ApiClient,
}

impl ProjectApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &ProjectFilters) -> ApiResult<Vec<AppProject>> {
        self.client.get_with(&[], filters).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<AppProject> {
        self.client.get(&[id]).await
    }

    pub async fn create(&self, req: &CreateProjectRequest) -> ApiResult<AppProject> {
        self.client.post(&[], req).await
    }

    pub async fn update(&self, id: &str, req: &UpdateProjectRequest) -> ApiResult<AppProject> {
        self.client.patch(&[id], req).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&[id]).await
    }
}
