use crate::api::models::health::{DatabaseHealth, TableStat};
use crate::client::ApiClient;
use crate::error::ApiResult;

pub const HEALTH_PREFIX: &str = "/api/v1/health";

/// 数据库健康监控接口
#[derive(Clone)]
pub struct HealthApi {
    client: ApiClient,
}

impl HealthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn database(&self) -> ApiResult<DatabaseHealth> {
        self.client.get(&["database"]).await
    }

    pub async fn tables(&self) -> ApiResult<Vec<TableStat>> {
        self.client.get(&["database", "tables"]).await
    }
}
