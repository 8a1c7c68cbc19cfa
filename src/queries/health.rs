use crate::api::models::health::{DatabaseHealth, TableStat};
use crate::api::operations::HealthApi;
use crate::query::keys::health_keys;
use crate::query::{QueryClient, QueryResult};

#[derive(Clone)]
pub struct HealthQueries {
    api: HealthApi,
    cache: QueryClient,
}

impl HealthQueries {
    pub fn new(api: HealthApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn database(&self) -> QueryResult<DatabaseHealth> {
        let api = self.api.clone();
        self.cache
            .query(health_keys::database(), move || async move {
                api.database().await
            })
            .await
    }

    pub async fn tables(&self) -> QueryResult<Vec<TableStat>> {
        let api = self.api.clone();
        self.cache
            .query(health_keys::tables(), move || async move { api.tables().await })
            .await
    }

    /// 强制下一次读取重新请求
    pub fn refresh(&self) {
        self.cache.invalidate(&health_keys::all());
    }
}
