use crate::api::models::sales_demo::*;
use crate::api::operations::SalesDemoApi;
use crate::error::ApiResult;
use crate::query::keys::sales_demo_keys;
use crate::query::{QueryClient, QueryResult};
use crate::queries::is_blank;

#[derive(Clone)]
pub struct SalesDemoQueries {
    api: SalesDemoApi,
    cache: QueryClient,
}

impl SalesDemoQueries {
    pub fn new(api: SalesDemoApi, cache: QueryClient) -> Self {
        Self { api, cache }
    }

    pub async fn list(&self, filters: &SalesDemoFilters) -> QueryResult<Vec<SalesDemo>> {
        let api = self.api.clone();
        let filters = filters.clone();
        self.cache
            .query(sales_demo_keys::list(&filters), move || async move {
                api.list(&filters).await
            })
            .await
    }

    pub async fn detail(&self, id: &str) -> QueryResult<SalesDemo> {
        if is_blank(id) {
            return QueryResult::idle();
        }
        let api = self.api.clone();
        let id = id.to_string();
        self.cache
            .query(sales_demo_keys::detail(&id), move || async move {
                api.get(&id).await
            })
            .await
    }

    pub async fn create(&self, req: &CreateSalesDemoRequest) -> ApiResult<SalesDemo> {
        self.cache
            .mutate(&[sales_demo_keys::all()], self.api.create(req))
            .await
    }

    pub async fn update_status(
        &self,
        id: &str,
        req: &UpdateDemoStatusRequest,
    ) -> ApiResult<SalesDemo> {
        self.cache
            .mutate(&[sales_demo_keys::all()], self.api.update_status(id, req))
            .await
    }
}
