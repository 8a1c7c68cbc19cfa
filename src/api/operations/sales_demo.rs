use crate::api::models::sales_demo::*;
use crate::client::ApiClient;
use crate::error::ApiResult;

pub const SALES_DEMOS_PREFIX: &str = "/api/v1/sales/demos";

/// 销售演示接口，使用共享销售凭据
#[derive(Clone)]
pub struct SalesDemoApi {
    client: ApiClient,
}

impl SalesDemoApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &SalesDemoFilters) -> ApiResult<Vec<SalesDemo>> {
        self.client.get_with(&[], filters).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<SalesDemo> {
        self.client.get(&[id]).await
    }

    pub async fn create(&self, req: &CreateSalesDemoRequest) -> ApiResult<SalesDemo> {
        self.client.post(&[], req).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        req: &UpdateDemoStatusRequest,
    ) -> ApiResult<SalesDemo> {
        self.client.patch(&[id, "status"], req).await
    }
}
