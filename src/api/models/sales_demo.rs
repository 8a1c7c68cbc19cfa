use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helper::id_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

/// 销售演示预约
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesDemo {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: DemoStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesDemoFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DemoStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalesDemoRequest {
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDemoStatusRequest {
    pub status: DemoStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
