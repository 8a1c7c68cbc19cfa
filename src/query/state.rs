use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// 查询被禁用（依赖的 ID 为空），没有发出请求
    Idle,
    Loading,
    Success,
    Error,
}

/// 一次读取的结果
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<ApiError>,
}

impl<T> QueryResult<T> {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }

    pub fn success(data: Arc<T>) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    /// 失败时保留之前缓存的数据，界面可以继续展示旧数据
    pub fn failure(error: ApiError, previous: Option<Arc<T>>) -> Self {
        Self {
            status: QueryStatus::Error,
            data: previous,
            error: Some(error),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }

    pub fn into_result(self) -> ApiResult<Arc<T>> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ApiError::InvalidRequest("query is disabled".to_string())),
        }
    }
}

/// 缓存项的当前状态快照，不触发请求
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub has_data: bool,
    pub is_stale: bool,
    pub is_fetching: bool,
    pub error: Option<ApiError>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl QueryState {
    pub fn status(&self) -> QueryStatus {
        if self.has_data {
            QueryStatus::Success
        } else if self.is_fetching {
            QueryStatus::Loading
        } else if self.error.is_some() {
            QueryStatus::Error
        } else {
            QueryStatus::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status() == QueryStatus::Loading
    }
}
