use serde_json::Value;
use thiserror::Error;

/// 请求层错误
///
/// 需要实现 `Clone`：同一个键的并发读取共享一次请求，失败结果要分发给所有等待者。
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("authorization denied by backend")]
    Unauthorized { body: Option<Value> },

    #[error("backend returned status {status}")]
    Status { status: u16, body: Option<Value> },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("sales shared credential is not configured")]
    MissingSalesCredential,

    #[error("session storage failed: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// 后端返回的原始错误体，原样交给界面层展示
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Unauthorized { body } | ApiError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// 后端错误体中的 `message` / `error` 字段
    pub fn message(&self) -> Option<&str> {
        let body = self.body()?;
        body.get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// 持久化存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

pub type ApiResult<T> = Result<T, ApiError>;
