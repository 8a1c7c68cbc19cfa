// HTTP 客户端模块
// 负责拼接资源路径、附加凭据以及统一处理 401

pub mod interceptor;
pub mod navigator;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::result::unwrap_envelope;

pub use interceptor::SessionTerminator;
pub use navigator::{Navigator, RedirectQueue, TracingNavigator};

/// 请求 ID 头
pub const HEADER_REQUEST_ID: &str = "X-Request-Id";

/// 客户端的认证方式
#[derive(Clone)]
pub enum ClientAuth {
    /// 无凭据（登录接口）
    Anonymous,
    /// 按域的用户令牌，以 Bearer 头发送，401 时交给终止器处理
    Session(Arc<SessionTerminator>),
    /// 销售域共享密码，以查询参数发送，仅在单独的销售认证上线前使用
    SharedPassword {
        param: String,
        password: Option<String>,
    },
}

/// 绑定到某个资源路径前缀的客户端
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: ClientAuth,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, api_base_url: &str, prefix: &str, auth: ClientAuth) -> Self {
        let base_url = join_url(api_base_url, prefix);
        Self {
            http,
            base_url,
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 在前缀后逐段追加路径
    ///
    /// 每个片段按单个路径段编码，实体 ID 中的 `/`、`?`、`#` 不会改变请求的资源。
    /// 空片段以及 `.`、`..` 直接拒绝。
    pub fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ApiError::InvalidRequest(format!("invalid base url {}: {}", self.base_url, e))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidRequest(format!("base url {} cannot carry a path", self.base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                if matches!(*segment, "" | "." | "..") {
                    return Err(ApiError::InvalidRequest(format!(
                        "invalid path segment {:?}",
                        segment
                    )));
                }
                path.push(segment);
            }
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        self.request(Method::GET, segments, None, None).await
    }

    /// 带查询参数的 GET，参数中的 `null` 字段会被忽略
    pub async fn get_with<T, Q>(&self, segments: &[&str], query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = serde_json::to_value(query)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.request(Method::GET, segments, Some(query), None).await
    }

    pub async fn post<T, B>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_body(body)?;
        self.request(Method::POST, segments, None, Some(body)).await
    }

    pub async fn put<T, B>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_body(body)?;
        self.request(Method::PUT, segments, None, Some(body)).await
    }

    pub async fn patch<T, B>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_body(body)?;
        self.request(Method::PATCH, segments, None, Some(body)).await
    }

    /// 忽略响应体的 POST
    pub async fn post_unit<B>(&self, segments: &[&str], body: &B) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let body = to_body(body)?;
        self.send(Method::POST, segments, None, Some(body)).await?;
        Ok(())
    }

    /// 忽略响应体的 DELETE
    pub async fn delete(&self, segments: &[&str]) -> ApiResult<()> {
        self.send(Method::DELETE, segments, None, None).await?;
        Ok(())
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<Value>,
        body: Option<Value>,
    ) -> ApiResult<T> {
        let bytes = self.send(method, segments, query, body).await?;
        decode_envelope(&bytes)
    }

    /// 发送请求并返回 2xx 响应体
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<Value>,
        body: Option<Value>,
    ) -> ApiResult<Vec<u8>> {
        let request_id = Uuid::new_v4();
        let url = self.url(segments)?;
        let mut params = query.as_ref().map(query_pairs).unwrap_or_default();

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(HEADER_REQUEST_ID, request_id.to_string());

        let sent_token = match &self.auth {
            ClientAuth::Anonymous => None,
            ClientAuth::Session(terminator) => {
                let token = terminator.store().token();
                if let Some(token) = &token {
                    request = request.bearer_auth(token);
                }
                token
            }
            ClientAuth::SharedPassword { param, password } => {
                let password = password.as_deref().ok_or(ApiError::MissingSalesCredential)?;
                params.push((param.clone(), password.to_string()));
                None
            }
        };

        if !params.is_empty() {
            request = request.query(&params);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        tracing::debug!(%request_id, %method, %url, "Sending request");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%request_id, %method, %url, "Request failed: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let body = error_body(response).await;
            match &self.auth {
                ClientAuth::Session(terminator) => {
                    terminator.handle_unauthorized(sent_token.as_deref());
                }
                _ => tracing::warn!(%request_id, %url, "Unauthorized response"),
            }
            return Err(ApiError::Unauthorized { body });
        }

        if !status.is_success() {
            tracing::debug!(%request_id, status = status.as_u16(), "Request rejected by backend");
            let body = error_body(response).await;
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(ApiError::from)?;
        Ok(bytes.to_vec())
    }
}

/// 按配置创建客户端，所有客户端共享同一个连接池
#[derive(Clone)]
pub struct ClientFactory {
    http: reqwest::Client,
    api_base_url: String,
    sales_password_param: String,
    sales_shared_password: Option<String>,
}

impl ClientFactory {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let http = build_http(config.request_timeout())?;
        if config.sales_shared_password.is_some() {
            tracing::warn!(
                "Sales client authenticates with a shared password; replace with per-user sales auth"
            );
        }
        Ok(Self {
            http,
            api_base_url: config.api_base_url.clone(),
            sales_password_param: config.sales_password_param.clone(),
            sales_shared_password: config.sales_shared_password.clone(),
        })
    }

    /// 携带某个认证域令牌的客户端
    pub fn session_client(&self, prefix: &str, terminator: Arc<SessionTerminator>) -> ApiClient {
        ApiClient::new(
            self.http.clone(),
            &self.api_base_url,
            prefix,
            ClientAuth::Session(terminator),
        )
    }

    /// 销售域客户端
    pub fn sales_client(&self, prefix: &str) -> ApiClient {
        ApiClient::new(
            self.http.clone(),
            &self.api_base_url,
            prefix,
            ClientAuth::SharedPassword {
                param: self.sales_password_param.clone(),
                password: self.sales_shared_password.clone(),
            },
        )
    }

    pub fn anonymous_client(&self, prefix: &str) -> ApiClient {
        ApiClient::new(
            self.http.clone(),
            &self.api_base_url,
            prefix,
            ClientAuth::Anonymous,
        )
    }
}

pub fn build_http(timeout: Duration) -> ApiResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ApiError::from)
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

/// 把 JSON 对象展开成查询参数，跳过 `null`，数组展开为重复键
pub fn query_pairs(value: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = value {
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        if let Some(v) = scalar_to_string(item) {
                            pairs.push((key.clone(), v));
                        }
                    }
                }
                other => {
                    if let Some(v) = scalar_to_string(other) {
                        pairs.push((key.clone(), v));
                    }
                }
            }
        }
    }
    pairs
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn decode_envelope<T: DeserializeOwned>(bytes: &[u8]) -> ApiResult<T> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    let body: Value = serde_json::from_slice(bytes)?;
    Ok(serde_json::from_value(unwrap_envelope(body))?)
}

async fn error_body(response: reqwest::Response) -> Option<Value> {
    let bytes = response.bytes().await.ok()?;
    if bytes.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())),
    )
}
