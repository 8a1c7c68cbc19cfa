use crate::api::models::auth::{LoginRequest, LoginResponse};
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::session::{AuthDomain, Session, SessionUser};

/// 认证接口
///
/// 登录走匿名客户端，`me` 和 `logout` 携带本域令牌。
#[derive(Clone)]
pub struct AuthApi {
    domain: AuthDomain,
    anonymous: ApiClient,
    session: ApiClient,
}

impl AuthApi {
    pub fn new(domain: AuthDomain, anonymous: ApiClient, session: ApiClient) -> Self {
        Self {
            domain,
            anonymous,
            session,
        }
    }

    pub fn domain(&self) -> AuthDomain {
        self.domain
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self.anonymous.post(&["login"], &req).await?;
        Ok(resp.into())
    }

    /// 用当前令牌获取用户信息，用于校验已保存的会话
    pub async fn me(&self) -> ApiResult<SessionUser> {
        self.session.get(&["me"]).await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.session.post_unit(&["logout"], &serde_json::json!({})).await
    }
}
