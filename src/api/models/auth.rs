use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionUser};

/// 登录请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Session::new(resp.token, resp.user)
    }
}
