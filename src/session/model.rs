use serde::{Deserialize, Serialize};

use crate::serde_helper::id_string;

/// 常用角色名
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const SUPER_ADMIN: &str = "super_admin";
    pub const SALES: &str = "sales";
    pub const PARTNER: &str = "partner";
    pub const INFLUENCER_MANAGER: &str = "influencer_manager";
    pub const INFLUENCER: &str = "influencer";
}

/// 会话中的用户信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 细粒度权限（如 `influencers:manage`），旧接口不返回时为空
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl SessionUser {
    pub fn has_role(&self, allowed: &[&str]) -> bool {
        allowed.iter().any(|role| self.role.eq_ignore_ascii_case(role))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// 登录会话
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}
