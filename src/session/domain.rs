use std::fmt;

use serde::{Deserialize, Serialize};

/// 管理后台令牌键
const ADMIN_TOKEN_KEY: &str = "admin_token";
/// 管理后台用户键
const ADMIN_USER_KEY: &str = "admin_user";

/// 网红经理令牌键
const INFLUENCER_MANAGER_TOKEN_KEY: &str = "influencer_manager_token";
/// 网红经理用户键
const INFLUENCER_MANAGER_USER_KEY: &str = "influencer_manager_user";

/// 网红门户令牌键
const INFLUENCER_PORTAL_TOKEN_KEY: &str = "influencer_portal_token";
/// 网红门户用户键
const INFLUENCER_PORTAL_USER_KEY: &str = "influencer_portal_user";

/// 认证域
///
/// 每个域有独立的存储键、登录路由和认证接口，互不影响。
/// 管理后台、销售和合作方共用 `Admin` 域。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthDomain {
    Admin,
    InfluencerManager,
    InfluencerPortal,
}

impl AuthDomain {
    pub const ALL: [AuthDomain; 3] = [
        AuthDomain::Admin,
        AuthDomain::InfluencerManager,
        AuthDomain::InfluencerPortal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthDomain::Admin => "admin",
            AuthDomain::InfluencerManager => "influencer_manager",
            AuthDomain::InfluencerPortal => "influencer_portal",
        }
    }

    pub fn token_key(&self) -> &'static str {
        match self {
            AuthDomain::Admin => ADMIN_TOKEN_KEY,
            AuthDomain::InfluencerManager => INFLUENCER_MANAGER_TOKEN_KEY,
            AuthDomain::InfluencerPortal => INFLUENCER_PORTAL_TOKEN_KEY,
        }
    }

    pub fn user_key(&self) -> &'static str {
        match self {
            AuthDomain::Admin => ADMIN_USER_KEY,
            AuthDomain::InfluencerManager => INFLUENCER_MANAGER_USER_KEY,
            AuthDomain::InfluencerPortal => INFLUENCER_PORTAL_USER_KEY,
        }
    }

    /// 会话失效时跳转的登录路由
    pub fn login_path(&self) -> &'static str {
        match self {
            AuthDomain::Admin => "/login",
            AuthDomain::InfluencerManager => "/influencers/login",
            AuthDomain::InfluencerPortal => "/influencer/login",
        }
    }

    /// 该域认证接口的路径前缀
    pub fn auth_prefix(&self) -> &'static str {
        match self {
            AuthDomain::Admin => "/api/v1/auth",
            AuthDomain::InfluencerManager => "/api/v1/influencer-manager/auth",
            AuthDomain::InfluencerPortal => "/api/v1/influencer-portal/auth",
        }
    }
}

impl fmt::Display for AuthDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
