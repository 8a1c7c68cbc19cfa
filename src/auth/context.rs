//! 认证上下文
//!
//! 启动时处于 `Loading`，`initialize` 校验已保存的会话后变为已认证或未认证。
//! 状态通过 `watch` 通道广播，路由守卫据此等待解析完成。

use chrono::Utc;
use tokio::sync::watch;

use crate::api::operations::AuthApi;
use crate::error::ApiResult;
use crate::query::QueryClient;
use crate::session::claims::{self, TokenExpiry};
use crate::session::{AuthDomain, Session, SessionUser, TokenStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

pub struct AuthContext {
    domain: AuthDomain,
    store: TokenStore,
    api: AuthApi,
    cache: QueryClient,
    status: watch::Sender<AuthStatus>,
}

impl AuthContext {
    pub fn new(store: TokenStore, api: AuthApi, cache: QueryClient) -> Self {
        let (status, _) = watch::channel(AuthStatus::Loading);
        Self {
            domain: store.domain(),
            store,
            api,
            cache,
            status,
        }
    }

    pub fn domain(&self) -> AuthDomain {
        self.domain
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// 当前认证状态
    ///
    /// 会话可能已被 401 处理清除，此时把已认证降级为未认证并通知订阅者。
    pub fn status(&self) -> AuthStatus {
        let current = *self.status.borrow();
        if current == AuthStatus::Authenticated && !self.store.is_authenticated() {
            tracing::debug!(domain = %self.domain, "Stored session is gone, marking unauthenticated");
            self.settle(AuthStatus::Unauthenticated);
            return AuthStatus::Unauthenticated;
        }
        current
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.store.get().map(|session| session.user)
    }

    fn settle(&self, status: AuthStatus) -> AuthStatus {
        self.status.send_replace(status);
        status
    }

    /// 解析已保存的会话
    pub async fn initialize(&self) -> AuthStatus {
        self.settle(AuthStatus::Loading);

        let Some(session) = self.store.get() else {
            return self.settle(AuthStatus::Unauthenticated);
        };

        if claims::inspect(&session.token, Utc::now()) == TokenExpiry::Expired {
            tracing::info!(domain = %self.domain, "Stored token has expired");
            if let Err(e) = self.store.clear() {
                tracing::error!(domain = %self.domain, "Failed to clear expired session: {}", e);
            }
            return self.settle(AuthStatus::Unauthenticated);
        }

        match self.api.me().await {
            Ok(user) => {
                let still_current = self.store.token().as_deref() == Some(session.token.as_str());
                if user != session.user && still_current {
                    let refreshed = Session::new(session.token, user);
                    if let Err(e) = self.store.set(&refreshed) {
                        tracing::warn!(domain = %self.domain, "Failed to refresh stored user: {}", e);
                    }
                }
                self.settle(AuthStatus::Authenticated)
            }
            Err(e) if e.is_unauthorized() => self.settle(AuthStatus::Unauthenticated),
            Err(e) => {
                // 后端暂时不可用时保留会话，等下一次请求再判断
                tracing::warn!(domain = %self.domain, "Could not validate stored session: {}", e);
                self.settle(AuthStatus::Authenticated)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<SessionUser> {
        let session = self.api.login(email, password).await?;
        self.store.set(&session)?;
        self.cache.clear();
        tracing::info!(domain = %self.domain, user_id = %session.user.id, "Logged in");
        self.settle(AuthStatus::Authenticated);
        Ok(session.user)
    }

    /// 退出登录，后端调用失败不影响本地清理
    pub async fn logout(&self) {
        if self.store.token().is_some() {
            if let Err(e) = self.api.logout().await {
                tracing::debug!(domain = %self.domain, "Backend logout failed: {}", e);
            }
        }
        if let Err(e) = self.store.clear() {
            tracing::error!(domain = %self.domain, "Failed to clear session: {}", e);
        }
        self.cache.clear();
        tracing::info!(domain = %self.domain, "Logged out");
        self.settle(AuthStatus::Unauthenticated);
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("domain", &self.domain)
            .field("status", &*self.status.borrow())
            .finish()
    }
}
