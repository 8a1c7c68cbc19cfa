//! 路由守卫
//!
//! 守卫按优先级依次检查认证来源，第一个已认证的来源直接放行，
//! 不等待后面来源的加载状态。所有来源都解析完且没有放行时跳转到登录页，
//! 跳转经由目标域的 `SessionTerminator`，与 401 处理共用去重。

pub mod sources;

use std::sync::Arc;

use futures_util::future::select_all;

use crate::auth::AuthStatus;
use crate::client::SessionTerminator;

pub use sources::{AuthSource, RoleRequirement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authorized,
    Unauthorized,
}

impl GuardState {
    pub fn is_authorized(&self) -> bool {
        *self == GuardState::Authorized
    }
}

pub struct RouteGuard {
    sources: Vec<Arc<dyn AuthSource>>,
    session: Arc<SessionTerminator>,
}

impl RouteGuard {
    /// `sources` 按优先级从高到低排列，`session` 为拒绝时跳转的目标域
    pub fn new(sources: Vec<Arc<dyn AuthSource>>, session: Arc<SessionTerminator>) -> Self {
        Self { sources, session }
    }

    pub fn login_path(&self) -> &'static str {
        self.session.login_path()
    }

    /// 按当前状态求值，不等待也不跳转
    pub fn evaluate(&self) -> GuardState {
        let mut loading = false;
        for source in &self.sources {
            match source.status() {
                AuthStatus::Authenticated => {
                    tracing::trace!(source = %source.name(), "Guard authorized");
                    return GuardState::Authorized;
                }
                AuthStatus::Loading => loading = true,
                AuthStatus::Unauthenticated => {}
            }
        }
        if loading {
            GuardState::Loading
        } else {
            GuardState::Unauthorized
        }
    }

    /// 等待认证来源解析，未授权时跳转到登录页
    pub async fn resolve(&self) -> GuardState {
        let mut receivers: Vec<_> = self.sources.iter().map(|s| s.subscribe()).collect();

        loop {
            match self.evaluate() {
                GuardState::Authorized => return GuardState::Authorized,
                GuardState::Unauthorized => return self.reject(),
                GuardState::Loading => {}
            }

            let changes = receivers.iter_mut().map(|rx| Box::pin(rx.changed()));
            let (changed, _, pending) = select_all(changes).await;
            drop(pending);

            if changed.is_err() {
                tracing::warn!(login_path = %self.login_path(), "Auth source closed while loading");
                return self.reject();
            }
        }
    }

    fn reject(&self) -> GuardState {
        if self.session.redirect_to_login() {
            tracing::info!(login_path = %self.login_path(), "Guard denied access, redirecting");
        } else {
            tracing::debug!(login_path = %self.login_path(), "Guard denied access, redirect already issued");
        }
        GuardState::Unauthorized
    }
}
