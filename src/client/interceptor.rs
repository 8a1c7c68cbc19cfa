use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::navigator::Navigator;
use crate::session::TokenStore;

/// 401 响应处理和登录跳转
///
/// 每个认证域一个实例。只有携带当前令牌的请求收到 401 才会清除会话。
/// 一代会话结束后只跳转一次，并发收到的 401 和随后拒绝访问的路由守卫共用这次跳转；
/// 写入新会话后重新允许跳转。
pub struct SessionTerminator {
    store: TokenStore,
    navigator: Arc<dyn Navigator>,
    /// 最近一次跳转时的会话代数
    redirected_at: Mutex<Option<u64>>,
}

impl SessionTerminator {
    pub fn new(store: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            redirected_at: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn login_path(&self) -> &'static str {
        self.store.domain().login_path()
    }

    /// 处理一次 401，`sent_token` 为该请求实际携带的令牌
    ///
    /// 返回是否发起了跳转。
    pub fn handle_unauthorized(&self, sent_token: Option<&str>) -> bool {
        let domain = self.store.domain();
        let mut redirected_at = self.lock();

        match (self.store.token(), sent_token) {
            (Some(current), Some(sent)) if current == sent => {
                if let Err(e) = self.store.clear() {
                    tracing::error!(domain = %domain, "Failed to clear rejected session: {}", e);
                }
                *redirected_at = None;
                tracing::warn!(domain = %domain, "Backend rejected session token, session cleared");
            }
            (Some(_), _) => {
                // 请求发出后会话已被新的登录替换
                tracing::debug!(domain = %domain, "Ignoring 401 for a superseded token");
                return false;
            }
            (None, _) => {}
        }

        self.redirect_once(&mut redirected_at)
    }

    /// 路由守卫拒绝访问时跳转登录页
    ///
    /// 会话仍在时（角色不满足）每次都跳转；会话已结束时与 401 处理共用一次跳转。
    pub fn redirect_to_login(&self) -> bool {
        let mut redirected_at = self.lock();
        if self.store.token().is_some() {
            self.navigator.redirect(self.login_path());
            return true;
        }
        self.redirect_once(&mut redirected_at)
    }

    fn redirect_once(&self, redirected_at: &mut Option<u64>) -> bool {
        let generation = self.store.generation();
        if *redirected_at == Some(generation) {
            tracing::debug!(domain = %self.store.domain(), generation, "Login redirect already issued");
            return false;
        }
        *redirected_at = Some(generation);
        self.navigator.redirect(self.login_path());
        true
    }

    fn lock(&self) -> MutexGuard<'_, Option<u64>> {
        match self.redirected_at.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
