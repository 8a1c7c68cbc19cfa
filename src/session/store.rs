use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::StorageError;
use crate::session::domain::AuthDomain;
use crate::session::model::{Session, SessionUser};
use crate::session::storage::Storage;

/// 单个认证域的令牌存储
///
/// 只读写本域的两个键：令牌和用户 JSON。用户记录无法解析时按未登录处理。
/// 克隆共享同一个会话代数，每次写入新会话加一。
#[derive(Clone)]
pub struct TokenStore {
    domain: AuthDomain,
    storage: Arc<dyn Storage>,
    generation: Arc<AtomicU64>,
}

impl TokenStore {
    pub fn new(domain: AuthDomain, storage: Arc<dyn Storage>) -> Self {
        Self {
            domain,
            storage,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// 当前会话代数
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn domain(&self) -> AuthDomain {
        self.domain
    }

    /// 读取会话，任一部分缺失或损坏时返回 `None`
    pub fn get(&self) -> Option<Session> {
        let token = self.token()?;
        let raw_user = self.storage.get_item(self.domain.user_key())?;

        match serde_json::from_str::<SessionUser>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                tracing::warn!(
                    domain = %self.domain,
                    "Stored user record is not valid, ignoring session: {}",
                    e
                );
                None
            }
        }
    }

    /// 仅读取令牌，发送请求时使用
    pub fn token(&self) -> Option<String> {
        self.storage
            .get_item(self.domain.token_key())
            .filter(|token| !token.is_empty())
    }

    pub fn set(&self, session: &Session) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&session.user)?;
        self.storage
            .set_item(self.domain.token_key(), &session.token)?;
        self.storage.set_item(self.domain.user_key(), &user_json)?;
        self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(domain = %self.domain, user_id = %session.user.id, "Session stored");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(self.domain.token_key())?;
        self.storage.remove_item(self.domain.user_key())?;
        tracing::debug!(domain = %self.domain, "Session cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
