use std::sync::Arc;

use tokio::sync::watch;

use crate::auth::{AuthContext, AuthStatus};

/// 路由守卫的认证来源
pub trait AuthSource: Send + Sync {
    fn name(&self) -> String;
    fn status(&self) -> AuthStatus;
    fn subscribe(&self) -> watch::Receiver<AuthStatus>;
}

impl AuthSource for AuthContext {
    fn name(&self) -> String {
        self.domain().to_string()
    }

    fn status(&self) -> AuthStatus {
        AuthContext::status(self)
    }

    fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        AuthContext::subscribe(self)
    }
}

/// 在认证上下文之上追加角色或权限要求
///
/// 用户角色在允许列表中，或者持有指定权限时才算已认证。
pub struct RoleRequirement {
    context: Arc<AuthContext>,
    roles: Vec<String>,
    permission: Option<String>,
}

impl RoleRequirement {
    pub fn new(context: Arc<AuthContext>, roles: &[&str]) -> Self {
        Self {
            context,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permission: None,
        }
    }

    pub fn or_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }
}

impl AuthSource for RoleRequirement {
    fn name(&self) -> String {
        format!("{}[{}]", self.context.domain(), self.roles.join(","))
    }

    fn status(&self) -> AuthStatus {
        match self.context.status() {
            AuthStatus::Authenticated => {
                let Some(user) = self.context.user() else {
                    return AuthStatus::Unauthenticated;
                };
                let roles: Vec<&str> = self.roles.iter().map(String::as_str).collect();
                let permitted = self
                    .permission
                    .as_deref()
                    .is_some_and(|p| user.has_permission(p));
                if user.has_role(&roles) || permitted {
                    AuthStatus::Authenticated
                } else {
                    AuthStatus::Unauthenticated
                }
            }
            other => other,
        }
    }

    fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.context.subscribe()
    }
}
