// 认证上下文模块
// 每个认证域一个上下文，解析已保存的会话并广播认证状态

pub mod context;

pub use context::{AuthContext, AuthStatus};
