// 会话模块
// 按认证域保存令牌和用户信息

pub mod claims;
pub mod domain;
pub mod model;
pub mod storage;
pub mod store;

// 重新导出常用类型
pub use domain::AuthDomain;
pub use model::{Session, SessionUser};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::TokenStore;
