// 查询缓存模块
// key: 分层查询键
// client: 缓存、请求去重与失效
// keys: 各资源的键工厂

pub mod client;
pub mod key;
pub mod keys;
pub mod state;

pub use client::QueryClient;
pub use key::{KeySegment, QueryKey};
pub use state::{QueryResult, QueryState, QueryStatus};
