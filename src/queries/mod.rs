// 资源查询模块
// 读取走查询缓存，写操作成功后让对应命名空间失效

pub mod audit;
pub mod beta_tester;
pub mod health;
pub mod influencer;
pub mod project;
pub mod sales_demo;

pub use audit::{LoginAuditQueries, TrackingErrorQueries};
pub use beta_tester::BetaTesterQueries;
pub use health::HealthQueries;
pub use influencer::{InfluencerManagerQueries, InfluencerPortalQueries, InfluencerRosterQueries};
pub use project::ProjectQueries;
pub use sales_demo::SalesDemoQueries;

/// 依赖 ID 的查询在 ID 为空时不发请求
pub(crate) fn is_blank(id: &str) -> bool {
    id.trim().is_empty()
}
