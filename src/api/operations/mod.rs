// 接口调用模块
// 每个函数对应一个后端操作，只解开响应包装，不做转换、重试或本地校验

pub mod audit;
pub mod auth;
pub mod beta_tester;
pub mod health;
pub mod influencer;
pub mod project;
pub mod sales_demo;

// 重新导出常用类型
pub use audit::{LoginAuditApi, TrackingErrorApi};
pub use auth::AuthApi;
pub use beta_tester::BetaTesterApi;
pub use health::HealthApi;
pub use influencer::{InfluencerManagerApi, InfluencerPortalApi, InfluencerRosterApi};
pub use project::ProjectApi;
pub use sales_demo::SalesDemoApi;
