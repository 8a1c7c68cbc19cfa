// API 数据传输对象模块
// 后端拥有这些实体，客户端只做静态类型约束，不做运行时校验

pub mod audit;
pub mod auth;
pub mod beta_tester;
pub mod health;
pub mod influencer;
pub mod project;
pub mod sales_demo;

// 重新导出常用类型
pub use audit::*;
pub use auth::*;
pub use beta_tester::*;
pub use health::*;
pub use influencer::*;
pub use project::*;
pub use sales_demo::*;
