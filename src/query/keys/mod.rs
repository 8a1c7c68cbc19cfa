/// 查询键模块
/// 每个资源一个命名空间，列表和详情都挂在命名空间之下，按命名空间失效即可覆盖全部读取

pub mod beta_tester_keys;
pub mod health_keys;
pub mod influencer_keys;
pub mod influencer_manager_keys;
pub mod influencer_portal_keys;
pub mod login_audit_keys;
pub mod project_keys;
pub mod sales_demo_keys;
pub mod tracking_error_keys;
