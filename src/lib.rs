use std::sync::Arc;

use api::operations::{
    AuthApi, BetaTesterApi, HealthApi, InfluencerManagerApi, InfluencerPortalApi,
    InfluencerRosterApi, LoginAuditApi, ProjectApi, SalesDemoApi, TrackingErrorApi, audit,
    beta_tester, health, influencer, project, sales_demo,
};
use auth::AuthContext;
use client::{ClientFactory, Navigator, SessionTerminator, TracingNavigator};
use config::Config;
use error::ApiResult;
use guard::{AuthSource, RoleRequirement, RouteGuard};
use queries::{
    BetaTesterQueries, HealthQueries, InfluencerManagerQueries, InfluencerPortalQueries,
    InfluencerRosterQueries, LoginAuditQueries, ProjectQueries, SalesDemoQueries,
    TrackingErrorQueries,
};
use query::QueryClient;
use session::model::roles;
use session::{AuthDomain, FileStorage, MemoryStorage, Storage, TokenStore};

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod queries;
pub mod query;
pub mod result;
pub mod serde_helper;
pub mod session;

/// 管理网红经理账号所需的权限
pub const PERMISSION_MANAGE_INFLUENCERS: &str = "influencers:manage";

/// 应用上下文
///
/// 持有各认证域的会话、共享的查询缓存以及每个资源的查询入口，
/// 由宿主应用创建一次并传给需要它的地方。
#[derive(Clone)]
pub struct Dashboard {
    pub config: Config,
    pub navigator: Arc<dyn Navigator>,
    pub cache: QueryClient,

    pub admin: Arc<AuthContext>,
    pub influencer_manager: Arc<AuthContext>,
    pub influencer_portal: Arc<AuthContext>,

    admin_session: Arc<SessionTerminator>,
    manager_session: Arc<SessionTerminator>,
    portal_session: Arc<SessionTerminator>,

    pub projects: ProjectQueries,
    pub beta_testers: BetaTesterQueries,
    pub sales_demos: SalesDemoQueries,
    pub influencer_managers: InfluencerManagerQueries,
    pub influencer_roster: InfluencerRosterQueries,
    pub influencer_portal_profile: InfluencerPortalQueries,
    pub login_audit: LoginAuditQueries,
    pub tracking_errors: TrackingErrorQueries,
    pub health: HealthQueries,
}

impl Dashboard {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let factory = ClientFactory::new(&config)?;
        let cache = QueryClient::new(config.query_stale_time());

        let terminator = |domain: AuthDomain| {
            Arc::new(SessionTerminator::new(
                TokenStore::new(domain, storage.clone()),
                navigator.clone(),
            ))
        };
        let admin_session = terminator(AuthDomain::Admin);
        let manager_session = terminator(AuthDomain::InfluencerManager);
        let portal_session = terminator(AuthDomain::InfluencerPortal);

        let context = |session: &Arc<SessionTerminator>| {
            let domain = session.store().domain();
            let api = AuthApi::new(
                domain,
                factory.anonymous_client(domain.auth_prefix()),
                factory.session_client(domain.auth_prefix(), session.clone()),
            );
            Arc::new(AuthContext::new(session.store().clone(), api, cache.clone()))
        };
        let admin = context(&admin_session);
        let influencer_manager = context(&manager_session);
        let influencer_portal = context(&portal_session);

        let admin_client = |prefix: &str| factory.session_client(prefix, admin_session.clone());

        Ok(Self {
            projects: ProjectQueries::new(
                ProjectApi::new(admin_client(project::PROJECTS_PREFIX)),
                cache.clone(),
            ),
            beta_testers: BetaTesterQueries::new(
                BetaTesterApi::new(admin_client(beta_tester::BETA_TESTERS_PREFIX)),
                cache.clone(),
            ),
            sales_demos: SalesDemoQueries::new(
                SalesDemoApi::new(factory.sales_client(sales_demo::SALES_DEMOS_PREFIX)),
                cache.clone(),
            ),
            influencer_managers: InfluencerManagerQueries::new(
                InfluencerManagerApi::new(admin_client(influencer::INFLUENCER_MANAGERS_PREFIX)),
                cache.clone(),
            ),
            influencer_roster: InfluencerRosterQueries::new(
                InfluencerRosterApi::new(
                    factory.session_client(influencer::INFLUENCER_ROSTER_PREFIX, manager_session.clone()),
                ),
                cache.clone(),
            ),
            influencer_portal_profile: InfluencerPortalQueries::new(
                InfluencerPortalApi::new(
                    factory.session_client(influencer::INFLUENCER_PORTAL_PREFIX, portal_session.clone()),
                ),
                cache.clone(),
            ),
            login_audit: LoginAuditQueries::new(
                LoginAuditApi::new(admin_client(audit::LOGIN_AUDIT_PREFIX)),
                cache.clone(),
            ),
            tracking_errors: TrackingErrorQueries::new(
                TrackingErrorApi::new(admin_client(audit::TRACKING_ERRORS_PREFIX)),
                cache.clone(),
            ),
            health: HealthQueries::new(
                HealthApi::new(admin_client(health::HEALTH_PREFIX)),
                cache.clone(),
            ),
            admin,
            influencer_manager,
            influencer_portal,
            admin_session,
            manager_session,
            portal_session,
            config,
            navigator,
            cache,
        })
    }

    /// 按配置选择存储：配置了文件路径时持久化到文件，否则只保存在内存
    pub fn from_config(config: Config) -> ApiResult<Self> {
        let storage: Arc<dyn Storage> = match &config.session_store_path {
            Some(path) => Arc::new(FileStorage::new(path)),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::new(config, storage, Arc::new(TracingNavigator))
    }

    pub fn context(&self, domain: AuthDomain) -> &Arc<AuthContext> {
        match domain {
            AuthDomain::Admin => &self.admin,
            AuthDomain::InfluencerManager => &self.influencer_manager,
            AuthDomain::InfluencerPortal => &self.influencer_portal,
        }
    }

    /// 认证域的 401 处理和登录跳转
    pub fn session(&self, domain: AuthDomain) -> &Arc<SessionTerminator> {
        match domain {
            AuthDomain::Admin => &self.admin_session,
            AuthDomain::InfluencerManager => &self.manager_session,
            AuthDomain::InfluencerPortal => &self.portal_session,
        }
    }

    /// 初始化所有认证域
    pub async fn initialize(&self) {
        tokio::join!(
            self.admin.initialize(),
            self.influencer_manager.initialize(),
            self.influencer_portal.initialize(),
        );
    }

    fn guard(&self, sources: Vec<Arc<dyn AuthSource>>, domain: AuthDomain) -> RouteGuard {
        RouteGuard::new(sources, self.session(domain).clone())
    }

    /// 管理后台页面
    pub fn admin_guard(&self) -> RouteGuard {
        let admin: Arc<dyn AuthSource> = self.admin.clone();
        self.guard(vec![admin], AuthDomain::Admin)
    }

    /// 销售页面：管理员或销售角色
    pub fn sales_guard(&self) -> RouteGuard {
        let source = RoleRequirement::new(
            self.admin.clone(),
            &[roles::ADMIN, roles::SUPER_ADMIN, roles::SALES],
        );
        let source: Arc<dyn AuthSource> = Arc::new(source);
        self.guard(vec![source], AuthDomain::Admin)
    }

    /// 网红经理页面
    ///
    /// 持有管理权限的管理员优先放行，不等待网红经理会话解析完成。
    pub fn influencer_manager_guard(&self) -> RouteGuard {
        let admin: Arc<dyn AuthSource> = Arc::new(
            RoleRequirement::new(self.admin.clone(), &[roles::ADMIN, roles::SUPER_ADMIN])
                .or_permission(PERMISSION_MANAGE_INFLUENCERS),
        );
        let manager: Arc<dyn AuthSource> = self.influencer_manager.clone();
        self.guard(vec![admin, manager], AuthDomain::InfluencerManager)
    }

    pub fn influencer_portal_guard(&self) -> RouteGuard {
        let portal: Arc<dyn AuthSource> = self.influencer_portal.clone();
        self.guard(vec![portal], AuthDomain::InfluencerPortal)
    }
}
