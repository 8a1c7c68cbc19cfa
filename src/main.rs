use dashboard::{
    Dashboard,
    auth::AuthStatus,
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!("Using backend at {}", config.api_base_url);

    let dashboard = Dashboard::from_config(config).expect("Failed to create HTTP client");

    // 恢复已保存的管理员会话，没有时用环境变量中的账号登录
    if dashboard.admin.initialize().await != AuthStatus::Authenticated {
        let email = std::env::var("ADMIN_EMAIL").ok();
        let password = std::env::var("ADMIN_PASSWORD").ok();
        let (Some(email), Some(password)) = (email, password) else {
            tracing::error!("No admin session; set ADMIN_EMAIL and ADMIN_PASSWORD to log in");
            std::process::exit(1);
        };
        match dashboard.admin.login(&email, &password).await {
            Ok(user) => tracing::info!("Logged in as {} ({})", user.email, user.role),
            Err(e) => {
                tracing::error!("Admin login failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    // 数据库健康状况
    let health = dashboard.health.database().await;
    match health.into_result() {
        Ok(db) => {
            tracing::info!(
                status = ?db.status,
                latency_ms = db.latency_ms,
                active = db.connections.active,
                max = db.connections.max,
                "Database health: {:.0}% of connections in use",
                db.connections.utilization() * 100.0
            );
            for query in &db.slow_queries {
                tracing::warn!(
                    calls = query.calls,
                    "Slow query (mean {:.1} ms): {}",
                    query.mean_ms,
                    query.query
                );
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch database health: {}", e);
            std::process::exit(1);
        }
    }
}
