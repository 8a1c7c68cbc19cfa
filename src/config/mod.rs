use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 默认查询缓存新鲜期（秒）
const DEFAULT_QUERY_STALE_SECS: u64 = 30;

/// 销售域共享凭据默认的查询参数名
const DEFAULT_SALES_PASSWORD_PARAM: &str = "password";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub query_stale_secs: u64,
    pub session_store_path: Option<PathBuf>,
    // TODO: 后端签发销售令牌后改为按用户的销售认证，去掉共享密码
    pub sales_shared_password: Option<String>,
    pub sales_password_param: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 通过查找函数读取配置，便于测试时注入变量
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("API_BASE_URL"))?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs = parse_secs(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let query_stale_secs = parse_secs(&lookup, "QUERY_STALE_SECS", DEFAULT_QUERY_STALE_SECS)?;

        let session_store_path = lookup("SESSION_STORE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let sales_shared_password = lookup("SALES_SHARED_PASSWORD").filter(|v| !v.is_empty());
        let sales_password_param = lookup("SALES_PASSWORD_PARAM")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SALES_PASSWORD_PARAM.to_string());

        Ok(Config {
            api_base_url,
            request_timeout_secs,
            query_stale_secs,
            session_store_path,
            sales_shared_password,
            sales_password_param,
        })
    }

    /// 仅指定后端地址、其余取默认值的配置
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Config {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            query_stale_secs: DEFAULT_QUERY_STALE_SECS,
            session_store_path: None,
            sales_shared_password: None,
            sales_password_param: DEFAULT_SALES_PASSWORD_PARAM.to_string(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn query_stale_time(&self) -> Duration {
        Duration::from_secs(self.query_stale_secs)
    }
}

fn parse_secs<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => {
            let trimmed = raw.trim().trim_end_matches('s');
            match trimmed.parse::<u64>() {
                Ok(value) if value > 0 => Ok(value),
                _ => Err(ConfigError::InvalidNumber { name, value: raw }),
            }
        }
    }
}
