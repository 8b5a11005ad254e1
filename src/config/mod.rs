use std::env;
use std::time::Duration;

/// 令牌缓存默认有效期（秒）
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86400;
/// 数据库查询默认超时（秒）
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub db_max_connections: u32,
    pub db_conn_max_lifetime_secs: u64,
    pub token_ttl_secs: i64,
    pub query_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// 从任意键值来源解析配置，可选项解析失败时回退到默认值
    pub fn from_vars<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(env::VarError::NotPresent)?;

        Ok(Config {
            database_url,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "::".into()),
            server_port: parse_var::<u16>(&lookup, "SERVER_PORT")
                .or_else(|| parse_var::<u16>(&lookup, "PORT"))
                .unwrap_or(3000),
            api_base_uri: lookup("API_BASE_URI").unwrap_or_else(|| "/api/v1".into()),
            db_max_connections: parse_var::<u32>(&lookup, "DB_MAX_CONNECTIONS")
                .filter(|n| *n > 0)
                .unwrap_or(25),
            db_conn_max_lifetime_secs: parse_var::<u64>(&lookup, "DB_CONN_MAX_LIFETIME")
                .unwrap_or(300),
            token_ttl_secs: parse_var::<i64>(&lookup, "TOKEN_TTL")
                .filter(|ttl| *ttl > 0)
                .unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            query_timeout_secs: parse_var::<u64>(&lookup, "QUERY_TIMEOUT")
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_QUERY_TIMEOUT_SECS),
        })
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn db_conn_max_lifetime(&self) -> Duration {
        Duration::from_secs(self.db_conn_max_lifetime_secs)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
