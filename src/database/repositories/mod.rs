use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;

use crate::error::StoreError;

pub mod say;
pub mod user;

pub use say::SayRepository;
pub use user::UserRepository;

/// Postgres 存储库实现，每次调用都带超时
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub(crate) async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        with_timeout(self.timeout, fut).await
    }
}

/// 给一次存储调用加上时限
///
/// 超时后内部 future 被丢弃，借出的连接随之归还连接池。
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Timeout),
    }
}
