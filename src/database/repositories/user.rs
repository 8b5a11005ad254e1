use async_trait::async_trait;

use super::PgRepository;
use crate::database::models::user::UserProfile;
use crate::error::StoreError;

/// 用户存储库，本服务对用户表只读
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据令牌查找用户ID
    async fn find_id_by_token(&self, token: &str) -> Result<Option<i64>, StoreError>;

    /// 根据ID查找用户资料
    async fn find_profile(&self, user_id: i64) -> Result<Option<UserProfile>, StoreError>;
}

#[async_trait]
impl UserRepository for PgRepository {
    async fn find_id_by_token(&self, token: &str) -> Result<Option<i64>, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE token = $1")
                .bind(token)
                .fetch_optional(self.pool()),
        )
        .await
    }

    async fn find_profile(&self, user_id: i64) -> Result<Option<UserProfile>, StoreError> {
        self.bounded(
            sqlx::query_as::<_, UserProfile>(
                r#"
                SELECT id, nickname, avatar
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(self.pool()),
        )
        .await
    }
}
