use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 用户公开资料，`token` 列不会被读出
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub nickname: String,
    pub avatar: String,
}
