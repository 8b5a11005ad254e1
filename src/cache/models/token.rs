use serde::{Deserialize, Serialize};

/// 令牌缓存数据模型
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub token: String,
    pub user_id: i64,
    pub expires_at: i64, // Unix timestamp
}

impl CachedToken {
    /// `expires_at` 当秒仍视为有效
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.expires_at >= now
    }
}
