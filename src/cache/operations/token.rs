use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cache::models::token::CachedToken;

/// 进程级令牌缓存
///
/// 进程启动时创建一次，由所有请求共享，重启后清空。过期条目在读取时惰性判断，
/// 不做后台清理，也不提供提前失效的接口。
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: RwLock<HashMap<String, CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询令牌，只读，返回值可能已过期
    pub fn get(&self, token: &str) -> Option<CachedToken> {
        self.entries.read().get(token).cloned()
    }

    /// 写入令牌，`expires_at = now + ttl_secs`
    pub fn put(&self, token: &str, user_id: i64, ttl_secs: i64) {
        let expires_at = chrono::Utc::now().timestamp().saturating_add(ttl_secs);
        self.insert(CachedToken {
            token: token.to_string(),
            user_id,
            expires_at,
        });
    }

    /// 整条覆盖写入，读者只会看到旧条目或新条目
    pub fn insert(&self, cached: CachedToken) {
        self.entries.write().insert(cached.token.clone(), cached);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
