use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{AppState, cache::TokenCache, database::UserRepository, error::AppError};

/// 当前请求已认证的身份，由认证中间件放入请求扩展，再显式传给业务层
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}

/// Bearer 令牌认证器
///
/// 先查进程级缓存，未命中或已过期时再查用户表，查到后刷新缓存。
/// 所有失败原因统一为 [`AppError::Unauthenticated`]。
pub struct Authenticator {
    cache: Arc<TokenCache>,
    users: Arc<dyn UserRepository>,
    ttl_secs: i64,
}

impl Authenticator {
    pub fn new(cache: Arc<TokenCache>, users: Arc<dyn UserRepository>, ttl_secs: i64) -> Self {
        Self {
            cache,
            users,
            ttl_secs,
        }
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &Arc<TokenCache> {
        &self.cache
    }

    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, AppError> {
        let token = authorization
            .and_then(parse_bearer)
            .ok_or_else(|| {
                tracing::debug!("missing or malformed authorization header");
                AppError::Unauthenticated
            })?;

        let now = chrono::Utc::now().timestamp();
        if let Some(cached) = self.cache.get(token) {
            if cached.is_valid_at(now) {
                tracing::debug!(user_id = cached.user_id, "token cache hit");
                return Ok(Identity {
                    user_id: cached.user_id,
                });
            }
            tracing::debug!(user_id = cached.user_id, "cached token expired, revalidating");
        }

        let user_id = match self.users.find_id_by_token(token).await {
            Ok(Some(user_id)) => user_id,
            Ok(None) => {
                tracing::debug!("unknown token");
                return Err(AppError::Unauthenticated);
            }
            Err(e) => {
                tracing::warn!(error = %e, "token lookup failed");
                return Err(AppError::Unauthenticated);
            }
        };

        self.cache.put(token, user_id, self.ttl_secs);
        tracing::debug!(user_id, "token validated against store");
        Ok(Identity { user_id })
    }
}

/// 解析 `Bearer <token>`，必须恰好两段且令牌非空
pub fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let identity = state
        .authenticator
        .authenticate(authorization.as_deref())
        .await?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedToken;
    use crate::database::UserProfile;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingUsers {
        lookups: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl UserRepository for CountingUsers {
        async fn find_id_by_token(&self, token: &str) -> Result<Option<i64>, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Timeout);
            }
            Ok(match token {
                "good" => Some(5),
                "other" => Some(9),
                _ => None,
            })
        }

        async fn find_profile(&self, _user_id: i64) -> Result<Option<UserProfile>, StoreError> {
            Ok(None)
        }
    }

    fn authenticator(users: Arc<CountingUsers>) -> Authenticator {
        Authenticator::new(Arc::new(TokenCache::new()), users, 86400)
    }

    #[test]
    fn parse_bearer_accepts_only_exact_form() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("bearer abc"), None);
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("Bearer abc def"), None);
        assert_eq!(parse_bearer("Bearer  abc"), None);
        assert_eq!(parse_bearer(""), None);
    }

    #[tokio::test]
    async fn second_request_is_served_from_cache() {
        let users = Arc::new(CountingUsers::default());
        let auth = authenticator(users.clone());

        let first = auth.authenticate(Some("Bearer good")).await.unwrap();
        let second = auth.authenticate(Some("Bearer good")).await.unwrap();

        assert_eq!(first, Identity { user_id: 5 });
        assert_eq!(first, second);
        assert_eq!(users.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_cache_entry_is_revalidated() {
        let users = Arc::new(CountingUsers::default());
        let auth = authenticator(users.clone());
        let now = chrono::Utc::now().timestamp();
        auth.cache().insert(CachedToken {
            token: "good".into(),
            user_id: 42,
            expires_at: now - 10,
        });

        let identity = auth.authenticate(Some("Bearer good")).await.unwrap();

        assert_eq!(identity.user_id, 5);
        assert_eq!(users.lookups.load(Ordering::SeqCst), 1);
        let refreshed = auth.cache().get("good").unwrap();
        assert_eq!(refreshed.user_id, 5);
        assert!(refreshed.expires_at >= now + 86400);
    }

    #[tokio::test]
    async fn malformed_headers_never_reach_the_store() {
        let users = Arc::new(CountingUsers::default());
        let auth = authenticator(users.clone());

        for header in [None, Some("Bearer "), Some("Token good"), Some("good")] {
            let result = auth.authenticate(header).await;
            assert!(matches!(result, Err(AppError::Unauthenticated)));
        }
        assert_eq!(users.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_token_and_store_failure_look_the_same() {
        let users = Arc::new(CountingUsers::default());
        let auth = authenticator(users.clone());
        assert!(matches!(
            auth.authenticate(Some("Bearer missing")).await,
            Err(AppError::Unauthenticated)
        ));
        assert!(auth.cache().get("missing").is_none());

        let broken = Arc::new(CountingUsers {
            fail: true,
            ..Default::default()
        });
        let auth = authenticator(broken);
        assert!(matches!(
            auth.authenticate(Some("Bearer good")).await,
            Err(AppError::Unauthenticated)
        ));
        assert!(auth.cache().is_empty());
    }

    #[tokio::test]
    async fn tokens_are_cached_independently() {
        let users = Arc::new(CountingUsers::default());
        let auth = authenticator(users.clone());

        assert_eq!(auth.authenticate(Some("Bearer good")).await.unwrap().user_id, 5);
        assert_eq!(auth.authenticate(Some("Bearer other")).await.unwrap().user_id, 9);
        assert_eq!(auth.authenticate(Some("Bearer other")).await.unwrap().user_id, 9);
        assert_eq!(users.lookups.load(Ordering::SeqCst), 2);
        assert_eq!(auth.cache().len(), 2);
    }
}
