use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
};

pub mod auth;
pub mod index;
pub mod say;

/// 组装全部路由，挂载在 `api_base_uri` 之下
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/index", get(index::index))
        .route("/memo", get(say::list_says));

    let protected_routes = Router::new()
        .route("/memos", post(say::create_say))
        .route("/auth/status", post(auth::status))
        // 应用认证中间件
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = Router::new().merge(public_routes).merge(protected_routes);

    let base = state.config.api_base_uri.trim_matches('/');
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", base), api)
    };

    router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
