use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 令牌校验失败时返回的固定提示，不区分具体原因
pub const UNAUTHENTICATED_MESSAGE: &str = "令牌已过期，请重新登录...";

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("查询超时")]
    Timeout,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 缺失、格式错误、未知或已过期的令牌
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// 存储超时或连接失败
    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    status: u16,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, UNAUTHENTICATED_MESSAGE.into()),
            AppError::InvalidArgument(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}
