use axum::{
    Json,
    extract::{Extension, State},
};

use crate::{AppState, database::UserProfile, error::AppError, middleware::Identity};

/// 登录状态检测，返回当前令牌对应的用户资料
#[axum::debug_handler]
pub async fn status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<UserProfile>, AppError> {
    match state.users.find_profile(identity.user_id).await {
        Ok(Some(profile)) => Ok(Json(profile)),
        Ok(None) => {
            tracing::warn!(user_id = identity.user_id, "authenticated user row is missing");
            Err(AppError::Internal("用户不存在".into()))
        }
        Err(e) => Err(AppError::Unavailable(format!("数据读取失败，{}", e))),
    }
}
