use axum::{
    Form, Json,
    extract::{Extension, FromRequest, Multipart, Query, Request, State},
    http::header::CONTENT_TYPE,
};
use axum_extra::{TypedHeader, headers::UserAgent};

use super::model::{
    AckResponse, CreateSayForm, ListSaysQuery, ListSaysResponse, NewSay, Pagination, add_say,
    list_recent_says,
};
use crate::{AppState, error::AppError, middleware::Identity};

/// 获取说说列表，无需认证
#[axum::debug_handler]
pub async fn list_says(
    State(state): State<AppState>,
    Query(query): Query<ListSaysQuery>,
) -> Result<Json<ListSaysResponse>, AppError> {
    let pagination = Pagination::from(&query);
    let data = list_recent_says(state.says.as_ref(), pagination).await?;

    Ok(Json(ListSaysResponse {
        status: 1,
        message: "ok".into(),
        data,
    }))
}

/// 发布说说，兼容 memos 的表单接口
#[axum::debug_handler]
pub async fn create_say(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    user_agent: Option<TypedHeader<UserAgent>>,
    form: CreateSayForm,
) -> Result<Json<AckResponse>, AppError> {
    let user_agent = user_agent.map(|TypedHeader(ua)| ua.as_str().to_string());
    let req = NewSay::from_form(form, user_agent);

    add_say(
        state.says.as_ref(),
        state.id_generator.as_ref(),
        identity,
        req,
    )
    .await?;

    Ok(Json(AckResponse {
        message: "ok".into(),
    }))
}

/// 读取说说表单，兼容 urlencoded 与 multipart
///
/// 其他或缺失的 Content-Type 视为空表单，交由内容校验返回 400。
impl<S> FromRequest<S> for CreateSayForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/x-www-form-urlencoded" => {
                let Form(form) = Form::<CreateSayForm>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::InvalidArgument(e.body_text()))?;
                Ok(form)
            }
            "multipart/form-data" => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::InvalidArgument(e.body_text()))?;
                read_multipart(multipart).await
            }
            _ => Ok(CreateSayForm::default()),
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<CreateSayForm, AppError> {
    let mut form = CreateSayForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidArgument(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        let slot = match name.as_deref() {
            Some("content") => &mut form.content,
            Some("visibility") => &mut form.visibility,
            Some("from") => &mut form.from,
            _ => continue,
        };
        let value = field
            .text()
            .await
            .map_err(|e| AppError::InvalidArgument(e.body_text()))?;
        // 同名字段只取第一个
        slot.get_or_insert(value);
    }

    Ok(form)
}
