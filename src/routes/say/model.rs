use serde::{Deserialize, Serialize};

use crate::{
    database::{NewSayEntity, SayEntity, SayRepository, Visibility},
    error::{AppError, StoreError},
    middleware::Identity,
    utils::IdGenerator,
};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

const UNKNOWN_AGENT: &str = "unknown";

#[derive(Debug, Default, Deserialize)]
pub struct ListSaysQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// 分页参数，越界或无法解析的值直接回退到默认值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| (1..=MAX_LIMIT).contains(l))
            .unwrap_or(DEFAULT_LIMIT);

        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<&ListSaysQuery> for Pagination {
    fn from(query: &ListSaysQuery) -> Self {
        Self::new(query.page.as_deref(), query.limit.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSaysResponse {
    pub status: i32,
    pub message: String,
    pub data: Vec<SayEntity>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSayForm {
    pub content: Option<String>,
    pub visibility: Option<String>,
    pub from: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub message: String,
}

/// 写入请求，默认值在 [`add_say`] 中补齐
#[derive(Debug, Clone, Default)]
pub struct NewSay {
    pub content: Option<String>,
    pub visibility: Option<String>,
    pub source: Option<String>,
    pub user_agent: Option<String>,
}

impl NewSay {
    pub fn from_form(form: CreateSayForm, user_agent: Option<String>) -> Self {
        Self {
            content: form.content,
            visibility: form.visibility,
            source: form.from,
            user_agent,
        }
    }
}

/// 按更新时间倒序读取一页说说
pub async fn list_recent_says(
    says: &dyn SayRepository,
    pagination: Pagination,
) -> Result<Vec<SayEntity>, AppError> {
    says.list_recent(pagination.limit, pagination.offset())
        .await
        .map_err(|e| AppError::Unavailable(format!("数据读取失败，{}", e)))
}

/// 以给定身份写入一条说说，返回新的短ID
pub async fn add_say(
    says: &dyn SayRepository,
    ids: &dyn IdGenerator,
    identity: Identity,
    req: NewSay,
) -> Result<String, AppError> {
    let content = req.content.unwrap_or_default();
    if content.is_empty() {
        return Err(AppError::InvalidArgument("内容不能为空".into()));
    }

    // 未传时默认公开
    let visibility = Visibility::from_label(req.visibility.as_deref().unwrap_or("public"));

    let agent = req
        .user_agent
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| UNKNOWN_AGENT.to_string());
    let source = req
        .source
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| agent.clone());

    let uid = ids
        .generate()
        .map_err(|e| AppError::Internal(format!("数据写入失败，{}", e)))?;

    let now = chrono::Utc::now().timestamp();
    let say = NewSayEntity {
        uid: uid.clone(),
        content,
        user_id: identity.user_id,
        source,
        agent,
        visibility,
        created_at: now,
        updated_at: now,
    };

    // 超时归为存储不可用，其余写入失败归为内部错误，两者都是 500
    says.insert(say).await.map_err(|e| match e {
        StoreError::Timeout => AppError::Unavailable(format!("数据写入失败，{}", e)),
        StoreError::Database(_) => AppError::Internal(format!("数据写入失败，{}", e)),
    })?;

    tracing::info!(user_id = identity.user_id, uid = %uid, "say created");
    Ok(uid)
}
