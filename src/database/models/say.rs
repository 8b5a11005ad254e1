use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 说说可见性，数据库中以 `status` 列存储
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private = 0,
    Public = 1,
}

impl Visibility {
    /// 只有 "public" 映射为公开，其余一律私密
    pub fn from_label(label: &str) -> Self {
        if label == "public" {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    pub fn as_status(self) -> i16 {
        self as i16
    }
}

/// 列表接口读出的说说，对外只暴露短ID
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct SayEntity {
    pub uid: String,
    pub content: String,
    #[serde(rename = "from")]
    pub source: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// 待写入的说说
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSayEntity {
    pub uid: String,
    pub content: String,
    pub user_id: i64,
    pub source: String,
    pub agent: String,
    pub visibility: Visibility,
    pub created_at: i64,
    pub updated_at: i64,
}
