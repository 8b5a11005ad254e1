use async_trait::async_trait;
use futures_util::{TryStream, TryStreamExt};

use super::PgRepository;
use crate::database::models::say::{NewSayEntity, SayEntity};
use crate::error::StoreError;

/// 说说存储库
#[async_trait]
pub trait SayRepository: Send + Sync {
    /// 按 `updated_at` 倒序读取一页，任一行读取失败则整体失败
    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<SayEntity>, StoreError>;

    /// 单条插入
    async fn insert(&self, say: NewSayEntity) -> Result<(), StoreError>;
}

#[async_trait]
impl SayRepository for PgRepository {
    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<SayEntity>, StoreError> {
        let pool = self.pool();
        self.bounded(async move {
            let rows = sqlx::query_as::<_, SayEntity>(
                r#"
                SELECT uuid AS uid, content, source, created_at, updated_at
                FROM says
                ORDER BY updated_at DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch(pool);

            collect_rows(rows).await
        })
        .await
    }

    async fn insert(&self, say: NewSayEntity) -> Result<(), StoreError> {
        self.bounded(
            sqlx::query(
                r#"
                INSERT INTO says (content, user_id, source, agent, uuid, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(say.content)
            .bind(say.user_id)
            .bind(say.source)
            .bind(say.agent)
            .bind(say.uid)
            .bind(say.visibility.as_status())
            .bind(say.created_at)
            .bind(say.updated_at)
            .execute(self.pool()),
        )
        .await?;

        Ok(())
    }
}

/// 逐行读取结果集，任一行出错即整体失败，不返回已读取的部分
pub(crate) async fn collect_rows<S>(mut rows: S) -> Result<Vec<SayEntity>, sqlx::Error>
where
    S: TryStream<Ok = SayEntity, Error = sqlx::Error> + Unpin,
{
    let mut says = Vec::new();
    while let Some(say) = rows.try_next().await? {
        says.push(say);
    }
    Ok(says)
}
