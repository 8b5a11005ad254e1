use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use say_backend::{
    AppState,
    config::Config,
    database::{NewSayEntity, SayEntity, SayRepository, UserProfile, UserRepository},
    error::StoreError,
    utils::ShortIdGenerator,
};

/// 内存版存储，统计令牌查询和写入次数
#[derive(Default)]
pub struct MemoryStore {
    pub users: Vec<(UserProfile, String)>,
    pub says: Mutex<Vec<NewSayEntity>>,
    pub token_lookups: AtomicUsize,
    pub fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn with_user(id: i64, token: &str) -> Self {
        Self {
            users: vec![(
                UserProfile {
                    id,
                    nickname: "tester".into(),
                    avatar: "https://example.com/a.png".into(),
                },
                token.to_string(),
            )],
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.token_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_id_by_token(&self, token: &str) -> Result<Option<i64>, StoreError> {
        self.token_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Timeout);
        }
        Ok(self
            .users
            .iter()
            .find(|(_, t)| t == token)
            .map(|(profile, _)| profile.id))
    }

    async fn find_profile(&self, user_id: i64) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|(profile, _)| profile.id == user_id)
            .map(|(profile, _)| profile.clone()))
    }
}

#[async_trait]
impl SayRepository for MemoryStore {
    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<SayEntity>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Timeout);
        }
        let mut rows: Vec<SayEntity> = self
            .says
            .lock()
            .iter()
            .map(|s| SayEntity {
                uid: s.uid.clone(),
                content: s.content.clone(),
                source: s.source.clone(),
                created_at: s.created_at,
                updated_at: s.updated_at,
            })
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn insert(&self, say: NewSayEntity) -> Result<(), StoreError> {
        self.says.lock().push(say);
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config::from_vars(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/says_test".into()),
        _ => None,
    })
    .expect("test config")
}

pub fn state_with(store: Arc<MemoryStore>) -> AppState {
    AppState::new(
        test_config(),
        store.clone(),
        store,
        Arc::new(ShortIdGenerator),
    )
}
