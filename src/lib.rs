use std::sync::Arc;

use cache::TokenCache;
use config::Config;
use database::{SayRepository, UserRepository};
use middleware::Authenticator;
use utils::IdGenerator;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserRepository>,
    pub says: Arc<dyn SayRepository>,
    pub authenticator: Arc<Authenticator>,
    pub id_generator: Arc<dyn IdGenerator>,
}

impl AppState {
    /// 创建应用状态，令牌缓存在此创建一次，之后由所有请求共享
    pub fn new(
        config: Config,
        users: Arc<dyn UserRepository>,
        says: Arc<dyn SayRepository>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        let authenticator = Arc::new(Authenticator::new(
            Arc::new(TokenCache::new()),
            users.clone(),
            config.token_ttl_secs,
        ));

        Self {
            config,
            users,
            says,
            authenticator,
            id_generator,
        }
    }
}
