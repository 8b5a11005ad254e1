/// 缓存操作
pub mod token;

pub use token::TokenCache;
