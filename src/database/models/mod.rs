/// 数据库实体定义
pub mod say;
pub mod user;

pub use say::{NewSayEntity, SayEntity, Visibility};
pub use user::UserProfile;
