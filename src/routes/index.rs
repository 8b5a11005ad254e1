pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn index() -> String {
    format!("欢迎使用说说系统，当前版本号：v{}", VERSION)
}
