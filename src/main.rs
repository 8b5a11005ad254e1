use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use say_backend::{
    AppState, config::Config, database::PgRepository, routes, utils::ShortIdGenerator,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().context("DATABASE_URL must be set")?;

    // 设置数据库连接池
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .max_lifetime(config.db_conn_max_lifetime())
        .acquire_timeout(config.query_timeout())
        .connect(&config.database_url)
        .await
        .context("Failed to connect to Postgres")?;
    tracing::info!(
        max_connections = config.db_max_connections,
        "Connected to database"
    );

    let repository = Arc::new(PgRepository::new(pool, config.query_timeout()));

    // 设置应用状态
    let state = AppState::new(
        config.clone(),
        repository.clone(),
        repository,
        Arc::new(ShortIdGenerator),
    );

    let app = routes::router(state);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
