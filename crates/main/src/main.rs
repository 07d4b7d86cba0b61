//! 主应用程序入口
//!
//! 读取配置、装配存储与凭证服务，然后启动 Axum HTTP 服务。

use std::sync::Arc;

use application::{
    Environment, HitCounter, RandomIdGenerator, ResourceService, ResourceServiceDependencies,
    SystemClock,
};
use config::AppConfig;
use domain::ChirpValidator;
use infrastructure::Infrastructure;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use web_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 文件是可选的
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    let environment = Environment::from_platform(&config.platform);
    tracing::info!(
        platform = %config.platform,
        development = environment.is_development(),
        "configuration loaded"
    );

    let infra = Infrastructure::connect(&config).await?;

    let service = Arc::new(ResourceService::new(ResourceServiceDependencies {
        account_repository: infra.account_repository.clone(),
        chirp_repository: infra.chirp_repository.clone(),
        password_hasher: infra.password_hasher_trait(),
        clock: Arc::new(SystemClock),
        id_generator: Arc::new(RandomIdGenerator),
        hit_counter: Arc::new(HitCounter::new()),
        chirp_validator: ChirpValidator::default(),
        environment,
    }));

    let app = router(AppState::new(service, config.server.static_dir.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "chirpy listening");

    axum::serve(listener, app).await?;

    Ok(())
}
