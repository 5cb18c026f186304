use mutuelle_semelles::{api, load_repository, AppConfig, ComparatorService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 参考数据只加载一次, 之后只读共享
    let repository = Arc::new(load_repository(&config.data.path)?);
    let service = Arc::new(ComparatorService::new(repository));

    let app = api::create_router(service);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET /api/mutuelles");
    info!("  GET /api/calcul        - remboursement semelles");
    info!("  GET /api/simulation    - facture unique vs deux factures");
    info!("  GET /api/optimisation  - meilleure repartition semelles/bilan");
    info!("  GET /api/comparaison   - classement toutes mutuelles");
    info!("  GET /api/devis         - devis HTML");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
